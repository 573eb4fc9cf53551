pub mod cards;
pub mod classify;
pub mod format;
pub mod insights;

pub use cards::{project_card, project_details, CardViewModel, DetailView};
pub use classify::{score_label, score_tier, ScoreLabel, ScoreTier, Tone, Verdict};
pub use insights::InsightSummary;
