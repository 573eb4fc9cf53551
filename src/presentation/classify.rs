//! Display classification of already-scored listings.
//!
//! Every function here is total: unknown badges, NaN metrics and out-of-range
//! scores all land in a defined bucket.

use serde::Serialize;
use std::fmt;

/// Days on market below which a listing counts as fresh
pub const FRESH_LISTING_DAYS: u32 = 14;

/// Visual weight of a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ScoreTier {
    Low,
    Medium,
    High,
}

impl ScoreTier {
    pub fn css_class(self) -> &'static str {
        match self {
            ScoreTier::Low => "score-low",
            ScoreTier::Medium => "score-medium",
            ScoreTier::High => "score-high",
        }
    }
}

/// Five-bucket opportunity label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ScoreLabel {
    Excellent,
    VeryGood,
    Good,
    Fair,
    Limited,
}

impl ScoreLabel {
    /// Best first; the order insight summaries are printed in
    pub const ALL: [ScoreLabel; 5] = [
        ScoreLabel::Excellent,
        ScoreLabel::VeryGood,
        ScoreLabel::Good,
        ScoreLabel::Fair,
        ScoreLabel::Limited,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ScoreLabel::Excellent => "Excellent",
            ScoreLabel::VeryGood => "Very Good",
            ScoreLabel::Good => "Good",
            ScoreLabel::Fair => "Fair",
            ScoreLabel::Limited => "Limited",
        }
    }

    /// Lower-case form used inside summary sentences
    pub fn phrase(self) -> &'static str {
        match self {
            ScoreLabel::Excellent => "excellent",
            ScoreLabel::VeryGood => "very good",
            ScoreLabel::Good => "good",
            ScoreLabel::Fair => "fair",
            ScoreLabel::Limited => "limited",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            ScoreLabel::Excellent => "summary-excellent",
            ScoreLabel::VeryGood => "summary-verygood",
            ScoreLabel::Good => "summary-good",
            ScoreLabel::Fair => "summary-fair",
            ScoreLabel::Limited => "summary-limited",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            ScoreLabel::Excellent => 0,
            ScoreLabel::VeryGood => 1,
            ScoreLabel::Good => 2,
            ScoreLabel::Fair => 3,
            ScoreLabel::Limited => 4,
        }
    }
}

impl fmt::Display for ScoreLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

pub fn score_tier(score: f64) -> ScoreTier {
    if score >= 75.0 {
        ScoreTier::High
    } else if score >= 50.0 {
        ScoreTier::Medium
    } else {
        ScoreTier::Low
    }
}

/// Lower bounds are inclusive; the top bucket is unbounded
pub fn score_label(score: f64) -> ScoreLabel {
    if score >= 80.0 {
        ScoreLabel::Excellent
    } else if score >= 70.0 {
        ScoreLabel::VeryGood
    } else if score >= 60.0 {
        ScoreLabel::Good
    } else if score >= 50.0 {
        ScoreLabel::Fair
    } else {
        ScoreLabel::Limited
    }
}

/// Style class and icon of a badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BadgeStyle {
    pub class: &'static str,
    pub icon: &'static str,
}

const DEFAULT_BADGE: BadgeStyle = BadgeStyle {
    class: "default",
    icon: "✓",
};

const BADGE_TABLE: [(&str, BadgeStyle); 8] = [
    ("Great Value", BadgeStyle { class: "value", icon: "🏆" }),
    ("Premium Features", BadgeStyle { class: "premium", icon: "💎" }),
    ("Transit Hub", BadgeStyle { class: "location", icon: "🚆" }),
    ("High Growth Area", BadgeStyle { class: "growth", icon: "📈" }),
    ("Fresh Listing", BadgeStyle { class: "fresh", icon: "⚡" }),
    ("Affordable", BadgeStyle { class: "value", icon: "💰" }),
    ("Family Home", BadgeStyle { class: "family", icon: "🏠" }),
    ("Investor Special", BadgeStyle { class: "investor", icon: "🌟" }),
];

pub fn badge_style(label: &str) -> BadgeStyle {
    BADGE_TABLE
        .iter()
        .find(|(known, _)| *known == label)
        .map(|(_, style)| *style)
        .unwrap_or(DEFAULT_BADGE)
}

/// How a comparison reads for a buyer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tone {
    Favorable,
    Unfavorable,
    Neutral,
    Warning,
}

impl Tone {
    pub fn css_class(self) -> &'static str {
        match self {
            Tone::Favorable => "verdict-good",
            Tone::Unfavorable => "verdict-bad",
            Tone::Neutral => "verdict-neutral",
            Tone::Warning => "verdict-warning",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    Up,
    Down,
    Level,
}

impl Direction {
    pub fn arrow(self) -> &'static str {
        match self {
            Direction::Up => "↑",
            Direction::Down => "↓",
            Direction::Level => "≈",
        }
    }
}

/// Classified comparison of one listing attribute against the suburb
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub direction: Direction,
    pub label: String,
    pub tone: Tone,
}

impl Verdict {
    fn new(direction: Direction, label: impl Into<String>, tone: Tone) -> Self {
        Self {
            direction,
            label: label.into(),
            tone,
        }
    }

    fn average() -> Self {
        Self::new(Direction::Level, "Average", Tone::Neutral)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.direction.arrow(), self.label)?;
        match self.tone {
            Tone::Favorable => f.write_str(" ✓"),
            Tone::Warning => f.write_str(" ⚠"),
            _ => Ok(()),
        }
    }
}

pub fn price_verdict(price_vs_median_pct: f64) -> Verdict {
    let magnitude = super::format::number(price_vs_median_pct.abs());
    if price_vs_median_pct < 0.0 {
        Verdict::new(Direction::Down, format!("{magnitude}% below"), Tone::Favorable)
    } else {
        Verdict::new(Direction::Up, format!("{magnitude}% above"), Tone::Unfavorable)
    }
}

pub fn size_verdict(size_vs_avg_pct: f64) -> Verdict {
    if size_vs_avg_pct > 0.0 {
        Verdict::new(Direction::Up, "Larger", Tone::Favorable)
    } else if size_vs_avg_pct < -10.0 {
        Verdict::new(Direction::Down, "Smaller", Tone::Neutral)
    } else {
        Verdict::average()
    }
}

pub fn parking_verdict(parking_vs_avg: f64) -> Verdict {
    if parking_vs_avg > 0.0 {
        Verdict::new(Direction::Up, "Above avg", Tone::Favorable)
    } else if parking_vs_avg < 0.0 {
        Verdict::new(Direction::Down, "Below avg", Tone::Neutral)
    } else {
        Verdict::average()
    }
}

pub fn market_velocity_verdict(days_vs_avg: f64) -> Verdict {
    if days_vs_avg > 30.0 {
        Verdict::new(Direction::Up, "Sitting longer", Tone::Warning)
    } else if days_vs_avg < -10.0 {
        Verdict::new(Direction::Down, "Moving fast", Tone::Favorable)
    } else {
        Verdict::average()
    }
}

pub fn is_fresh_listing(days_on_market: u32) -> bool {
    days_on_market < FRESH_LISTING_DAYS
}
