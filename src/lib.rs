//! Paginated suburb property search with score-driven presentation.
//!
//! [`session::SearchSession`] owns the search lifecycle and the loaded
//! [`session::ResultSet`]; [`presentation`] turns listings into card
//! view-models and insight summaries; [`render`] draws them.

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod presentation;
pub mod render;
pub mod session;

pub use error::{Result, SearchError};
