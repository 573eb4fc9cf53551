//! Errors surfaced by a search session.

use thiserror::Error;

/// Result type for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Shown when a fresh search fails without a server-provided message
pub const SEARCH_FAILED_MESSAGE: &str = "Failed to fetch properties";
/// Shown when a fresh search fails before any response arrives
pub const SEARCH_UNREACHABLE_MESSAGE: &str = "An error occurred while fetching data";
/// Shown when a load-more request fails for any reason without a server message
pub const LOAD_MORE_FAILED_MESSAGE: &str = "Failed to load more properties";
/// Shown when the search term is blank
pub const EMPTY_TERM_MESSAGE: &str = "Please enter a suburb name";

/// Search session errors.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SearchError {
    /// The search term was empty after trimming; nothing was requested
    #[error("Validation error: {0}")]
    Validation(String),

    /// The endpoint answered with a non-success status
    #[error("Request failed with status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Request { status: u16, message: Option<String> },

    /// Network failure or an undecodable response body
    #[error("Transport error: {0}")]
    Transport(String),
}

impl SearchError {
    pub fn empty_term() -> Self {
        SearchError::Validation(EMPTY_TERM_MESSAGE.to_string())
    }

    /// Message for the transient notice. `load_more` selects the fallback wording.
    pub fn user_message(&self, load_more: bool) -> String {
        match self {
            SearchError::Validation(msg) => msg.clone(),
            SearchError::Request {
                message: Some(msg), ..
            } if !msg.trim().is_empty() => msg.clone(),
            SearchError::Request { .. } if load_more => LOAD_MORE_FAILED_MESSAGE.to_string(),
            SearchError::Request { .. } => SEARCH_FAILED_MESSAGE.to_string(),
            SearchError::Transport(_) if load_more => LOAD_MORE_FAILED_MESSAGE.to_string(),
            SearchError::Transport(_) => SEARCH_UNREACHABLE_MESSAGE.to_string(),
        }
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        SearchError::Transport(err.to_string())
    }
}
