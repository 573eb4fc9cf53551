use crate::client::types::SearchQuery;
use crate::error::Result;
use crate::models::ResultPage;
use async_trait::async_trait;

/// Common trait for all search backends
/// The session only depends on this, so the HTTP client and in-memory fixtures are interchangeable
#[async_trait]
pub trait SearchTransport: Send + Sync {
    /// Fetch one page of results for the query
    async fn fetch_page(&self, query: &SearchQuery) -> Result<ResultPage>;

    /// Get the name of the backend
    fn source_name(&self) -> &'static str;
}
