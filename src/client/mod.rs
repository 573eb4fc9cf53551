pub mod fixture;
pub mod http;
pub mod traits;
pub mod types;

pub use fixture::FixtureTransport;
pub use http::HttpSearchClient;
pub use traits::SearchTransport;
pub use types::{PagePolicy, SearchQuery};
