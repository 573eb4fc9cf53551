use serde::{Deserialize, Serialize};

/// Page size of a fresh search
pub const DEFAULT_INITIAL_LIMIT: usize = 15;
/// Page size of a load-more request
pub const DEFAULT_PAGE_LIMIT: usize = 10;

/// Query parameters for one search request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchQuery {
    /// Suburb name, already trimmed
    #[serde(rename = "q")]
    pub term: String,
    /// Index of the first listing to return
    pub offset: usize,
    /// Maximum number of listings to return
    pub limit: usize,
}

impl SearchQuery {
    pub fn first_page(term: impl Into<String>, limit: usize) -> Self {
        Self {
            term: term.into(),
            offset: 0,
            limit,
        }
    }
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            term: String::new(),
            offset: 0,
            limit: DEFAULT_INITIAL_LIMIT,
        }
    }
}

/// Page sizes chosen by the caller; not part of the endpoint contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePolicy {
    pub initial_limit: usize,
    pub page_limit: usize,
}

impl Default for PagePolicy {
    fn default() -> Self {
        Self {
            initial_limit: DEFAULT_INITIAL_LIMIT,
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

/// Body of a non-success response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_serializes_to_wire_names() {
        let query = SearchQuery {
            term: "St Kilda".to_string(),
            offset: 15,
            limit: 10,
        };
        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(value["q"], "St Kilda");
        assert_eq!(value["offset"], 15);
        assert_eq!(value["limit"], 10);
    }

    #[test]
    fn test_error_body_tolerates_missing_field() {
        let body: ErrorBody = serde_json::from_str(r#"{"properties": []}"#).unwrap();
        assert!(body.error.is_none());
    }
}
