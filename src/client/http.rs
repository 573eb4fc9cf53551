use crate::client::traits::SearchTransport;
use crate::client::types::{ErrorBody, SearchQuery};
use crate::error::{Result, SearchError};
use crate::models::ResultPage;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

const USER_AGENT: &str = concat!("suburb-scout/", env!("CARGO_PKG_VERSION"));

/// Search backend talking to the `/search` endpoint over HTTP
pub struct HttpSearchClient {
    client: Client,
    base_url: String,
}

impl HttpSearchClient {
    /// Create a client with the default 30 second timeout
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    /// Create a client with a custom request timeout
    pub fn with_timeout(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.base_url)
    }
}

#[async_trait]
impl SearchTransport for HttpSearchClient {
    async fn fetch_page(&self, query: &SearchQuery) -> Result<ResultPage> {
        let url = self.search_url();
        debug!(%url, term = %query.term, offset = query.offset, limit = query.limit, "Fetching page");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Search endpoint returned status: {}", status);
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error);
            return Err(SearchError::Request {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let page: ResultPage = serde_json::from_str(&body)
            .map_err(|e| SearchError::Transport(format!("Failed to decode result page: {e}")))?;

        info!(
            "Received {} of {} properties for '{}' (offset {})",
            page.listings.len(),
            page.total,
            page.suburb,
            page.offset
        );
        Ok(page)
    }

    fn source_name(&self) -> &'static str {
        "HTTP"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Answer one request with a canned response; yields the request line
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let mut request = Vec::new();
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();

            let text = String::from_utf8_lossy(&request).to_string();
            text.lines().next().unwrap_or_default().to_string()
        });

        (base_url, handle)
    }

    #[tokio::test]
    async fn test_decodes_result_page() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"{"suburb":"st kilda","suburb_metrics":{"suburb_score":74,"walkability":88,"population_growth":1.9},"properties":[],"count":0,"total":18,"offset":15,"limit":10,"has_more":false}"#,
        )
        .await;
        let client = HttpSearchClient::new(&base_url).unwrap();
        let query = SearchQuery {
            term: "St Kilda".to_string(),
            offset: 15,
            limit: 10,
        };

        let page = client.fetch_page(&query).await.unwrap();
        assert_eq!(page.total, 18);
        assert!(!page.has_more);

        let request_line = server.await.unwrap();
        assert!(request_line.starts_with("GET /search?"));
        assert!(request_line.contains("q=St+Kilda"));
        assert!(request_line.contains("offset=15"));
        assert!(request_line.contains("limit=10"));
    }

    #[tokio::test]
    async fn test_error_status_keeps_server_message() {
        let (base_url, server) =
            serve_once("400 Bad Request", r#"{"error":"Please provide a suburb name"}"#).await;
        let client = HttpSearchClient::new(&base_url).unwrap();

        let err = client
            .fetch_page(&SearchQuery::first_page("Richmond", 15))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            SearchError::Request {
                status: 400,
                message: Some("Please provide a suburb name".to_string()),
            }
        );
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_error_status_without_json_body() {
        let (base_url, server) = serve_once("502 Bad Gateway", "upstream down").await;
        let client = HttpSearchClient::new(&base_url).unwrap();

        let err = client
            .fetch_page(&SearchQuery::first_page("Richmond", 15))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            SearchError::Request {
                status: 502,
                message: None,
            }
        );
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_undecodable_success_body_is_transport_error() {
        let (base_url, server) = serve_once("200 OK", "<html>maintenance</html>").await;
        let client = HttpSearchClient::new(&base_url).unwrap();

        let err = client
            .fetch_page(&SearchQuery::first_page("Richmond", 15))
            .await
            .unwrap_err();
        match err {
            SearchError::Transport(message) => {
                assert!(message.starts_with("Failed to decode result page"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
        server.await.unwrap();
    }

    #[test]
    fn test_search_url_drops_trailing_slash() {
        let client = HttpSearchClient::new("http://localhost:5001/").unwrap();
        assert_eq!(client.search_url(), "http://localhost:5001/search");
        assert_eq!(client.source_name(), "HTTP");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let client =
            HttpSearchClient::with_timeout("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();
        let err = client
            .fetch_page(&SearchQuery::first_page("Richmond", 15))
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::Transport(_)));
    }
}
