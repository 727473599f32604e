use bytes::Bytes;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, RequestBuilder};

use super::models::SourceKind;
use crate::config::HttpConfig;
use crate::error::FetchError;
use crate::{Error, Result};

const MAX_RESPONSE_BYTES: usize = 5 * 1024 * 1024;

const FEED_ACCEPT: &str = "application/rss+xml,application/atom+xml,application/xml;q=0.9,text/xml;q=0.8,*/*;q=0.5";
const JSON_ACCEPT: &str = "application/json";

/// HTTP side of the loader: exactly one request per call, no retries
pub struct FeedFetcher {
    client: Client,
}

impl FeedFetcher {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = Self::build_client(config.request_timeout_secs, &config.user_agent)?;
        Ok(Self { client })
    }

    fn build_client(timeout_secs: u64, user_agent: &str) -> Result<Client> {
        let mut builder = Client::builder()
            .gzip(true)
            .redirect(reqwest::redirect::Policy::limited(10));

        if timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(timeout_secs));
        }

        let mut headers = HeaderMap::new();
        let ua = HeaderValue::from_str(user_agent)
            .map_err(|e| Error::Config(format!("Invalid user agent: {}", e)))?;
        headers.insert(USER_AGENT, ua);
        builder = builder.default_headers(headers);

        builder.build().map_err(Error::Http)
    }

    fn request(&self, source: &SourceKind) -> RequestBuilder {
        match source {
            SourceKind::Rss { url } => self
                .client
                .get(url)
                .header(ACCEPT, HeaderValue::from_static(FEED_ACCEPT)),
            SourceKind::GraphQl {
                endpoint,
                query,
                variables,
            } => self
                .client
                .post(endpoint)
                .header(ACCEPT, HeaderValue::from_static(JSON_ACCEPT))
                .json(&serde_json::json!({
                    "query": query,
                    "variables": variables,
                })),
            SourceKind::Rest { url } => self
                .client
                .get(url)
                .header(ACCEPT, HeaderValue::from_static(JSON_ACCEPT)),
        }
    }

    /// Issue the request for `source` and return the raw body
    pub async fn fetch(&self, source: &SourceKind) -> std::result::Result<Bytes, FetchError> {
        let url = source.url();
        tracing::info!("Fetching {} updates from: {}", source.name(), url);

        let response = self.request(source).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(FetchError::Transport {
                status,
                url: url.to_string(),
            });
        }

        let content = response.bytes().await?;
        ensure_content_size(content.len(), url)?;

        tracing::debug!("Received {} bytes from {}", content.len(), url);
        Ok(content)
    }
}

fn ensure_content_size(size: usize, url: &str) -> std::result::Result<(), FetchError> {
    if size > MAX_RESPONSE_BYTES {
        return Err(FetchError::Parse(format!(
            "Response too large ({} bytes) for URL: {}",
            size, url
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[test]
    fn test_content_size_limit() {
        assert!(ensure_content_size(1024, "https://example.com").is_ok());
        assert!(matches!(
            ensure_content_size(MAX_RESPONSE_BYTES + 1, "https://example.com"),
            Err(FetchError::Parse(_))
        ));
    }

    #[test]
    fn test_invalid_user_agent_is_config_error() {
        let config = HttpConfig {
            request_timeout_secs: 5,
            user_agent: "bad\nagent".to_string(),
        };
        assert!(matches!(FeedFetcher::new(&config), Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_graphql_request_is_post_with_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/graphql")
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "query": "{ viewer { login } }",
                "variables": { "first": 10 },
            })))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let fetcher = FeedFetcher::new(&HttpConfig::default()).unwrap();
        let source = SourceKind::GraphQl {
            endpoint: format!("{}/graphql", server.url()),
            query: "{ viewer { login } }".to_string(),
            variables: serde_json::json!({ "first": 10 }),
        };

        let body = fetcher.fetch(&source).await.unwrap();
        assert_eq!(&body[..], b"{}");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_is_transport_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/feed.xml")
            .with_status(503)
            .create_async()
            .await;

        let fetcher = FeedFetcher::new(&HttpConfig::default()).unwrap();
        let source = SourceKind::Rss {
            url: format!("{}/feed.xml", server.url()),
        };

        match fetcher.fetch(&source).await {
            Err(FetchError::Transport { status, .. }) => {
                assert_eq!(status, reqwest::StatusCode::SERVICE_UNAVAILABLE)
            }
            other => panic!("expected transport error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_user_agent_is_sent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/items")
            .match_header("user-agent", "weeklyfeed-test")
            .match_header("accept", JSON_ACCEPT)
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let config = HttpConfig {
            request_timeout_secs: 5,
            user_agent: "weeklyfeed-test".to_string(),
        };
        let fetcher = FeedFetcher::new(&config).unwrap();
        let source = SourceKind::Rest {
            url: format!("{}/items", server.url()),
        };

        fetcher.fetch(&source).await.unwrap();
        mock.assert_async().await;
    }
}
