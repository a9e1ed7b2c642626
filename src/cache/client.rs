use super::CacheService;
use crate::models::{CacheRequest, MediaType};
use crate::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://api.edgecast.com";

/// Cache-management method exposed by the vendor endpoint.
#[derive(Debug, Clone, Copy)]
enum ApiMethod {
    Purge,
    Load,
}

impl ApiMethod {
    fn path_segment(self) -> &'static str {
        match self {
            ApiMethod::Purge => "purge",
            ApiMethod::Load => "load",
        }
    }
}

/// HTTP-backed client for an EdgeCast account's edge cache.
pub struct CacheClient {
    client: Client,
    account_number: String,
    token: String,
    cdn_base_url: String,
    api_base_url: String,
}

impl CacheClient {
    pub fn new(account_number: String, token: String, cdn_base_url: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self::new_with_client(account_number, token, cdn_base_url, client)
    }

    /// Construct with an injected HTTP client, e.g. to share one connection
    /// pool across API bindings.
    pub fn new_with_client(
        account_number: String,
        token: String,
        cdn_base_url: String,
        client: Client,
    ) -> Self {
        Self {
            client,
            account_number,
            token,
            cdn_base_url: cdn_base_url.trim_end_matches('/').to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }

    /// Override the API endpoint, e.g. for a staging gateway.
    pub fn with_api_base_url(mut self, base_url: String) -> Self {
        self.api_base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Root URL of the CDN account this client manages.
    pub fn cdn_base_url(&self) -> &str {
        &self.cdn_base_url
    }

    /// Absolute CDN URL for a cached path.
    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}/{}", self.cdn_base_url, path.trim_start_matches('/'))
    }

    fn endpoint(&self, method: ApiMethod) -> String {
        format!(
            "{}/v2/mcc/customers/{}/edge/{}",
            self.api_base_url,
            self.account_number,
            method.path_segment()
        )
    }

    async fn submit(&self, method: ApiMethod, request: &CacheRequest) -> Result<StatusCode> {
        let url = self.endpoint(method);
        tracing::debug!("PUT {} for media path {}", url, request.media_path);

        let response = self
            .client
            .put(&url)
            .header("Authorization", format!("TOK:{}", self.token))
            .header("Accept", "application/json")
            .json(request)
            .send()
            .await?;

        Ok(response.status())
    }

    /// The vendor contract is boolean: 200 is the only success status, and
    /// transport failures are indistinguishable from rejections. The cause is
    /// logged before it is collapsed.
    async fn dispatch(&self, method: ApiMethod, request: CacheRequest) -> bool {
        match self.submit(method, &request).await {
            Ok(StatusCode::OK) => true,
            Ok(status) => {
                tracing::warn!(
                    "EdgeCast {} rejected media path {} (status {})",
                    method.path_segment(),
                    request.media_path,
                    status
                );
                false
            }
            Err(e) => {
                tracing::error!(
                    "EdgeCast {} failed for media path {}: {}",
                    method.path_segment(),
                    request.media_path,
                    e
                );
                false
            }
        }
    }
}

#[async_trait]
impl CacheService for CacheClient {
    async fn purge(&self, media_type: MediaType, pattern: &str) -> bool {
        self.dispatch(ApiMethod::Purge, CacheRequest::new(media_type, pattern))
            .await
    }

    async fn load(&self, media_type: MediaType, url: &str) -> bool {
        self.dispatch(ApiMethod::Load, CacheRequest::new(media_type, url))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(api_base_url: String) -> CacheClient {
        CacheClient::new(
            "0001".to_string(),
            "secret-token".to_string(),
            "https://wpc.0001.edgecastcdn.net".to_string(),
        )
        .with_api_base_url(api_base_url)
    }

    #[tokio::test]
    async fn test_purge_sends_signed_put() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/v2/mcc/customers/0001/edge/purge"))
            .and(header("Authorization", "TOK:secret-token"))
            .and(header("Accept", "application/json"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(serde_json::json!({
                "MediaType": 3,
                "MediaPath": "/images/*"
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        assert!(client.purge(MediaType::HttpLargeObject, "/images/*").await);
    }

    #[tokio::test]
    async fn test_load_sends_signed_put() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/v2/mcc/customers/0001/edge/load"))
            .and(header("Authorization", "TOK:secret-token"))
            .and(body_json(serde_json::json!({
                "MediaType": 8,
                "MediaPath": "https://wpc.0001.edgecastcdn.net/css/site.css"
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        assert!(
            client
                .load(
                    MediaType::HttpSmallObject,
                    "https://wpc.0001.edgecastcdn.net/css/site.css"
                )
                .await
        );
    }

    #[tokio::test]
    async fn test_non_200_statuses_map_to_false() {
        // 2xx near-misses are failures too: the endpoint reports acceptance
        // with exactly 200.
        for status in [201u16, 204, 400, 403, 404, 500, 503] {
            let server = MockServer::start().await;

            Mock::given(method("PUT"))
                .and(path("/v2/mcc/customers/0001/edge/purge"))
                .respond_with(ResponseTemplate::new(status))
                .mount(&server)
                .await;

            let client = test_client(server.uri());
            assert!(
                !client.purge(MediaType::HttpLargeObject, "/images/*").await,
                "status {} must not report success",
                status
            );
        }
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_maps_to_false() {
        let client = test_client("http://127.0.0.1:1".to_string());

        assert!(!client.purge(MediaType::HttpLargeObject, "/images/*").await);
        assert!(!client.load(MediaType::HttpLargeObject, "/images/a.png").await);
    }

    #[test]
    fn test_endpoint_composition() {
        let client = test_client("https://api.example.com/".to_string());

        assert_eq!(
            client.endpoint(ApiMethod::Purge),
            "https://api.example.com/v2/mcc/customers/0001/edge/purge"
        );
        assert_eq!(
            client.endpoint(ApiMethod::Load),
            "https://api.example.com/v2/mcc/customers/0001/edge/load"
        );
    }

    #[test]
    fn test_absolute_url_joins_with_single_slash() {
        let client = test_client("http://unused".to_string());

        assert_eq!(
            client.absolute_url("/images/logo.png"),
            "https://wpc.0001.edgecastcdn.net/images/logo.png"
        );
        assert_eq!(
            client.absolute_url("images/logo.png"),
            "https://wpc.0001.edgecastcdn.net/images/logo.png"
        );
    }
}
