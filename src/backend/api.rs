//! Client for the recommendation service API

use std::sync::Arc;

use serde_json::Value;

use super::transport::{HttpTransport, RawResponse, Transport};
use super::types::{HealthResponse, RecommendRequest, RecommendResponse, Recommendations};
use crate::config::Config;
use crate::error::ClientError;

pub const RECOMMEND_PATH: &str = "/api/recommend";

/// Cheap-to-clone handle on the recommendation service
#[derive(Clone)]
pub struct BackendClient {
    transport: Arc<dyn Transport>,
    health_path: String,
}

impl BackendClient {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::with_transport(Arc::new(transport), &config.health_path))
    }

    pub fn with_transport(transport: Arc<dyn Transport>, health_path: &str) -> Self {
        Self {
            transport,
            health_path: health_path.to_string(),
        }
    }

    /// Configured base endpoint, as shown to the user in connectivity errors
    pub fn endpoint(&self) -> &str {
        self.transport.base_url()
    }

    /// Check if backend is healthy
    pub async fn health_check(&self) -> Result<HealthResponse, ClientError> {
        let raw = self
            .transport
            .get(&self.health_path)
            .await
            .map_err(|_| ClientError::unreachable(self.endpoint()))?;

        if !raw.is_success() {
            return Err(ClientError::rejected(raw.status, service_error(&raw.body)));
        }
        serde_json::from_str(&raw.body).map_err(|_| ClientError::malformed(raw.status))
    }

    /// Ask for recommendations. Sends exactly one request.
    pub async fn recommend(&self, request: &RecommendRequest) -> Result<Recommendations, ClientError> {
        let body = request.to_json();
        let raw = self
            .transport
            .post_json(RECOMMEND_PATH, &body)
            .await
            .map_err(|e| {
                tracing::error!("Recommendation request failed: {}", e);
                ClientError::unreachable(self.endpoint())
            })?;
        interpret_recommendations(raw)
    }
}

/// Map a received response onto a result set or a normalized error
pub(crate) fn interpret_recommendations(raw: RawResponse) -> Result<Recommendations, ClientError> {
    if !raw.is_success() {
        let message = service_error(&raw.body);
        tracing::warn!(status = raw.status, ?message, "Recommendation request rejected");
        return Err(ClientError::rejected(raw.status, message));
    }

    match serde_json::from_str::<RecommendResponse>(&raw.body) {
        Ok(response) => Ok(Recommendations {
            items: response.recommendations,
            message: response.message.filter(|m| !m.trim().is_empty()),
        }),
        Err(e) => {
            tracing::warn!(status = raw.status, "Unexpected recommendation response: {}", e);
            Err(ClientError::malformed(raw.status))
        }
    }
}

/// Error text supplied by the service, if the body carries one.
/// Accepts `{"error": "..."}`, `{"error": {"message": "..."}}` and `{"detail": "..."}`.
fn service_error(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let text = match value.get("error") {
        Some(Value::String(s)) => Some(s.as_str()),
        Some(Value::Object(obj)) => obj.get("message").and_then(Value::as_str),
        _ => None,
    }
    .or_else(|| value.get("detail").and_then(Value::as_str))?;

    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::transport::mock::MockTransport;
    use crate::error::{ErrorKind, GENERIC_REJECTION};
    use serde_json::json;

    fn raw(status: u16, body: Value) -> RawResponse {
        RawResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_preserves_service_order() {
        let result = interpret_recommendations(raw(
            200,
            json!({
                "recommendations": [
                    { "name": "B test", "url": "https://b" },
                    { "name": "A test", "url": "https://a" }
                ]
            }),
        ))
        .unwrap();
        let names: Vec<_> = result.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["B test", "A test"]);
        assert_eq!(result.message, None);
    }

    #[test]
    fn test_item_with_name_and_title_keeps_result_set() {
        let result = interpret_recommendations(raw(
            200,
            json!({
                "recommendations": [
                    { "name": "Core Java", "title": "Core Java (New)", "url": "u" },
                    { "title": "Automata", "url": "v" }
                ]
            }),
        ))
        .unwrap();
        let names: Vec<_> = result.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Core Java", "Automata"]);
    }

    #[test]
    fn test_empty_set_is_success() {
        let result = interpret_recommendations(raw(
            200,
            json!({ "recommendations": [], "message": "Nothing matched that query" }),
        ))
        .unwrap();
        assert!(result.items.is_empty());
        assert_eq!(result.message.as_deref(), Some("Nothing matched that query"));
    }

    #[test]
    fn test_status_field_is_not_authoritative() {
        let err = interpret_recommendations(raw(200, json!({ "status": "success" }))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);

        let ok = interpret_recommendations(raw(
            200,
            json!({ "status": "error", "recommendations": [] }),
        ));
        assert!(ok.is_ok());
    }

    #[test]
    fn test_non_json_success_is_malformed() {
        let err = interpret_recommendations(RawResponse {
            status: 200,
            body: "<html>oops</html>".to_string(),
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }

    #[test]
    fn test_rejected_uses_service_error() {
        let err = interpret_recommendations(raw(400, json!({ "error": "Query too short" }))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Rejected);
        assert_eq!(err.message(), "Query too short");
        assert_eq!(err.status(), Some(400));

        let err = interpret_recommendations(raw(
            422,
            json!({ "error": { "code": "VALIDATION_ERROR", "message": "url must be http(s)" } }),
        ))
        .unwrap_err();
        assert_eq!(err.message(), "url must be http(s)");

        let err = interpret_recommendations(raw(500, json!({ "detail": "Model not loaded" }))).unwrap_err();
        assert_eq!(err.message(), "Model not loaded");
    }

    #[test]
    fn test_rejected_falls_back_to_generic() {
        let err = interpret_recommendations(RawResponse {
            status: 502,
            body: "Bad Gateway".to_string(),
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Rejected);
        assert_eq!(err.message(), GENERIC_REJECTION);

        let err = interpret_recommendations(raw(500, json!({ "error": "  " }))).unwrap_err();
        assert_eq!(err.message(), GENERIC_REJECTION);
    }

    #[tokio::test]
    async fn test_transport_failure_is_unreachable() {
        let transport = Arc::new(MockTransport::new("http://reco.internal:5000").fail("connection refused"));
        let client = BackendClient::with_transport(transport.clone(), "/health");
        let err = client
            .recommend(&RecommendRequest {
                query: "sales".to_string(),
                url: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unreachable);
        assert!(err.message().contains("http://reco.internal:5000"));
        assert_eq!(transport.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_connection_refused_over_http() {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let config = Config {
            api_url: format!("http://127.0.0.1:{}", port),
            timeout: std::time::Duration::from_secs(2),
            ..Config::default()
        };
        let client = BackendClient::new(&config).unwrap();

        let err = client
            .recommend(&RecommendRequest {
                query: "data analyst".to_string(),
                url: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unreachable);
        assert!(err.message().contains(&config.api_url));
    }

    #[tokio::test]
    async fn test_silent_server_times_out_as_unreachable() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        // Accept connections and hold them open without ever answering.
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let config = Config {
            api_url: format!("http://127.0.0.1:{}", port),
            timeout: std::time::Duration::from_secs(1),
            ..Config::default()
        };
        let client = BackendClient::new(&config).unwrap();

        let started = std::time::Instant::now();
        let err = client
            .recommend(&RecommendRequest {
                query: "graduate engineer".to_string(),
                url: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unreachable);
        assert!(err.message().contains(&config.api_url));
        assert!(started.elapsed() < std::time::Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_posts_to_recommend_path() {
        let transport = Arc::new(MockTransport::new("http://localhost:5000").reply(200, json!({ "recommendations": [] })));
        let client = BackendClient::with_transport(transport.clone(), "/health");
        client
            .recommend(&RecommendRequest {
                query: "analyst".to_string(),
                url: Some("https://jobs.example.com/1".to_string()),
            })
            .await
            .unwrap();

        let calls = transport.calls();
        assert_eq!(calls[0].method, "POST");
        assert_eq!(calls[0].path, RECOMMEND_PATH);
        assert_eq!(
            calls[0].body,
            Some(json!({ "query": "analyst", "url": "https://jobs.example.com/1" }))
        );
    }
}
