// IronMQ v3 REST client
// reason: reqwest for pooled HTTPS with per-request timeout

use crate::settings::IronMqSettings;
use crate::wire::{ErrorBody, ListQueuesResponse, QueueInfoResponse};
use async_trait::async_trait;
use ironmq_core::domain::{ListQueuesQuery, QueueInfo, QueueSummary};
use ironmq_core::error::{AppError, Result};
use ironmq_core::port::{QueueService, QueueServiceError};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// QueueService backed by the IronMQ REST API
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct IronMqClient {
    http: Client,
    base_url: Url,
}

impl IronMqClient {
    /// Build a client for the given settings
    ///
    /// # Errors
    /// - AppError::Config if the endpoint or token cannot be used
    pub fn new(settings: &IronMqSettings) -> Result<Self> {
        let base_url = Url::parse(&settings.base_url())
            .map_err(|e| AppError::Config(format!("Invalid IronMQ endpoint: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Config(format!(
                "Invalid IronMQ endpoint: {}",
                base_url
            )));
        }

        let mut auth = HeaderValue::from_str(&format!("OAuth {}", settings.token))
            .map_err(|_| AppError::Config("IronMQ token contains invalid characters".to_string()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .user_agent(settings.user_agent.as_str())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http, base_url })
    }

    /// `{base}/projects/{project_id}/queues[/{segment}...]`, percent-encoded
    ///
    /// `.` and `..` are refused: URL normalisation drops them, so the request
    /// would reach a different resource.
    fn queues_url(
        &self,
        project_id: &str,
        extra: &[&str],
    ) -> std::result::Result<Url, QueueServiceError> {
        if let Some(segment) = std::iter::once(&project_id)
            .chain(extra)
            .find(|s| matches!(**s, "." | ".."))
        {
            return Err(QueueServiceError::InvalidRequest(format!(
                "path segment {:?} is not addressable",
                segment
            )));
        }

        let mut url = self.base_url.clone();
        {
            // checked in new(): the base URL has a path
            if let Ok(mut segments) = url.path_segments_mut() {
                segments
                    .pop_if_empty()
                    .extend(["projects", project_id, "queues"])
                    .extend(extra);
            }
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> std::result::Result<T, QueueServiceError> {
        debug!(url = %url, "IronMQ request");

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| QueueServiceError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| QueueServiceError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = error_message(status, &body);
            warn!(url = %url, status = status.as_u16(), message = %message, "IronMQ request failed");
            return Err(QueueServiceError::Http {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| QueueServiceError::Decode(e.to_string()))
    }
}

/// Prefer `{"msg": ...}`, then the raw body, then the status reason
fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(err) = serde_json::from_str::<ErrorBody>(body) {
        return err.msg;
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("Unknown status")
        .to_string()
}

#[async_trait]
impl QueueService for IronMqClient {
    async fn list_queues(
        &self,
        project_id: &str,
        query: &ListQueuesQuery,
    ) -> std::result::Result<Vec<QueueSummary>, QueueServiceError> {
        let mut url = self.queues_url(project_id, &[])?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("per_page", &query.per_page.to_string());
            if let Some(previous) = &query.previous {
                pairs.append_pair("previous", previous);
            }
            if let Some(prefix) = &query.prefix {
                pairs.append_pair("prefix", prefix);
            }
        }

        let response: ListQueuesResponse = self.get_json(url).await?;
        Ok(response.queues.into_iter().map(Into::into).collect())
    }

    async fn queue_info(
        &self,
        project_id: &str,
        queue_name: &str,
    ) -> std::result::Result<QueueInfo, QueueServiceError> {
        let url = self.queues_url(project_id, &[queue_name])?;
        let response: QueueInfoResponse = self.get_json(url).await?;
        Ok(response.queue.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings_for(server: &MockServer) -> IronMqSettings {
        let addr = server.address();
        IronMqSettings {
            scheme: "http".to_string(),
            host: addr.ip().to_string(),
            port: addr.port(),
            ..IronMqSettings::new("test-token")
        }
    }

    #[tokio::test]
    async fn test_list_queues_sends_auth_and_page_size() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/3/projects/p1/queues"))
            .and(query_param("per_page", "1000"))
            .and(query_param_is_missing("previous"))
            .and(header("authorization", "OAuth test-token"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "queues": [{"name": "b"}, {"name": "a"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = IronMqClient::new(&settings_for(&server)).unwrap();
        let queues = client
            .list_queues("p1", &ListQueuesQuery::first_page(1000))
            .await
            .unwrap();

        assert_eq!(queues, vec![QueueSummary::new("b"), QueueSummary::new("a")]);
    }

    #[tokio::test]
    async fn test_list_queues_cursor_arguments() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/3/projects/p1/queues"))
            .and(query_param("per_page", "10"))
            .and(query_param("previous", "m"))
            .and(query_param("prefix", "or"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"queues": []})))
            .expect(1)
            .mount(&server)
            .await;

        let client = IronMqClient::new(&settings_for(&server)).unwrap();
        let query = ListQueuesQuery {
            prefix: Some("or".to_string()),
            previous: Some("m".to_string()),
            per_page: 10,
        };

        assert!(client.list_queues("p1", &query).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_queue_info_decodes_counters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/3/projects/p1/queues/jobs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "queue": {
                    "name": "jobs",
                    "project_id": "p1",
                    "type": "pull",
                    "size": 5,
                    "total_messages": 42
                }
            })))
            .mount(&server)
            .await;

        let client = IronMqClient::new(&settings_for(&server)).unwrap();
        let info = client.queue_info("p1", "jobs").await.unwrap();

        assert!(info.is_pull());
        assert_eq!(info.size, 5);
        assert_eq!(info.total_messages, 42);
    }

    #[tokio::test]
    async fn test_queue_name_is_percent_encoded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/3/projects/p1/queues/my%20queue%2Fx"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "queue": {"name": "my queue/x", "type": "pull"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = IronMqClient::new(&settings_for(&server)).unwrap();
        let info = client.queue_info("p1", "my queue/x").await.unwrap();
        assert_eq!(info.name, "my queue/x");
    }

    #[tokio::test]
    async fn test_dot_segments_are_not_sent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"queues": []})))
            .expect(0)
            .mount(&server)
            .await;

        let client = IronMqClient::new(&settings_for(&server)).unwrap();
        for name in [".", ".."] {
            let err = client.queue_info("p1", name).await.unwrap_err();
            assert!(matches!(err, QueueServiceError::InvalidRequest(_)), "{name}: {err}");
        }
        for project_id in [".", ".."] {
            let err = client
                .list_queues(project_id, &ListQueuesQuery::first_page(10))
                .await
                .unwrap_err();
            assert!(matches!(err, QueueServiceError::InvalidRequest(_)));
        }

        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_dotted_names_keep_their_own_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/3/projects/p1/queues/..."))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "queue": {"name": "...", "type": "pull", "size": 1}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = IronMqClient::new(&settings_for(&server)).unwrap();
        let info = client.queue_info("p1", "...").await.unwrap();
        assert_eq!(info.name, "...");
    }

    #[tokio::test]
    async fn test_404_maps_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/3/projects/p1/queues/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"msg": "Queue not found"})))
            .mount(&server)
            .await;

        let client = IronMqClient::new(&settings_for(&server)).unwrap();
        let err = client.queue_info("p1", "missing").await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "HTTP 404: Queue not found");
    }

    #[tokio::test]
    async fn test_500_keeps_raw_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/3/projects/p1/queues/broken"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .mount(&server)
            .await;

        let client = IronMqClient::new(&settings_for(&server)).unwrap();
        let err = client.queue_info("p1", "broken").await.unwrap_err();

        assert_eq!(
            err,
            QueueServiceError::Http {
                status: 500,
                message: "upstream exploded".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_empty_error_body_uses_reason() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = IronMqClient::new(&settings_for(&server)).unwrap();
        let err = client
            .list_queues("p1", &ListQueuesQuery::first_page(1000))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "HTTP 503: Service Unavailable");
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = IronMqClient::new(&settings_for(&server)).unwrap();
        let err = client.queue_info("p1", "jobs").await.unwrap_err();

        assert!(matches!(err, QueueServiceError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_is_transport_error() {
        let settings = IronMqSettings {
            scheme: "http".to_string(),
            host: "127.0.0.1".to_string(),
            port: 1,
            ..IronMqSettings::new("tok")
        };

        let client = IronMqClient::new(&settings).unwrap();
        let err = client.queue_info("p1", "jobs").await.unwrap_err();

        assert!(matches!(err, QueueServiceError::Transport(_)));
    }

    #[test]
    fn test_invalid_token_rejected() {
        let err = IronMqClient::new(&IronMqSettings::new("bad\ntoken")).err().unwrap();
        assert!(matches!(err, AppError::Config(_)));
    }
}
