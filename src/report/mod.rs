pub mod controller;

use crate::config::AppConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ReportRequest {
    pub question: String,
}

/// Successful reply of the report endpoint. Only `question` and
/// `document_url` are required; anything unknown is ignored.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ReportResult {
    pub question: String,
    pub document_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at_utc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_preview: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Please enter a research question.")]
    EmptyQuestion,
    #[error("A report is already being generated")]
    Busy,
    #[error("Request timed out")]
    Timeout(#[source] reqwest::Error),
    #[error("{}", with_sources(.0))]
    Http(#[from] reqwest::Error),
    /// Displays as the status text only; `detail` carries the service's own message.
    #[error("{status_text}")]
    Status {
        status: u16,
        status_text: String,
        detail: Option<String>,
    },
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ReportError {
    fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ReportError::Timeout(err)
        } else {
            ReportError::Http(err)
        }
    }
}

/// reqwest's own message omits the cause ("error sending request for url").
fn with_sources(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = std::error::Error::source(cause);
    }
    message
}

impl Serialize for ReportError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct ReportClient {
    client: Client,
    endpoint: String,
}

impl ReportClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ReportError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ReportError> {
        match config.request_timeout() {
            Some(timeout) => Self::with_timeout(&config.report_endpoint, timeout),
            None => Ok(Self::new(&config.report_endpoint)),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn generate(&self, question: &str) -> Result<ReportResult, ReportError> {
        let body = ReportRequest {
            question: question.to_string(),
        };

        let resp = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(ReportError::from_transport)?;

        let status = resp.status();
        let text = resp.text().await.map_err(ReportError::from_transport)?;

        if !status.is_success() {
            let status_text = status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.as_u16().to_string());
            let detail = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .map(|b| b.error);
            return Err(ReportError::Status {
                status: status.as_u16(),
                status_text,
                detail,
            });
        }

        serde_json::from_str(&text).map_err(|e| ReportError::Decode(e.to_string()))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    pub(crate) async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/api/report")
    }

    #[tokio::test]
    async fn posts_question_as_json() {
        let app = Router::new().route(
            "/api/report",
            post(|Json(body): Json<Value>| async move {
                Json(json!({
                    "question": body["question"],
                    "document_url": "https://blob.example/report-1.html",
                    "file_name": "report-1.html",
                    "generated_at_utc": "2026-01-01T00:00:00Z",
                    "summary_preview": "Short summary",
                    "plan": { "call_search": true }
                }))
            }),
        );
        let client = ReportClient::new(serve(app).await);

        let result = client.generate("What is Rust?").await.unwrap();
        assert_eq!(result.question, "What is Rust?");
        assert_eq!(result.document_url, "https://blob.example/report-1.html");
        assert_eq!(result.file_name.as_deref(), Some("report-1.html"));
        assert_eq!(result.summary_preview.as_deref(), Some("Short summary"));
    }

    #[tokio::test]
    async fn non_success_status_carries_status_text() {
        let app = Router::new().route(
            "/api/report",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Missing 'question' in body or query string." })),
                )
            }),
        );
        let client = ReportClient::new(serve(app).await);

        let err = client.generate("q").await.unwrap_err();
        match &err {
            ReportError::Status {
                status,
                status_text,
                detail,
            } => {
                assert_eq!(*status, 400);
                assert_eq!(status_text, "Bad Request");
                assert_eq!(
                    detail.as_deref(),
                    Some("Missing 'question' in body or query string.")
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.to_string(), "Bad Request");
    }

    #[tokio::test]
    async fn missing_fields_are_a_decode_error() {
        let app = Router::new().route(
            "/api/report",
            post(|| async { Json(json!({ "question": "q" })) }),
        );
        let client = ReportClient::new(serve(app).await);

        let err = client.generate("q").await.unwrap_err();
        assert!(matches!(err, ReportError::Decode(_)), "got {err:?}");
    }

    pub(crate) fn slow_endpoint(delay: Duration) -> Router {
        Router::new().route(
            "/api/report",
            post(move || async move {
                tokio::time::sleep(delay).await;
                Json(json!({ "question": "q", "document_url": "U" }))
            }),
        )
    }

    #[tokio::test]
    async fn configured_timeout_aborts_slow_request() {
        let url = serve(slow_endpoint(Duration::from_secs(3))).await;
        let config = AppConfig {
            report_endpoint: url,
            request_timeout_secs: None,
            ..AppConfig::default()
        };
        assert!(config.request_timeout().is_none());

        let client = ReportClient::with_timeout(&config.report_endpoint, Duration::from_millis(200))
            .unwrap();
        let err = client.generate("q").await.unwrap_err();
        match &err {
            ReportError::Timeout(inner) => assert!(inner.is_timeout()),
            other => panic!("expected timeout, got {other:?}"),
        }
        assert_eq!(err.to_string(), "Request timed out");
    }

    #[tokio::test]
    async fn timeout_comes_from_config() {
        let url = serve(slow_endpoint(Duration::from_secs(3))).await;
        let config = AppConfig {
            report_endpoint: url,
            request_timeout_secs: Some(1),
            ..AppConfig::default()
        };
        let client = ReportClient::from_config(&config).unwrap();
        assert_eq!(client.endpoint(), config.report_endpoint);

        let err = client.generate("q").await.unwrap_err();
        assert!(matches!(err, ReportError::Timeout(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn refused_connection_names_the_cause() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = ReportClient::new(format!("http://{addr}/api/report"))
            .generate("q")
            .await
            .unwrap_err();
        assert!(matches!(err, ReportError::Http(_)));
        let message = err.to_string();
        assert!(message.starts_with("error sending request"), "{message}");
        assert!(message.contains("/api/report): "), "cause missing: {message}");
    }

    #[test]
    fn serializes_as_display_string() {
        let err = ReportError::Status {
            status: 503,
            status_text: "Service Unavailable".into(),
            detail: None,
        };
        assert_eq!(serde_json::to_value(&err).unwrap(), json!("Service Unavailable"));
    }
}
