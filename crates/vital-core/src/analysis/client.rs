//! Analysis client for an OpenAI-compatible chat completions endpoint.
//!
//! One call, one POST. There is no retry, backoff, or explicit timeout; the
//! call runs until the transport finishes or fails, and every outcome comes
//! back as `Result<Analysis, AnalysisError>`.

use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::request::AnalysisRequest;
use super::AnalysisSettings;
use crate::error::AnalysisError;

/// A completed analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    /// `choices[0].message.content`, verbatim
    pub text: String,
    /// Model reported by the provider, falling back to the requested model
    pub model: String,
    /// Total tokens used, if reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens_used: Option<u32>,
    /// Round-trip latency in milliseconds
    pub latency_ms: u64,
}

/// Client bound to one endpoint, model and credential.
pub struct AnalysisClient {
    settings: AnalysisSettings,
    api_key: Option<String>,
    client: reqwest::Client,
}

// --- Response types ---

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct ChatUsage {
    total_tokens: u32,
}

impl AnalysisClient {
    /// Create a client. A missing key is tolerated; requests then carry an
    /// empty bearer token and the endpoint decides.
    pub fn new(settings: AnalysisSettings, api_key: Option<String>) -> Self {
        Self {
            settings,
            api_key: api_key.filter(|k| !k.is_empty()),
            client: reqwest::Client::new(),
        }
    }

    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    /// Whether a credential was supplied.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Build a request for `image_bytes` with this client's settings.
    pub fn build_request(&self, image_bytes: &[u8]) -> AnalysisRequest {
        AnalysisRequest::build(image_bytes, &self.settings)
    }

    /// Build and send in one step.
    pub async fn analyze_image(&self, image_bytes: &[u8]) -> Result<Analysis, AnalysisError> {
        let request = self.build_request(image_bytes);
        self.analyze(&request).await
    }

    /// Send a built request and extract the analysis text.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<Analysis, AnalysisError> {
        let start = Instant::now();

        if self.api_key.is_none() {
            tracing::warn!("No API key configured; sending request without credentials");
        }
        tracing::debug!(
            endpoint = %self.settings.endpoint,
            model = %request.model(),
            "Sending analysis request"
        );

        let resp = self
            .client
            .post(&self.settings.endpoint)
            .bearer_auth(self.api_key.as_deref().unwrap_or_default())
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await
            .map_err(classify_send_error)?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            tracing::debug!(%status, "Analysis endpoint returned an error status");
            return Err(AnalysisError::Transport {
                message: format!("HTTP {status}: {text}"),
                status_code: Some(status.as_u16()),
            });
        }

        let body = resp.text().await.map_err(|e| AnalysisError::Transport {
            message: format!("Failed to read response body: {e}"),
            status_code: Some(status.as_u16()),
        })?;

        let (text, model, tokens_used) = parse_completion(&body)?;
        let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        tracing::debug!(latency_ms, chars = text.len(), "Analysis received");

        Ok(Analysis {
            text,
            model: model.unwrap_or_else(|| request.model().to_string()),
            tokens_used,
            latency_ms,
        })
    }
}

/// Map a failed `send()` to an error category.
///
/// Builder errors (bad URL, unusable header value) never reach the network,
/// so they are not transport failures.
fn classify_send_error(e: reqwest::Error) -> AnalysisError {
    if e.is_builder() {
        AnalysisError::Unexpected {
            message: format!("Could not build request: {e}"),
        }
    } else {
        AnalysisError::Transport {
            message: format!("Request failed: {e}"),
            status_code: e.status().map(|s| s.as_u16()),
        }
    }
}

/// Reduce a response body to `(content, model, total_tokens)`.
fn parse_completion(
    body: &str,
) -> Result<(String, Option<String>, Option<u32>), AnalysisError> {
    let resp: ChatResponse = serde_json::from_str(body).map_err(|e| AnalysisError::Response {
        message: e.to_string(),
    })?;

    let choice = resp.choices.into_iter().next().ok_or_else(|| AnalysisError::Response {
        message: "choices array is empty".to_string(),
    })?;

    match choice.message.content {
        Some(serde_json::Value::String(text)) => Ok((
            text,
            resp.model,
            resp.usage.map(|u| u.total_tokens),
        )),
        None | Some(serde_json::Value::Null) => Err(AnalysisError::Response {
            message: "choices[0].message.content is missing".to_string(),
        }),
        Some(other) => Err(AnalysisError::Unexpected {
            message: format!("choices[0].message.content is not text: {other}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone)]
    struct Captured {
        authorization: Option<String>,
        content_type: Option<String>,
        body: String,
    }

    /// Serve a fixed response at `/v1/chat/completions` and record every request.
    async fn mock_endpoint(
        status: StatusCode,
        body: &'static str,
    ) -> (String, Arc<Mutex<Vec<Captured>>>) {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let log = captured.clone();

        let app = Router::new().route(
            "/v1/chat/completions",
            post(move |headers: HeaderMap, request_body: String| {
                let log = log.clone();
                async move {
                    let get = |name: header::HeaderName| {
                        headers
                            .get(name)
                            .and_then(|v| v.to_str().ok())
                            .map(String::from)
                    };
                    log.lock().unwrap().push(Captured {
                        authorization: get(header::AUTHORIZATION),
                        content_type: get(header::CONTENT_TYPE),
                        body: request_body,
                    });
                    (status, [(header::CONTENT_TYPE, "application/json")], body)
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}/v1/chat/completions"), captured)
    }

    fn client_for(endpoint: &str, api_key: Option<&str>) -> AnalysisClient {
        let settings = AnalysisSettings::default().with_endpoint(endpoint);
        AnalysisClient::new(settings, api_key.map(String::from))
    }

    #[tokio::test]
    async fn test_success_returns_content_verbatim() {
        let (url, captured) = mock_endpoint(
            StatusCode::OK,
            r#"{"choices":[{"message":{"content":"  X\n"}}]}"#,
        )
        .await;
        let client = client_for(&url, Some("secret-token"));

        let analysis = client.analyze_image(b"image bytes").await.unwrap();
        assert_eq!(analysis.text, "  X\n");
        assert_eq!(analysis.model, "meta-llama/Llama-Vision-Free");
        assert_eq!(analysis.tokens_used, None);

        let requests = captured.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].authorization.as_deref(),
            Some("Bearer secret-token")
        );
        assert_eq!(requests[0].content_type.as_deref(), Some("application/json"));
    }

    #[tokio::test]
    async fn test_success_reads_model_and_usage() {
        let (url, _) = mock_endpoint(
            StatusCode::OK,
            r#"{"model":"served/model","choices":[{"message":{"role":"assistant","content":"ok"}}],"usage":{"prompt_tokens":10,"completion_tokens":2,"total_tokens":12}}"#,
        )
        .await;
        let client = client_for(&url, Some("k"));

        let analysis = client.analyze_image(&[1, 2, 3]).await.unwrap();
        assert_eq!(analysis.text, "ok");
        assert_eq!(analysis.model, "served/model");
        assert_eq!(analysis.tokens_used, Some(12));
    }

    #[tokio::test]
    async fn test_sent_body_matches_built_request() {
        let (url, captured) =
            mock_endpoint(StatusCode::OK, r#"{"choices":[{"message":{"content":"X"}}]}"#).await;
        let client = client_for(&url, Some("k"));

        let request = client.build_request(b"\x89PNG payload");
        client.analyze(&request).await.unwrap();

        let requests = captured.lock().unwrap();
        let sent: AnalysisRequest = serde_json::from_str(&requests[0].body).unwrap();
        assert_eq!(sent, request);
    }

    #[tokio::test]
    async fn test_non_success_status_is_transport_error() {
        let (url, _) =
            mock_endpoint(StatusCode::UNAUTHORIZED, r#"{"error":"invalid api key"}"#).await;
        let client = client_for(&url, Some("bad"));

        let err = client.analyze_image(b"img").await.unwrap_err();
        assert_eq!(err.category(), "transport");
        assert_eq!(err.status_code(), Some(401));
        assert!(err.message().contains("invalid api key"));
        assert!(err
            .to_display_text()
            .starts_with("❌ Error calling Together AI API:"));
    }

    #[tokio::test]
    async fn test_missing_choices_is_response_error() {
        let (url, _) = mock_endpoint(StatusCode::OK, r#"{"id":"abc"}"#).await;
        let client = client_for(&url, Some("k"));

        let err = client.analyze_image(b"img").await.unwrap_err();
        assert!(matches!(err, AnalysisError::Response { .. }));
        assert!(err.message().contains("choices"));
        assert!(err
            .to_display_text()
            .starts_with("❌ Error parsing API response:"));
    }

    #[tokio::test]
    async fn test_empty_choices_is_response_error() {
        let (url, _) = mock_endpoint(StatusCode::OK, r#"{"choices":[]}"#).await;
        let client = client_for(&url, Some("k"));

        let err = client.analyze_image(b"img").await.unwrap_err();
        assert_eq!(
            err,
            AnalysisError::Response {
                message: "choices array is empty".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_non_json_body_is_response_error() {
        let (url, _) = mock_endpoint(StatusCode::OK, "<html>gateway</html>").await;
        let client = client_for(&url, Some("k"));

        let err = client.analyze_image(b"img").await.unwrap_err();
        assert_eq!(err.category(), "response");
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Bind then drop so the port is known to be closed
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(&format!("http://{addr}/v1/chat/completions"), Some("k"));
        let err = client.analyze_image(b"img").await.unwrap_err();
        assert_eq!(err.category(), "transport");
        assert_eq!(err.status_code(), None);
    }

    /// Whether `raw` holds full headers plus `content-length` bytes of body.
    fn request_complete(raw: &[u8]) -> bool {
        let Some(header_end) = raw.windows(4).position(|w| w == b"\r\n\r\n") else {
            return false;
        };
        let headers = String::from_utf8_lossy(&raw[..header_end]).to_lowercase();
        let length = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        raw.len() >= header_end + 4 + length
    }

    #[tokio::test]
    async fn test_truncated_body_is_transport_error() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            // Consume the whole request before answering
            let mut buf = vec![0u8; 64 * 1024];
            let mut received = Vec::new();
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                received.extend_from_slice(&buf[..n]);
                if n == 0 || request_complete(&received) {
                    break;
                }
            }
            socket
                .write_all(
                    b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 200\r\n\r\n{\"choices\":[",
                )
                .await
                .unwrap();
            socket.shutdown().await.unwrap();
        });

        let client = client_for(&format!("http://{addr}/v1/chat/completions"), Some("k"));
        let err = client.analyze_image(b"img").await.unwrap_err();
        assert_eq!(err.category(), "transport");
        assert_eq!(err.status_code(), Some(200));
    }

    #[tokio::test]
    async fn test_invalid_endpoint_is_unexpected_error() {
        let client = client_for("not a url", Some("k"));
        let err = client.analyze_image(b"img").await.unwrap_err();
        assert_eq!(err.category(), "unexpected");
    }

    #[tokio::test]
    async fn test_missing_key_still_sends_request() {
        let (url, captured) =
            mock_endpoint(StatusCode::OK, r#"{"choices":[{"message":{"content":"X"}}]}"#).await;
        let client = client_for(&url, None);
        assert!(!client.has_api_key());

        let analysis = client.analyze_image(b"img").await.unwrap();
        assert_eq!(analysis.text, "X");
        assert_eq!(captured.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_calls_are_independent() {
        let (url, captured) =
            mock_endpoint(StatusCode::OK, r#"{"choices":[{"message":{"content":"X"}}]}"#).await;
        let client = client_for(&url, Some("k"));

        client.analyze_image(b"first").await.unwrap();
        client.analyze_image(b"second").await.unwrap();

        let requests = captured.lock().unwrap();
        let urls: Vec<String> = requests
            .iter()
            .map(|c| {
                let sent: AnalysisRequest = serde_json::from_str(&c.body).unwrap();
                sent.image_data_url().unwrap().to_string()
            })
            .collect();
        assert_eq!(urls[0], "data:image/jpeg;base64,Zmlyc3Q=");
        assert_eq!(urls[1], "data:image/jpeg;base64,c2Vjb25k");
    }

    #[test]
    fn test_parse_non_string_content_is_unexpected() {
        let err = parse_completion(r#"{"choices":[{"message":{"content":[1,2]}}]}"#).unwrap_err();
        assert_eq!(err.category(), "unexpected");
    }

    #[test]
    fn test_parse_null_content_is_response_error() {
        let err = parse_completion(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap_err();
        assert_eq!(err.category(), "response");
    }
}
