//! HTTP implementation of the chat backend gateway.
//!
//! Speaks the backend's JSON contract:
//! - `POST {base}/api/chat` with `{"query": ..., "sessionId": ... | null}`
//! - `GET {base}/api/history/{sessionId}`
//! - `POST {base}/api/clear/{sessionId}`

use std::time::Duration;

use async_trait::async_trait;
use newschat_core::conversation::Message;
use newschat_core::error::{ChatError, Result};
use newschat_core::gateway::{BackendReply, ChatBackend};
use reqwest::Client;
use serde::{Deserialize, Serialize};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatRequest<'a> {
    query: &'a str,
    session_id: Option<&'a str>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChatResponse {
    answer: String,
    session_id: String,
}

#[derive(Deserialize)]
struct HistoryResponse {
    messages: Vec<Message>,
}

/// HTTP gateway to the conversational backend.
///
/// One request per operation, no client-side retry. Every failure (connect,
/// timeout, non-success status, undecodable body) maps to the same transport
/// error so callers need no finer-grained handling. The request timeout
/// bounds how long any call can stay outstanding.
pub struct HttpChatBackend {
    client: Client,
    base_url: String,
}

impl HttpChatBackend {
    /// Creates a backend for the given base URL with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Creates a backend with an explicit request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|err| {
            ChatError::transport(format!("failed to build HTTP client: {}", err))
        })?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn send_message(&self, query: &str, session_id: Option<&str>) -> Result<BackendReply> {
        let request = ChatRequest { query, session_id };

        let response = self
            .client
            .post(self.endpoint("/api/chat"))
            .json(&request)
            .send()
            .await
            .map_err(request_error)?;

        let response = check_status(response)?;
        let reply: ChatResponse = response.json().await.map_err(decode_error)?;

        Ok(BackendReply {
            answer: reply.answer,
            session_id: reply.session_id,
        })
    }

    async fn fetch_history(&self, session_id: &str) -> Result<Vec<Message>> {
        let response = self
            .client
            .get(self.endpoint(&format!("/api/history/{}", session_id)))
            .send()
            .await
            .map_err(request_error)?;

        let response = check_status(response)?;
        let history: HistoryResponse = response.json().await.map_err(decode_error)?;

        Ok(history.messages)
    }

    async fn reset_session(&self, session_id: &str) -> Result<()> {
        let response = self
            .client
            .post(self.endpoint(&format!("/api/clear/{}", session_id)))
            .send()
            .await
            .map_err(request_error)?;

        check_status(response)?;
        Ok(())
    }
}

fn request_error(err: reqwest::Error) -> ChatError {
    ChatError::transport(format!("request failed: {}", err))
}

fn decode_error(err: reqwest::Error) -> ChatError {
    ChatError::transport(format!("failed to decode response body: {}", err))
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ChatError::transport_status(
            status.as_u16(),
            format!("backend returned {}", status),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newschat_core::conversation::Sender;

    #[test]
    fn chat_request_serializes_camel_case_session_id() {
        let request = ChatRequest {
            query: "weather today",
            session_id: Some("abc123"),
        };
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["query"], "weather today");
        assert_eq!(value["sessionId"], "abc123");
    }

    #[test]
    fn chat_request_serializes_missing_session_as_null() {
        let request = ChatRequest {
            query: "hi",
            session_id: None,
        };
        let value = serde_json::to_value(&request).unwrap();

        assert!(value["sessionId"].is_null());
    }

    #[test]
    fn chat_response_deserializes() {
        let reply: ChatResponse =
            serde_json::from_str(r#"{"answer":"It is sunny.","sessionId":"sess-9"}"#).unwrap();

        assert_eq!(reply.answer, "It is sunny.");
        assert_eq!(reply.session_id, "sess-9");
    }

    #[test]
    fn history_response_maps_to_domain_messages() {
        let history: HistoryResponse = serde_json::from_str(
            r#"{"messages":[{"id":"1","sender":"bot","text":"hi","timestamp":"10:00:00"}]}"#,
        )
        .unwrap();

        assert_eq!(history.messages.len(), 1);
        assert_eq!(history.messages[0].sender, Sender::Bot);
        assert_eq!(history.messages[0].text, "hi");
    }

    #[test]
    fn empty_history_deserializes_to_empty_log() {
        let history: HistoryResponse = serde_json::from_str(r#"{"messages":[]}"#).unwrap();

        assert!(history.messages.is_empty());
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let backend = HttpChatBackend::new("http://localhost:3001/").unwrap();

        assert_eq!(
            backend.endpoint("/api/chat"),
            "http://localhost:3001/api/chat"
        );
        assert_eq!(
            backend.endpoint("/api/history/abc123"),
            "http://localhost:3001/api/history/abc123"
        );
    }
}
