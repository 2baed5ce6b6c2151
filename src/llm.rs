use crate::config::RemoteConfig;
use crate::error::RemoteError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, ORIGIN, REFERER};
use serde::Serialize;
use serde_json::Value;
use tokio::time::Duration;

/// Anything that can turn one user message into one reply text
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn ask(&self, content: &str) -> Result<String, RemoteError>;
}

/// Request body expected by the remote service
#[derive(Debug, Clone, Serialize)]
pub struct LlmRequest<'a> {
    pub content: &'a str,
}

/// HTTP client for the hosted language-model endpoint
#[derive(Clone)]
pub struct LlmClient {
    config: RemoteConfig,
    client: reqwest::Client,
}

impl LlmClient {
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self { config, client })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}

#[async_trait]
impl ChatBackend for LlmClient {
    async fn ask(&self, content: &str) -> Result<String, RemoteError> {
        tracing::debug!(endpoint = %self.config.endpoint, chars = content.chars().count(), "sending message");

        let response = self
            .client
            .post(&self.config.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "*/*")
            .header(ORIGIN, &self.config.origin)
            .header(REFERER, &self.config.referer)
            .header("sec-fetch-site", "same-origin")
            .header("sec-fetch-mode", "cors")
            .header("sec-fetch-dest", "empty")
            .header(ACCEPT_LANGUAGE, &self.config.accept_language)
            .json(&LlmRequest { content })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status));
        }

        let body = response.text().await?;
        parse_reply(&body)
    }
}

/// Extract the reply text from a success body: `{ "status": <truthy>, "data": "<text>" }`
pub fn parse_reply(body: &str) -> Result<String, RemoteError> {
    let payload: Value = serde_json::from_str(body)
        .map_err(|e| RemoteError::MalformedPayload(format!("invalid JSON: {}", e)))?;

    let status_ok = payload.get("status").map(is_truthy).unwrap_or(false);
    if !status_ok {
        return Err(RemoteError::MalformedPayload("status is missing or false".to_string()));
    }

    match payload.get("data").and_then(|d| d.as_str()) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(RemoteError::MalformedPayload("data is missing or not a string".to_string())),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reply_success() {
        let reply = parse_reply(r#"{"status": true, "data": "Jakarta."}"#).unwrap();
        assert_eq!(reply, "Jakarta.");
    }

    #[test]
    fn test_parse_reply_accepts_truthy_status() {
        assert!(parse_reply(r#"{"status": 200, "data": "ok"}"#).is_ok());
        assert!(parse_reply(r#"{"status": "success", "data": "ok"}"#).is_ok());
    }

    #[test]
    fn test_parse_reply_rejects_false_status() {
        let err = parse_reply(r#"{"status": false, "data": "ok"}"#).unwrap_err();
        assert_eq!(err.kind(), "payload");
    }

    #[test]
    fn test_parse_reply_rejects_missing_data() {
        assert!(parse_reply(r#"{"status": true}"#).is_err());
        assert!(parse_reply(r#"{"status": true, "data": ""}"#).is_err());
        assert!(parse_reply(r#"{"status": true, "data": {"text": "x"}}"#).is_err());
    }

    #[test]
    fn test_parse_reply_rejects_non_json() {
        let err = parse_reply("<html>502</html>").unwrap_err();
        assert!(matches!(err, RemoteError::MalformedPayload(_)));
    }
}
