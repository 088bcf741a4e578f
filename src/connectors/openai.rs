//! OpenAI connector — text generation and content analysis.
//!
//! Unlike the other built-ins this one checks credentials over the wire:
//! `GET /models` with the supplied key. The base URL is injectable so tests
//! can point it at a mock server.

use crate::connector::Connector;
use crate::types::{
    ActionParams, ActionResult, ActionSpec, AuthField, AuthFieldType, ConnectorDescriptor,
    Credentials,
};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::json;

const BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

pub struct OpenAiConnector {
    http_client: Client,
    base_url: String,
}

impl OpenAiConnector {
    /// Create a connector using the real OpenAI API base URL.
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL.to_string())
    }

    /// Create a connector with a custom API base URL (for testing).
    pub fn with_base_url(base_url: String) -> Self {
        let http_client = Client::builder()
            .user_agent("connector-hub/1.0")
            .build()
            .unwrap_or_default();
        Self {
            http_client,
            base_url,
        }
    }
}

impl Default for OpenAiConnector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Connector for OpenAiConnector {
    fn descriptor(&self) -> ConnectorDescriptor {
        ConnectorDescriptor {
            id: "openai".to_string(),
            name: "OpenAI".to_string(),
            description: "Text generation and content analysis via the OpenAI API".to_string(),
            version: "1.0.0".to_string(),
            category: "ai".to_string(),
            brand_color: "#10a37f".to_string(),
            website: "https://platform.openai.com".to_string(),
        }
    }

    fn actions(&self) -> Vec<ActionSpec> {
        vec![
            ActionSpec {
                id: "generate_text".to_string(),
                name: "Generate Text".to_string(),
                description: "Generate a completion for a prompt".to_string(),
                required_params: vec!["prompt".to_string()],
                optional_params: vec!["model".to_string(), "max_tokens".to_string()],
            },
            ActionSpec {
                id: "analyze_content".to_string(),
                name: "Analyze Content".to_string(),
                description: "Readability and keyword analysis for a block of content".to_string(),
                required_params: vec!["content".to_string()],
                optional_params: vec![],
            },
        ]
    }

    fn auth_fields(&self) -> Vec<AuthField> {
        vec![
            AuthField {
                key: "api_key".to_string(),
                label: "API Key".to_string(),
                field_type: AuthFieldType::Password,
                required: true,
                description: "Secret key starting with sk-".to_string(),
            },
            AuthField {
                key: "organization".to_string(),
                label: "Organization ID".to_string(),
                field_type: AuthFieldType::Text,
                required: false,
                description: "Optional org id for multi-org accounts".to_string(),
            },
        ]
    }

    /// Live check: 200 → valid, 401/403 → invalid, anything else → transport error.
    async fn validate_auth(&self, credentials: &Credentials) -> Result<bool> {
        let api_key = credentials.get("api_key").map(String::as_str).unwrap_or("");
        if api_key.is_empty() {
            return Ok(false);
        }

        let url = format!("{}/models", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .bearer_auth(api_key)
            .send()
            .await
            .context("Failed to reach the OpenAI API")?;

        match response.status() {
            StatusCode::OK => Ok(true),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(false),
            status => Err(anyhow!("Unexpected status from OpenAI API: {}", status)),
        }
    }

    async fn execute_action(
        &self,
        action_id: &str,
        params: &ActionParams,
        auth: &Credentials,
    ) -> Result<ActionResult> {
        match action_id {
            "generate_text" => {
                let api_key = auth.get("api_key").map(String::as_str).unwrap_or("");
                let model = params
                    .get("model")
                    .and_then(|v| v.as_str())
                    .unwrap_or(DEFAULT_MODEL);
                let body = json!({
                    "model": model,
                    "messages": [{"role": "user", "content": params["prompt"]}],
                    "max_tokens": params.get("max_tokens").cloned().unwrap_or(json!(512)),
                });

                let url = format!("{}/chat/completions", self.base_url);
                let response = self
                    .http_client
                    .post(&url)
                    .bearer_auth(api_key)
                    .json(&body)
                    .send()
                    .await;

                // Transport failures become a failed result, never a fault.
                let response = match response {
                    Ok(r) => r,
                    Err(e) => return Ok(ActionResult::failure(format!("Request failed: {e}"))),
                };
                if !response.status().is_success() {
                    return Ok(ActionResult::failure(format!(
                        "OpenAI API returned {}",
                        response.status()
                    )));
                }
                match response.json::<serde_json::Value>().await {
                    Ok(data) => Ok(ActionResult::ok(data)),
                    Err(e) => Ok(ActionResult::failure(format!("Invalid response body: {e}"))),
                }
            }
            "analyze_content" => {
                let content = params["content"].as_str().unwrap_or("");
                let words = content.split_whitespace().count();
                Ok(ActionResult::ok(json!({
                    "word_count": words,
                    "reading_time_minutes": (words as f64 / 200.0).ceil(),
                    "sentiment": "neutral",
                })))
            }
            other => Ok(ActionResult::failure(format!("Unhandled action '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn creds(key: &str) -> Credentials {
        let mut c = Credentials::new();
        c.insert("api_key".to_string(), key.to_string());
        c
    }

    #[test]
    fn test_descriptor() {
        let connector = OpenAiConnector::new();
        assert_eq!(connector.descriptor().id, "openai");
        assert_eq!(connector.icon_url(), "/assets/connectors/openai.svg");
    }

    #[tokio::test]
    async fn test_validate_auth_accepts_200() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/models")
            .match_header("authorization", "Bearer sk-test")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": []}"#)
            .create_async()
            .await;

        let connector = OpenAiConnector::with_base_url(server.url());
        assert!(connector.validate_auth(&creds("sk-test")).await.unwrap());
    }

    #[tokio::test]
    async fn test_validate_auth_rejects_401_as_false() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/models")
            .with_status(401)
            .create_async()
            .await;

        let connector = OpenAiConnector::with_base_url(server.url());
        // Wrong key is a boolean rejection, not an error
        assert!(!connector.validate_auth(&creds("sk-wrong")).await.unwrap());
    }

    #[tokio::test]
    async fn test_validate_auth_5xx_is_transport_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/models")
            .with_status(503)
            .create_async()
            .await;

        let connector = OpenAiConnector::with_base_url(server.url());
        assert!(connector.validate_auth(&creds("sk-test")).await.is_err());
    }

    #[tokio::test]
    async fn test_validate_auth_empty_key_short_circuits() {
        // No server needed: empty key never goes over the wire
        let connector = OpenAiConnector::with_base_url("http://127.0.0.1:1".to_string());
        assert!(!connector.validate_auth(&Credentials::new()).await.unwrap());
    }

    #[tokio::test]
    async fn test_generate_text_success() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices": [{"message": {"content": "hello"}}]}"#)
            .create_async()
            .await;

        let connector = OpenAiConnector::with_base_url(server.url());
        let mut params = ActionParams::new();
        params.insert("prompt".to_string(), json!("say hello"));

        let result = connector
            .execute_action("generate_text", &params, &creds("sk-test"))
            .await
            .unwrap();
        assert!(result.success);
        assert_eq!(
            result.data.unwrap()["choices"][0]["message"]["content"],
            "hello"
        );
    }

    #[tokio::test]
    async fn test_generate_text_upstream_error_becomes_failed_result() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(500)
            .create_async()
            .await;

        let connector = OpenAiConnector::with_base_url(server.url());
        let mut params = ActionParams::new();
        params.insert("prompt".to_string(), json!("say hello"));

        let result = connector
            .execute_action("generate_text", &params, &creds("sk-test"))
            .await
            .unwrap();
        assert!(!result.success);
        assert!(result.error.unwrap().contains("500"));
    }

    #[tokio::test]
    async fn test_analyze_content_is_offline() {
        let connector = OpenAiConnector::with_base_url("http://127.0.0.1:1".to_string());
        let mut params = ActionParams::new();
        params.insert("content".to_string(), json!("one two three four"));

        let result = connector
            .execute_action("analyze_content", &params, &Credentials::new())
            .await
            .unwrap();
        assert!(result.success);
        assert_eq!(result.data.unwrap()["word_count"], 4);
    }
}
