use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Production assistant endpoint. Override with `api_url` in the config file.
pub const DEFAULT_API_URL: &str = "https://nido-assistant.nido-app.workers.dev";

#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    reply: String,
}

/// Client for the hosted assistant. Cheap to clone; reqwest pools
/// connections behind an Arc.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    url: String,
}

impl ApiClient {
    pub fn new(url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        }
    }

    /// Sends one user message and returns the assistant's reply text.
    pub async fn reply(&self, message: &str) -> Result<String> {
        let request = ChatRequest { message };

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Assistant API error {}: {}", status, error_text);
        }

        let chat_response: ChatResponse = response.json().await?;
        Ok(chat_response.reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_shape() {
        let request = ChatRequest {
            message: "My toddler keeps biting",
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"message": "My toddler keeps biting"})
        );
    }

    #[test]
    fn test_response_reply_field() {
        let response: ChatResponse =
            serde_json::from_str(r#"{"reply": "Biting is common at this age."}"#).unwrap();
        assert_eq!(response.reply, "Biting is common at this age.");
    }

    #[test]
    fn test_response_ignores_extra_fields() {
        let response: ChatResponse =
            serde_json::from_str(r#"{"reply": "ok", "model": "nido-1", "tokens": 42}"#).unwrap();
        assert_eq!(response.reply, "ok");
    }

    #[test]
    fn test_default_url_when_not_configured() {
        let client = ApiClient::new(None);
        assert_eq!(client.url, DEFAULT_API_URL);
    }

    #[test]
    fn test_configured_url_wins() {
        let client = ApiClient::new(Some("http://localhost:8787".to_string()));
        assert_eq!(client.url, "http://localhost:8787");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_an_error() {
        let client = ApiClient::new(Some("http://127.0.0.1:9".to_string()));
        assert!(client.reply("hello").await.is_err());
    }
}
