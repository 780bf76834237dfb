use async_trait::async_trait;
use janus_common::{JanusError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::client::{LlmClient, LlmRequest, LlmResponse, Role};

const PROVIDER: &str = "deepseek";
const DEFAULT_BASE_URL: &str = "https://api.deepseek.com";
const DEFAULT_MODEL: &str = "deepseek-chat";
const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

// DeepSeek exposes an OpenAI-compatible chat-completions API.

#[derive(Serialize)]
struct DeepSeekRequest {
    model: String,
    messages: Vec<DeepSeekMessage>,
    stream: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct DeepSeekMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct DeepSeekResponse {
    choices: Vec<DeepSeekChoice>,
    model: String,
}

#[derive(Deserialize)]
struct DeepSeekChoice {
    message: DeepSeekMessage,
    finish_reason: Option<String>,
}

pub struct DeepSeekClient {
    base_url: String,
    model: String,
    api_key: String,
    http_client: reqwest::Client,
}

impl DeepSeekClient {
    pub fn new(
        base_url: Option<String>,
        model: Option<String>,
        api_key: String,
        timeout: Duration,
    ) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| JanusError::Config(format!("build deepseek http client: {e}")))?;

        Ok(Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_key,
            http_client,
        })
    }

    fn role_to_string(role: &Role) -> &'static str {
        match role {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    fn build_body(&self, request: &LlmRequest) -> DeepSeekRequest {
        let mut messages = vec![DeepSeekMessage {
            role: "system".to_string(),
            content: request
                .system_prompt
                .clone()
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
        }];
        for msg in &request.messages {
            messages.push(DeepSeekMessage {
                role: Self::role_to_string(&msg.role).to_string(),
                content: msg.content.clone(),
            });
        }
        DeepSeekRequest {
            model: self.model.clone(),
            messages,
            stream: false,
        }
    }

    fn provider_error(cause: impl std::fmt::Display) -> JanusError {
        JanusError::Provider {
            provider: PROVIDER.to_string(),
            cause: cause.to_string(),
        }
    }
}

#[async_trait]
impl LlmClient for DeepSeekClient {
    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = self.build_body(&request);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| Self::provider_error(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(Self::provider_error(format!("API error {status}: {body_text}")));
        }

        let parsed: DeepSeekResponse = response
            .json()
            .await
            .map_err(|e| Self::provider_error(format!("unparseable response: {e}")))?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Self::provider_error("no choices in response"))?;

        Ok(LlmResponse {
            content: choice.message.content,
            model: parsed.model,
            finish_reason: choice.finish_reason,
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> DeepSeekClient {
        DeepSeekClient::new(None, None, "sk-test".into(), Duration::from_secs(30)).unwrap()
    }

    #[test]
    fn defaults_are_deepseek_chat() {
        let client = client();
        assert_eq!(client.base_url, "https://api.deepseek.com");
        assert_eq!(client.model_name(), "deepseek-chat");
    }

    #[test]
    fn fixed_system_message_is_prepended() {
        let json =
            serde_json::to_value(client().build_body(&LlmRequest::from_prompt("Hello"))).unwrap();
        let messages = json["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[0]["content"], "You are a helpful assistant.");
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(json["stream"], false);
    }

    #[test]
    fn explicit_system_prompt_wins() {
        let request = LlmRequest {
            system_prompt: Some("Answer in French.".to_string()),
            ..LlmRequest::from_prompt("Hello")
        };
        let json = serde_json::to_value(client().build_body(&request)).unwrap();
        assert_eq!(json["messages"][0]["content"], "Answer in French.");
    }
}
