//! The model gateway: a fixed set of configured providers behind one
//! stateless request/response surface.
//!
//! Providers are fixed at configuration time; at least one must be
//! enabled for the service to consider itself operational. Each call is a
//! single bounded-timeout request — no retries live here.

use crate::anthropic::AnthropicClient;
use crate::client::{LlmClient, LlmRequest};
use crate::deepseek::DeepSeekClient;
use crate::openai::OpenAiClient;
use janus_common::{JanusError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{info, warn};

/// The closed set of supported providers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    OpenAi,
    Anthropic,
    DeepSeek,
}

impl ProviderId {
    pub const ALL: [ProviderId; 3] = [
        ProviderId::OpenAi,
        ProviderId::Anthropic,
        ProviderId::DeepSeek,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenAi => "openai",
            ProviderId::Anthropic => "anthropic",
            ProviderId::DeepSeek => "deepseek",
        }
    }

    /// Parse a provider name as it appears in config sections and URL
    /// paths.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "openai" => Some(ProviderId::OpenAi),
            "anthropic" => Some(ProviderId::Anthropic),
            "deepseek" => Some(ProviderId::DeepSeek),
            _ => None,
        }
    }

    fn env_key(&self) -> &'static str {
        match self {
            ProviderId::OpenAi => "OPENAI_API_KEY",
            ProviderId::Anthropic => "ANTHROPIC_API_KEY",
            ProviderId::DeepSeek => "DEEPSEEK_API_KEY",
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_timeout_ms() -> u64 {
    30_000
}

/// Per-provider settings. Presence of a section in the config enables the
/// provider, as long as a credential resolves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// If not set, the provider's environment variable is consulted
    /// (OPENAI_API_KEY / ANTHROPIC_API_KEY / DEEPSEEK_API_KEY).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            model: None,
            api_url: None,
            api_key: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl ProviderSettings {
    /// Resolve the credential: explicit config first, environment second.
    pub fn resolve_api_key(&self, provider: ProviderId) -> Option<String> {
        if let Some(ref key) = self.api_key {
            if !key.is_empty() {
                return Some(key.clone());
            }
        }
        std::env::var(provider.env_key()).ok().filter(|k| !k.is_empty())
    }
}

/// Gateway configuration: one optional section per provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai: Option<ProviderSettings>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anthropic: Option<ProviderSettings>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deepseek: Option<ProviderSettings>,
}

impl GatewayConfig {
    fn settings(&self, provider: ProviderId) -> Option<&ProviderSettings> {
        match provider {
            ProviderId::OpenAi => self.openai.as_ref(),
            ProviderId::Anthropic => self.anthropic.as_ref(),
            ProviderId::DeepSeek => self.deepseek.as_ref(),
        }
    }
}

/// Stateless wrapper around the enabled providers.
pub struct ModelGateway {
    clients: HashMap<ProviderId, Box<dyn LlmClient>>,
}

impl std::fmt::Debug for ModelGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelGateway")
            .field("providers", &self.providers())
            .finish()
    }
}

impl ModelGateway {
    /// Build clients for every configured provider with a resolvable
    /// credential. Fails when none qualifies: the service is not
    /// operational without at least one provider.
    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        let mut clients: HashMap<ProviderId, Box<dyn LlmClient>> = HashMap::new();

        for provider in ProviderId::ALL {
            let Some(settings) = config.settings(provider) else {
                continue;
            };
            let Some(api_key) = settings.resolve_api_key(provider) else {
                warn!(provider = %provider, "Provider configured but no credential resolved, skipping");
                continue;
            };
            let timeout = Duration::from_millis(settings.timeout_ms);
            let client: Box<dyn LlmClient> = match provider {
                ProviderId::OpenAi => Box::new(OpenAiClient::new(
                    settings.api_url.clone(),
                    settings.model.clone(),
                    api_key,
                    timeout,
                )?),
                ProviderId::Anthropic => Box::new(AnthropicClient::new(
                    settings.api_url.clone(),
                    settings.model.clone(),
                    api_key,
                    timeout,
                )?),
                ProviderId::DeepSeek => Box::new(DeepSeekClient::new(
                    settings.api_url.clone(),
                    settings.model.clone(),
                    api_key,
                    timeout,
                )?),
            };
            info!(provider = %provider, model = %client.model_name(), "Model provider enabled");
            clients.insert(provider, client);
        }

        if clients.is_empty() {
            return Err(JanusError::Config(
                "at least one model provider must be configured".into(),
            ));
        }

        Ok(Self { clients })
    }

    /// Assemble a gateway from prebuilt clients. Used by tests to inject
    /// deterministic providers.
    pub fn from_clients(clients: HashMap<ProviderId, Box<dyn LlmClient>>) -> Self {
        Self { clients }
    }

    pub fn is_enabled(&self, provider: ProviderId) -> bool {
        self.clients.contains_key(&provider)
    }

    /// Enabled providers in stable order.
    pub fn providers(&self) -> Vec<ProviderId> {
        let mut providers: Vec<ProviderId> = self.clients.keys().copied().collect();
        providers.sort();
        providers
    }

    /// One bounded-timeout completion against the named provider.
    ///
    /// A provider that is not enabled yields a
    /// [`JanusError::Provider`] with cause `"not configured"`.
    pub async fn complete(&self, provider: ProviderId, prompt: &str) -> Result<String> {
        let client = self.clients.get(&provider).ok_or_else(|| JanusError::Provider {
            provider: provider.to_string(),
            cause: "not configured".into(),
        })?;

        let response = client.complete(LlmRequest::from_prompt(prompt)).await?;
        Ok(response.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::LlmResponse;
    use async_trait::async_trait;

    const TOML_CONFIG: &str = r#"
[openai]
api_key = "sk-test"
model = "gpt-4o-mini"
timeout_ms = 10000

[deepseek]
api_key = "sk-ds-test"
"#;

    #[test]
    fn deserialize_config_from_toml() {
        let config: GatewayConfig = toml::from_str(TOML_CONFIG).unwrap();
        let openai = config.openai.as_ref().unwrap();
        assert_eq!(openai.model.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(openai.timeout_ms, 10_000);

        let deepseek = config.deepseek.as_ref().unwrap();
        assert_eq!(deepseek.timeout_ms, 30_000);
        assert!(config.anthropic.is_none());
    }

    #[test]
    fn gateway_enables_configured_providers() {
        let config: GatewayConfig = toml::from_str(TOML_CONFIG).unwrap();
        let gateway = ModelGateway::from_config(&config).unwrap();

        assert!(gateway.is_enabled(ProviderId::OpenAi));
        assert!(gateway.is_enabled(ProviderId::DeepSeek));
        assert!(!gateway.is_enabled(ProviderId::Anthropic));
        assert_eq!(
            gateway.providers(),
            vec![ProviderId::OpenAi, ProviderId::DeepSeek]
        );
    }

    #[test]
    fn empty_config_is_not_operational() {
        let err = ModelGateway::from_config(&GatewayConfig::default()).unwrap_err();
        assert!(matches!(err, JanusError::Config(_)));
    }

    #[test]
    fn provider_id_parse_roundtrip() {
        for provider in ProviderId::ALL {
            assert_eq!(ProviderId::parse(provider.as_str()), Some(provider));
        }
        assert_eq!(ProviderId::parse("gemini"), None);
        assert_eq!(ProviderId::parse(""), None);
    }

    struct CannedClient(&'static str);

    #[async_trait]
    impl LlmClient for CannedClient {
        async fn complete(&self, _request: LlmRequest) -> Result<LlmResponse> {
            Ok(LlmResponse {
                content: self.0.to_string(),
                model: "canned".to_string(),
                finish_reason: None,
            })
        }
        fn model_name(&self) -> &str {
            "canned"
        }
    }

    #[tokio::test]
    async fn complete_routes_to_named_provider() {
        let mut clients: HashMap<ProviderId, Box<dyn LlmClient>> = HashMap::new();
        clients.insert(ProviderId::OpenAi, Box::new(CannedClient("from openai")));
        let gateway = ModelGateway::from_clients(clients);

        let text = gateway.complete(ProviderId::OpenAi, "hi").await.unwrap();
        assert_eq!(text, "from openai");
    }

    #[tokio::test]
    async fn unconfigured_provider_is_a_provider_error() {
        let gateway = ModelGateway::from_clients(HashMap::new());
        let err = gateway.complete(ProviderId::Anthropic, "hi").await.unwrap_err();
        match err {
            JanusError::Provider { provider, cause } => {
                assert_eq!(provider, "anthropic");
                assert_eq!(cause, "not configured");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
