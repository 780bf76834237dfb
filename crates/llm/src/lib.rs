//! Model gateway for Janus: a uniform, stateless interface to the
//! external language-model providers.
//!
//! Three providers are supported — OpenAI, Anthropic, and DeepSeek — each
//! behind the same [`LlmClient`] trait. The [`ModelGateway`] owns one
//! client per enabled provider and serves both the chat passthrough and
//! the research handler's query enhancement.
//!
//! Every call is a single request with a bounded timeout; failures
//! surface as `JanusError::Provider` carrying the provider name and
//! cause. Retries, if wanted, belong to callers.

pub mod anthropic;
pub mod client;
pub mod deepseek;
pub mod gateway;
pub mod openai;

pub use anthropic::AnthropicClient;
pub use client::{ChatMessage, LlmClient, LlmRequest, LlmResponse, Role};
pub use deepseek::DeepSeekClient;
pub use gateway::{GatewayConfig, ModelGateway, ProviderId, ProviderSettings};
pub use openai::OpenAiClient;
