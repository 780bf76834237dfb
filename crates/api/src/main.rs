//! Janus API server binary.
//!
//! Usage:
//!   janus-api --config config.toml
//!   janus-api --port 8080
//!   janus-api --port 8080 --bind 0.0.0.0
//!
//! # Environment Variables
//!
//! - `JANUS_BIND_ADDR` - Server bind address (default: 127.0.0.1)
//! - `JANUS_STORE_PATH` - Record store location override
//! - `OPENAI_API_KEY` / `ANTHROPIC_API_KEY` / `DEEPSEEK_API_KEY` -
//!   provider credentials (config file values take precedence)

use janus_api::{serve, AppState};
use janus_classifier::EmbeddingClassifier;
use janus_dispatcher::{Dispatcher, ServiceConfig};
use janus_handlers::{CodingHandler, HttpSearchProvider, ResearchHandler};
use janus_llm::ModelGateway;
use janus_store::RecordStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let mut port: u16 = 8080;
    let mut config_path: Option<String> = None;
    let mut bind_addr: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--port" | "-p" => {
                if i + 1 < args.len() {
                    port = args[i + 1].parse().expect("Invalid port number");
                    i += 1;
                }
            }
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--bind" | "-b" => {
                if i + 1 < args.len() {
                    bind_addr = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Janus API Server");
                println!();
                println!("Usage: janus-api [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -p, --port <PORT>     Port to listen on (default: 8080)");
                println!("  -b, --bind <ADDR>     Bind address (default: 127.0.0.1, env: JANUS_BIND_ADDR)");
                println!("  -c, --config <FILE>   Path to config.toml file");
                println!("  -h, --help            Show this help message");
                println!();
                println!("Environment variables:");
                println!("  JANUS_BIND_ADDR       Server bind address (overridden by --bind flag)");
                println!("  JANUS_STORE_PATH      Record store location override");
                println!("  OPENAI_API_KEY        OpenAI credential");
                println!("  ANTHROPIC_API_KEY     Anthropic credential");
                println!("  DEEPSEEK_API_KEY      DeepSeek credential");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    // Load configuration before logging so the filter directive applies.
    let config = if let Some(path) = config_path {
        ServiceConfig::from_file(&path)?
    } else {
        ServiceConfig::default()
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let host = bind_addr
        .or_else(|| std::env::var("JANUS_BIND_ADDR").ok())
        .unwrap_or_else(|| "127.0.0.1".to_string());

    if host == "0.0.0.0" {
        tracing::warn!(
            "Server binding to 0.0.0.0 — this exposes the API to all network interfaces."
        );
    }

    // One-time classifier initialization; the first run downloads the
    // model into the cache directory and can take a while.
    tracing::info!("Initializing classifier (first run downloads the model)");
    let classifier = Arc::new(EmbeddingClassifier::new(&config.classifier)?);

    let gateway = Arc::new(ModelGateway::from_config(&config.gateway)?);
    let store = Arc::new(RecordStore::new(&config.store_path));

    let coding = Arc::new(CodingHandler::new());
    let research = Arc::new(ResearchHandler::new(
        gateway.clone(),
        Arc::new(HttpSearchProvider::new()?),
    ));

    let dispatcher = Arc::new(Dispatcher::new(classifier, coding, research, store));
    let state = Arc::new(AppState::new(dispatcher, gateway));

    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    serve(state, addr).await?;

    Ok(())
}
