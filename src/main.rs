use std::sync::Arc;

use scam_pot::agent::ChatService;
use scam_pot::config::{HoneypotConfig, StoreBackend};
use scam_pot::metrics::LogMetricsSink;
use scam_pot::persona::ReplyGenerator;
use scam_pot::server::routes;
use scam_pot::store::{InMemorySessionStore, JsonFileSessionStore, SessionStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = HoneypotConfig::from_env()?;

    eprintln!("🍯 scam-pot v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Chat API: http://{}/chat", config.bind_addr());

    let store: Arc<dyn SessionStore> = match &config.store {
        StoreBackend::Memory => {
            eprintln!("   Sessions: in-memory");
            Arc::new(InMemorySessionStore::new())
        }
        StoreBackend::File(path) => {
            eprintln!("   Sessions: {}", path.display());
            Arc::new(JsonFileSessionStore::new(path))
        }
    };

    let replies = match config.reply_seed {
        Some(seed) => {
            eprintln!("   Reply seed: {seed}");
            ReplyGenerator::seeded(seed)
        }
        None => ReplyGenerator::from_entropy(),
    };

    let chat = Arc::new(ChatService::new(store, replies, Arc::new(LogMetricsSink)));
    let app = routes(chat);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(addr = %config.bind_addr(), "Honeypot listening");
    axum::serve(listener, app).await?;

    Ok(())
}
