use clap::{
    Parser,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use sporldash::{config, server};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Address to bind, e.g. 0.0.0.0:8001 (overrides SERVER_ADDRESS)
    #[clap(long)]
    addr: Option<String>,

    /// Document store URL: mongodb://, memory://, file:///path or a directory (overrides STORE_URL)
    #[clap(long)]
    store_url: Option<String>,

    /// Log filter directive (falls back to RUST_LOG)
    #[clap(long, env = "RUST_LOG", default_value = "sporldash=info,tower_http=info")]
    log: String,
}

#[tokio::main]
async fn main() -> sporldash::Res<()> {
    let loaded = config::load_env();
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&cli.log).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    for path in &loaded {
        tracing::debug!("loaded environment from {}", path.display());
    }

    let lookup = |key: &str| match key {
        "SERVER_ADDRESS" if cli.addr.is_some() => cli.addr.clone(),
        "STORE_URL" if cli.store_url.is_some() => cli.store_url.clone(),
        _ => std::env::var(key).ok(),
    };
    let cfg = match config::Config::from_lookup(lookup) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("cannot load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cfg.client_credentials().is_err() {
        tracing::warn!("Spotify client credentials are incomplete; auth routes will fail");
    }

    server::start_api_server(cfg).await
}
