use anyhow::anyhow;
use clap::{Parser, ValueEnum};
use concierge_api::RestApi;
use concierge_core::{Catalog, EmptyFacetPolicy, Engine, EngineConfig, SeededSampler};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EmptyFacets {
    /// Requests without facets select the whole catalog
    SelectAll,
    /// Requests without facets get a random sample
    Sample,
}

impl From<EmptyFacets> for EmptyFacetPolicy {
    fn from(value: EmptyFacets) -> Self {
        match value {
            EmptyFacets::SelectAll => EmptyFacetPolicy::SelectAll,
            EmptyFacets::Sample => EmptyFacetPolicy::Sample,
        }
    }
}

/// Webhook backend for the travel voice agent
#[derive(Parser, Debug)]
#[command(name = "concierge")]
#[command(about = "Keyword matching webhook over an in-memory property catalog", long_about = None)]
struct Args {
    /// JSON array of travel stories to build the catalog from
    #[arg(short, long, default_value = "data/hafh_stories.json")]
    data_file: PathBuf,

    /// Address to bind the HTTP server to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// HTTP API port
    #[arg(long, default_value_t = 5001)]
    http_port: u16,

    /// Log level (RUST_LOG takes precedence)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Seed the sampler for reproducible fallback and gallery picks
    #[arg(long)]
    seed: Option<u64>,

    /// What a request without any facets selects
    #[arg(long, value_enum, default_value_t = EmptyFacets::SelectAll)]
    empty_facets: EmptyFacets,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string().to_lowercase()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow!("failed to install logger: {}", e))?;

    info!("Starting concierge v{}", env!("CARGO_PKG_VERSION"));
    info!("Data file: {:?}", args.data_file);
    info!("HTTP API: {}:{}", args.host, args.http_port);

    let catalog = Arc::new(Catalog::load_or_builtin(&args.data_file));
    info!("Serving {} properties from {}", catalog.len(), catalog.origin());

    let config = EngineConfig {
        empty_facets: args.empty_facets.into(),
        ..EngineConfig::default()
    };
    let mut engine = Engine::new(catalog).with_config(config);
    if let Some(seed) = args.seed {
        info!("Sampling with fixed seed {}", seed);
        engine = engine.with_sampler(Arc::new(SeededSampler::new(seed)));
    }
    let engine = Arc::new(engine);

    let host = args.host.clone();
    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(engine, &host, http_port).await {
                tracing::error!("HTTP server error: {}", e);
            }
        })
    });

    info!("Concierge started on http://localhost:{}/", args.http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}
