use anyhow::Context;
use bookrec_api::RestApi;
use bookrec_core::{Distance, MissPolicy, Recommender, RecommenderConfig, DEFAULT_SEARCH_BASE};
use bookrec_storage::ArtifactStore;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Book recommendations from a precomputed nearest-neighbor model
#[derive(Parser, Debug)]
#[command(name = "bookrec")]
#[command(about = "Serve book recommendations from precomputed artifacts", long_about = None)]
struct Args {
    /// Directory holding the model, book names, ratings and pivot artifacts
    #[arg(short, long, default_value = "./artifacts")]
    artifacts_dir: PathBuf,

    /// Address to bind the HTTP server to
    #[arg(long, default_value = "0.0.0.0")]
    bind: String,

    /// HTTP port
    #[arg(long, default_value_t = 8501)]
    http_port: u16,

    /// Neighbors fetched per lookup, the selected title included
    #[arg(long, default_value_t = 6)]
    neighbors: usize,

    /// Recommendation cards shown per request
    #[arg(long, default_value_t = 5)]
    display_count: usize,

    /// Search page the poster links point to
    #[arg(long, default_value = DEFAULT_SEARCH_BASE)]
    search_base: String,

    /// What to do with a recommended title that has no ratings entry: skip, placeholder or fail
    #[arg(long, default_value = "skip")]
    on_missing: MissPolicy,

    /// Poster URL used by the placeholder policy
    #[arg(long, default_value = "")]
    placeholder_poster: String,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
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

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting bookrec v{}", env!("CARGO_PKG_VERSION"));
    info!("Artifacts directory: {:?}", args.artifacts_dir);

    let config = RecommenderConfig {
        neighbors: args.neighbors,
        display_count: args.display_count,
        search_base: args.search_base,
        on_missing: args.on_missing,
        placeholder_poster: args.placeholder_poster,
    };

    let artifacts = ArtifactStore::new(&args.artifacts_dir)
        .load()
        .with_context(|| format!("loading artifacts from {:?}", args.artifacts_dir))?;
    let metric: Distance = artifacts.index.metric();
    let recommender = Arc::new(Recommender::new(artifacts, config).context("building recommender")?);
    info!(
        titles = recommender.titles().len(),
        %metric,
        "Recommender initialized"
    );

    let bind = args.bind.clone();
    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on {}:{}", bind, http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(recommender, bind, http_port).await {
                tracing::error!("HTTP server error: {}", e);
            }
        })
    });

    info!("bookrec started successfully");
    info!("Open http://localhost:{}/", args.http_port);

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
