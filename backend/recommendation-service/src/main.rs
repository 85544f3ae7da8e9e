use anyhow::Context;
use recommendation_service::{run, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    tracing::info!(
        "Starting recommendation-service v{}",
        env!("CARGO_PKG_VERSION")
    );
    tracing::info!(
        ratings = %config.ratings_path.display(),
        metric = %config.metric,
        top_k = config.top_k,
        "Configuration loaded"
    );

    let report = run(&config).context("Recommendation run failed")?;

    println!("{}", report);

    Ok(())
}
