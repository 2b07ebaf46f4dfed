//! issue-mirror daemon entry point.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use issue_mirror::cli::{execute, load_config, Cli};
use issue_mirror::Config;

/// Install the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the configured level applies.
fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));

    let registry = tracing_subscriber::registry().with(filter);

    if config.logging.format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Configuration problems are fatal and reported before the
    // subscriber exists, so plain stderr is the only channel here.
    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("issue-mirror: {err:#}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(err) = execute(cli, config).await {
        tracing::error!(error = ?err, "issue-mirror exited with an error");
        std::process::exit(1);
    }
}
