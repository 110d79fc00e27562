use anyhow::Result;
use std::io::IsTerminal;
use syncthing_stats::{cli::Args, config::Config, runner};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Records go to stdout, so logs must stay on stderr
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .init();

    let args = Args::parse_normalized();

    // Fatal before any request is made
    let config = Config::from_args(args)?;

    info!(
        "Collecting Syncthing stats from {} (syncthing-stats v{})",
        config.server,
        env!("CARGO_PKG_VERSION")
    );

    let summary = runner::run(&config).await?;
    debug!(?summary, "Done");

    Ok(())
}
