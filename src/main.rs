use std::sync::Arc;

use anyhow::Context;
use dealflow::backend::DemoBackend;
use dealflow::cli::Repl;
use dealflow::config::AppConfig;
use dealflow::view::ViewRouter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("Failed to load configuration")?;

    // Logs go to stderr so the screens on stdout stay readable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    eprintln!("DealFlow v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Validation: {}", config.validation);
    eprintln!("   Demo latency: {}ms", config.demo_latency.as_millis());
    eprintln!("   Type 'help' for commands, 'quit' to exit.\n");

    let backend = Arc::new(DemoBackend::new(config.demo_latency));
    let router = ViewRouter::new(config, backend);

    Repl::new(router)
        .run()
        .await
        .context("Failed to read from stdin")?;

    eprintln!("Goodbye.");
    Ok(())
}
