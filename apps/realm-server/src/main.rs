use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use realm_server::{AppConfig, RealmServer, logging};
use tokio_util::sync::CancellationToken;

/// Realm Server - delegated username/password login over HTTP
#[derive(Parser)]
#[command(name = "realm-server")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the effective configuration (secrets redacted) and exit
    #[arg(long)]
    print_config: bool,

    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config.to_printable_json()?)?);
        return Ok(());
    }

    logging::init(&config.logging, cli.verbose)?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_addr = %config.server.bind_addr,
        "Starting realm-server"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run(config, cli.config))
}

async fn run(config: AppConfig, config_path: Option<PathBuf>) -> Result<()> {
    let server = Arc::new(RealmServer::build(config)?);
    let cancel = CancellationToken::new();

    tokio::spawn(shutdown_on_signal(cancel.clone()));
    #[cfg(unix)]
    tokio::spawn(reload_on_sighup(server.clone(), config_path, cancel.clone()));
    #[cfg(not(unix))]
    let _ = config_path;

    server.serve(cancel).await?;
    tracing::info!("realm-server stopped");
    Ok(())
}

/// Cognitive complexity is inflated by tracing macro expansion.
#[allow(clippy::cognitive_complexity)]
async fn shutdown_on_signal(cancel: CancellationToken) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = term.recv() => {}
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    tracing::info!("Shutdown signal received");
    cancel.cancel();
}

/// Redeploy the static delegate from the configuration file on `SIGHUP`.
#[cfg(unix)]
#[allow(clippy::cognitive_complexity)]
async fn reload_on_sighup(
    server: Arc<RealmServer>,
    config_path: Option<PathBuf>,
    cancel: CancellationToken,
) {
    use tokio::signal::unix::{SignalKind, signal};

    let mut hangup = match signal(SignalKind::hangup()) {
        Ok(hangup) => hangup,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to install SIGHUP handler");
            return;
        }
    };

    loop {
        tokio::select! {
            () = cancel.cancelled() => return,
            received = hangup.recv() => {
                if received.is_none() {
                    return;
                }
            }
        }

        match AppConfig::load(config_path.as_deref()) {
            Ok(config) => match server.redeploy_delegate(&config.static_delegate) {
                Ok(()) => tracing::info!(
                    user_count = config.static_delegate.users.len(),
                    "Static delegate redeployed"
                ),
                Err(e) => tracing::error!(error = %e, "Static delegate redeploy failed"),
            },
            Err(e) => tracing::error!(error = %e, "Configuration reload failed"),
        }
    }
}
