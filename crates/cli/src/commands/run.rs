//! `run` command implementation.

use anyhow::{Context, Result};
use contracts::SessionBlueprint;
use tracing::{info, warn};

use super::load_blueprint;
use crate::cli::RunArgs;
use crate::session::{Session, SessionConfig};

/// Execute the `run` command
pub async fn run_session(args: &RunArgs) -> Result<()> {
    let mut blueprint = match &args.config {
        Some(path) => {
            info!(config = %path.display(), "Loading configuration");
            load_blueprint(path)?
        }
        None => {
            info!("No configuration given, using built-in defaults");
            SessionBlueprint::default()
        }
    };

    // Apply CLI overrides
    if let Some(tick_ms) = args.tick_ms {
        info!(tick_ms, "Overriding tick period from CLI");
        blueprint.device.tick_ms = tick_ms;
        config_loader::ConfigLoader::validate(&blueprint).context("Invalid --tick-ms")?;
    }

    info!(
        device = %blueprint.device.name,
        tick_ms = blueprint.device.tick_ms,
        list_a = %blueprint.menu.list_a.name,
        list_b = %blueprint.menu.list_b.name,
        sinks = blueprint.feedback.len(),
        "Configuration loaded"
    );

    let session = Session::new(SessionConfig {
        blueprint,
        replay_path: args.replay.clone(),
        record_path: args.record.clone(),
        max_ticks: if args.max_ticks == 0 {
            None
        } else {
            Some(args.max_ticks)
        },
        fast: args.fast,
        start_capture: args.capture,
        metrics_port: if args.metrics_port == 0 {
            None
        } else {
            Some(args.metrics_port)
        },
        render: !args.no_render,
    });

    info!("Starting session...");
    let stats = session
        .run(shutdown_signal())
        .await
        .context("Session failed")?;

    if stats.interrupted {
        warn!(ticks = stats.ticks, "Session interrupted");
    }
    stats.print_summary();

    info!("armband-nav finished");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
