use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recovery_companion::adapters::{NotificationDispatcher, NotifierError, TracingNotificationSink};
use recovery_companion::app::AppServices;
use recovery_companion::config::{AppConfig, ConfigError, ValidationError};

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("Notifier failed to start: {0}")]
    Notifier(#[from] NotifierError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let services = AppServices::build(&config);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let dispatcher_task = if config.notifications.enabled {
        services.start_notifier()?;
        let dispatcher = NotificationDispatcher::new(
            services.notifier.clone(),
            Arc::new(TracingNotificationSink),
        )
        .with_interval(config.notifications.dispatch_interval());
        Some(tokio::spawn(async move { dispatcher.run(shutdown_rx).await }))
    } else {
        info!("Intervention notifications disabled");
        None
    };

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, environment = ?config.server.environment, "Recovery companion listening");

    axum::serve(listener, services.router(&config))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down");
    let _ = shutdown_tx.send(true);
    if let Some(task) = dispatcher_task {
        if let Err(e) = task.await {
            error!(error = %e, "Notification dispatcher task failed");
        }
    }
    services.notifier.dispose();

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.server.log_level));

    if config.features.json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
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
                error!(error = %e, "Failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, initiating graceful shutdown"),
        _ = terminate => info!("Received terminate signal, initiating graceful shutdown"),
    }
}
