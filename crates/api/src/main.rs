use std::sync::Arc;
use std::time::Duration;

use pulsefit_api::config::ServerConfig;
use pulsefit_api::router::build_app_router;
use pulsefit_api::state::AppState;
use pulsefit_events::{ActivityAudit, EventBus, ProfileSync};
use tokio::net::TcpListener;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "pulsefit_api=debug,pulsefit_events=info,tower_http=debug";

/// Plain text logs by default, one JSON object per line with `LOG_FORMAT=json`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json" | "JSON"));

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| tracing_subscriber::fmt::layer()))
        .init();
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };
    tracing::info!(
        host = %config.host,
        port = config.port,
        day_offset_minutes = config.calendar.offset_minutes(),
        "Configuration loaded"
    );

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = pulsefit_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    pulsefit_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database ready");

    let event_bus = Arc::new(EventBus::default());
    let profile_sync = tokio::spawn(ProfileSync::run(pool.clone(), event_bus.subscribe()));
    let audit = tokio::spawn(ActivityAudit::run(event_bus.subscribe()));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus: Arc::clone(&event_bus),
    };
    let app = build_app_router(state, &config);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // Dropping the last sender closes the channel; both subscribers then drain and exit.
    drop(event_bus);
    let grace = Duration::from_secs(config.shutdown_timeout_secs);
    let subscribers = async {
        let _ = profile_sync.await;
        let _ = audit.await;
    };
    match tokio::time::timeout(grace, subscribers).await {
        Ok(()) => tracing::info!("Event subscribers stopped"),
        Err(_) => tracing::warn!(
            timeout_secs = config.shutdown_timeout_secs,
            "Event subscribers did not stop in time"
        ),
    }
    tracing::info!("Shutdown complete");
}

/// Resolves on SIGINT, or SIGTERM on Unix.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = signal(SignalKind::terminate()).expect("Failed to install SIGTERM handler");
        tokio::select! {
            res = tokio::signal::ctrl_c() => {
                res.expect("Failed to install Ctrl-C handler");
                tracing::info!("SIGINT received, shutting down");
            }
            _ = sigterm.recv() => tracing::info!("SIGTERM received, shutting down"),
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
        tracing::info!("SIGINT received, shutting down");
    }
}
