use library_catalog::{
    adapters::file::FileSnapshotStore,
    adapters::logging::TracingEventSink,
    api::{handlers::AppState, router::create_router},
    application::catalog::{self, ServiceDependencies},
    config::AppConfig,
    domain::Catalog,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "library_catalog=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;
    let policy = config.policy()?;

    tracing::info!(
        library = %config.name,
        checkout_limit = policy.checkout_limit.value(),
        loan_period_days = policy.loan_period.days(),
        snapshot_path = %config.snapshot_path.display(),
        "Configuration loaded"
    );

    // Create service dependencies
    let service_deps = ServiceDependencies {
        catalog: Arc::new(Mutex::new(Catalog::new(config.name.clone()))),
        policy,
        snapshot_store: Arc::new(FileSnapshotStore::new()),
        event_sink: Arc::new(TracingEventSink::new()),
    };

    // Restore the previous catalog if requested
    if config.restore_on_start {
        if config.snapshot_path.exists() {
            catalog::load_snapshot(&service_deps, &config.snapshot_path).await?;
        } else {
            tracing::info!(
                snapshot_path = %config.snapshot_path.display(),
                "No snapshot found, starting with an empty catalog"
            );
        }
    }

    // Create application state
    let app_state = Arc::new(AppState {
        service_deps,
        snapshot_path: config.snapshot_path.clone(),
    });

    // Create router
    let app = create_router(app_state);

    // Server configuration
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    // Start server
    axum::serve(listener, app).await?;

    Ok(())
}
