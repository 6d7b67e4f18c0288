use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use intake_core::{IntakeSettings, UploadWorkflow, build_volume_client};
use intake_web::{AppState, router};

/// Main entry point for the volume intake web form
///
/// Loads configuration once, builds the storage client, then serves the form until
/// interrupted.
///
/// # Environment Variables
/// - `INTAKE_ADDR`: listen address (default: "0.0.0.0:8000")
/// - `INTAKE_STORAGE`: `databricks` (default) or `local`
/// - `DATABRICKS_HOST`, `DATABRICKS_TOKEN`: workspace URL and token for `databricks`
/// - `INTAKE_LOCAL_VOLUMES_DIR`: root standing in for `/Volumes` with `local`
/// - `INTAKE_MAX_UPLOAD_BYTES`: upload size limit
///
/// # Errors
/// Returns an error if:
/// - the configuration is invalid,
/// - the storage client cannot be built, or
/// - the listen address cannot be bound.
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("intake=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr: SocketAddr = std::env::var("INTAKE_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8000".into())
        .parse()?;
    let settings = IntakeSettings::from_env()?;

    // The blocking HTTP client must not be dropped on a runtime thread, so `client`
    // outlives the runtime.
    let client = build_volume_client(&settings.storage)?;
    let workflow = UploadWorkflow::new(client.clone(), settings.core);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(serve(addr, workflow));
    drop(runtime);
    drop(client);

    result
}

async fn serve(addr: SocketAddr, workflow: UploadWorkflow) -> anyhow::Result<()> {
    tracing::info!(
        "++ Starting volume intake on {} (storage: {})",
        addr,
        workflow.backend_name()
    );

    let app = router(AppState::new(workflow));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("-- Shutting down");
        })
        .await?;

    Ok(())
}
