use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

use crate::config::{initialize_app_state, AppConfig};
use crate::router::create_router;

/// Load the tables and serve the dashboard until the process is stopped.
///
/// Loading happens before binding, so bad input files fail the command
/// without ever opening the port.
pub async fn serve(config: &AppConfig) -> Result<()> {
    let state = initialize_app_state(config)?;
    info!(
        months = state.context.months().len(),
        default_state = ?state.layout.initial_selection.state,
        default_county = ?state.layout.initial_selection.county,
        "Dashboard ready"
    );

    let listener = TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_address))?;

    info!("Dashboard running on http://{}", config.bind_address);
    info!("Swagger UI available at http://{}/swagger-ui", config.bind_address);
    axum::serve(listener, create_router(state)).await?;

    Ok(())
}
