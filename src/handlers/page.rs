use axum::{extract::State, response::Html};
use tracing::instrument;
use crate::schemas::AppState;

/// The dashboard page, rendered once at startup
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(state.page.to_string())
}
