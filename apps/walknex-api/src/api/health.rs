//! Readiness endpoint

use axum::{Router, extract::State, response::IntoResponse, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use domain_chatbot::VectorStore;

use crate::state::AppState;

async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.chatbot.vector_store().clone();
    let vector_store: HealthCheckFuture<'static> = Box::pin(async move {
        store
            .list_collections()
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    });

    let mut checks = vec![("vector_store", vector_store)];

    if let Some(redis) = state.redis_sessions.clone() {
        let redis_check: HealthCheckFuture<'static> =
            Box::pin(async move { redis.ping().await.map_err(|e| e.to_string()) });
        checks.push(("redis", redis_check));
    }

    run_health_checks(checks).await
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(ready))
        .with_state(state)
}
