//! API routes module

pub mod health;

use axum::Router;
use domain_chatbot::handlers;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(handlers::mounted_router(
            state.chatbot.clone(),
            state.sessions.clone(),
        ))
        .merge(health::router(state.clone()))
}
