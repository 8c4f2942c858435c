//! Walknex API - storefront chatbot REST server

use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_chatbot::{
    ChatSessionRepository, ChatbotAI, ChatbotContext, InMemoryChatSessionRepository,
    RedisChatSessionRepository,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    // Fails here, before binding, when a credential is missing
    let context = Arc::new(ChatbotContext::from_config(&config.chatbot));
    let chatbot = ChatbotAI::new(&config.chatbot, context)?;

    let redis_sessions = match &config.redis {
        Some(redis) => {
            let repository = RedisChatSessionRepository::connect(&redis.uri).await?;
            info!("Chat sessions stored in Redis");
            Some(repository)
        }
        None => {
            info!("REDIS_HOST not set, chat sessions kept in memory");
            None
        }
    };
    let sessions: Arc<dyn ChatSessionRepository> = match redis_sessions.clone() {
        Some(repository) => Arc::new(repository),
        None => Arc::new(InMemoryChatSessionRepository::new()),
    };

    let state = AppState {
        config: config.clone(),
        chatbot,
        sessions,
        redis_sessions,
    };

    let api_routes = api::routes(&state);
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;
    let app = router.merge(health_router(state.config.app));

    let server = state.config.server.clone();
    info!("Starting Walknex API on port {}", server.port);

    create_production_app(
        app,
        &server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: dropping remote clients");
            drop(state);
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Walknex API shutdown complete");
    Ok(())
}
