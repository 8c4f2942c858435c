//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for Walknex API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Walknex API",
        version = "0.1.0",
        description = "Storefront shopping assistant with semantic product recommendations",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development server")
    ),
    nest(
        (path = "/api/chatbot", api = domain_chatbot::ApiDoc)
    ),
    tags(
        (name = "Chatbot", description = "Storefront shopping assistant")
    )
)]
pub struct ApiDoc;
