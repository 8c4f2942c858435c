mod client;
mod config;

pub use client::WeaviateClient;
pub use config::WeaviateConfig;
