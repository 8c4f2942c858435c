//! Walknex Indexer
//!
//! Loads products or conversation exemplars into the vector store used by
//! the storefront chatbot. Collections are created on first run.

use clap::{Parser, Subcommand};
use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::{Environment, FromEnv};
use domain_chatbot::{ChatbotAI, ChatbotConfig, ChatbotContext, IndexSummary};
use eyre::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

mod catalog;

#[derive(Parser)]
#[command(name = "walknex-indexer")]
#[command(about = "Index products and conversations for the Walknex chatbot")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index products from a JSON array file
    Products {
        /// Path to the JSON file
        file: PathBuf,
    },

    /// Index conversation exemplars from a JSON array file
    Conversations {
        /// Path to the JSON file
        file: PathBuf,
    },

    /// Index the built-in demo catalogue
    Seed,
}

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();

    let environment = Environment::from_env();
    init_tracing(&environment);

    let cli = Cli::parse();

    let config = ChatbotConfig::from_env()?;
    let chatbot = ChatbotAI::new(&config, Arc::new(ChatbotContext::from_config(&config)))?;

    info!("Ensuring vector store schema");
    chatbot.ensure_schema().await?;

    let summary = match cli.command {
        Commands::Products { file } => {
            let products = catalog::load_items(&file).await?;
            info!("Indexing {} products from {}", products.len(), file.display());
            chatbot.index_products_batch(products).await
        }

        Commands::Conversations { file } => {
            let conversations = catalog::load_items(&file).await?;
            info!(
                "Indexing {} conversations from {}",
                conversations.len(),
                file.display()
            );
            chatbot.index_conversations_batch(conversations).await
        }

        Commands::Seed => {
            let products = catalog::sample_products()?;
            info!("Indexing {} sample products", products.len());
            chatbot.index_products_batch(products).await
        }
    };

    report(summary)
}

fn report(summary: IndexSummary) -> Result<()> {
    println!("indexed {}/{}", summary.indexed, summary.total);
    if summary.indexed < summary.total {
        eyre::bail!("{} item(s) failed to index", summary.total - summary.indexed);
    }
    Ok(())
}
