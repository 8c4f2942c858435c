//! Loading of indexing input files

use eyre::{Result, WrapErr};
use serde::de::DeserializeOwned;
use std::path::Path;

use domain_chatbot::ProductInput;

const SAMPLE_PRODUCTS: &str = include_str!("../data/sample_products.json");

/// Parse a JSON array of items
pub fn parse_items<T: DeserializeOwned>(json: &str) -> Result<Vec<T>> {
    serde_json::from_str(json).wrap_err("Expected a JSON array of items")
}

pub async fn load_items<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    parse_items(&contents).wrap_err_with(|| format!("Invalid input file {}", path.display()))
}

/// Three demo products covering running, casual and boots
pub fn sample_products() -> Result<Vec<ProductInput>> {
    parse_items(SAMPLE_PRODUCTS)
}
