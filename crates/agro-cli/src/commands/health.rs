//! Server health check

use super::Output;
use crate::api::ApiClient;
use anyhow::Result;
use colored::Colorize;

pub async fn execute(client: &ApiClient, output: Output) -> Result<()> {
    let health = client.health().await?;
    output.emit(&health, |health| {
        println!(
            "{} {} v{} ({} storage)",
            "●".green(),
            health["status"].as_str().unwrap_or("unknown"),
            health["version"].as_str().unwrap_or("?"),
            health["storage"].as_str().unwrap_or("?")
        );
    })
}
