//! Marketplace commands

use super::{created, heading, Output};
use crate::api::ApiClient;
use agro_types::{Id, MarketplaceItem, NewMarketplaceItem};
use anyhow::Result;
use colored::Colorize;

pub async fn list(
    client: &ApiClient,
    category: Option<String>,
    user_id: Option<Id>,
    output: Output,
) -> Result<()> {
    let items = client
        .list_marketplace_items(category.as_deref(), user_id)
        .await?;
    output.emit(&items, |items| {
        heading("🌾 Marketplace", items.len());
        for item in items {
            print_item(item);
        }
    })
}

pub async fn get(client: &ApiClient, id: Id, output: Output) -> Result<()> {
    let item = client.get_marketplace_item(id).await?;
    output.emit(&item, |item| {
        print_item(item);
        println!("       {}", item.description);
    })
}

pub async fn create(client: &ApiClient, item: NewMarketplaceItem, output: Output) -> Result<()> {
    let item = client.create_marketplace_item(&item).await?;
    output.emit(&item, |item| {
        created("Listing", item.id);
        print_item(item);
    })
}

fn print_item(item: &MarketplaceItem) {
    let availability = if item.is_available {
        String::new()
    } else {
        format!(" {}", "(unavailable)".red())
    };
    println!(
        "   #{} {} - {} {} @ {:.2}/{}{}",
        item.id,
        item.title.cyan(),
        item.quantity,
        item.unit,
        item.price,
        item.unit,
        availability
    );
    println!(
        "       {} | {} | seller #{}",
        item.category.dimmed(),
        item.location,
        item.user_id
    );
}
