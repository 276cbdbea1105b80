//! User commands

use super::{created, Output};
use crate::api::ApiClient;
use agro_types::{Id, NewUser, User};
use anyhow::Result;
use colored::Colorize;

pub async fn create(client: &ApiClient, user: NewUser, output: Output) -> Result<()> {
    let user = client.create_user(&user).await?;
    output.emit(&user, |user| {
        created("User", user.id);
        print_user(user);
    })
}

pub async fn get(client: &ApiClient, id: Id, output: Output) -> Result<()> {
    let user = client.get_user(id).await?;
    output.emit(&user, print_user)
}

fn print_user(user: &User) {
    let badge = if user.verified {
        "verified".green()
    } else {
        "unverified".yellow()
    };
    println!("   {} {} [{}]", user.username.cyan().bold(), user.full_name, badge);
    println!("   Type: {}", user.user_type);
    println!("   Location: {}", user.location);
    if let Some(ref wallet) = user.wallet_address {
        println!("   Wallet: {}", wallet.dimmed());
    }
    if let Some(ref bio) = user.bio {
        println!("   {}", bio.dimmed());
    }
}
