//! Barter offer commands

use super::{created, heading, Output};
use crate::api::ApiClient;
use agro_types::{BarterOffer, BarterStatus, Id, NewBarterOffer};
use anyhow::Result;
use colored::{ColoredString, Colorize};

pub async fn list(client: &ApiClient, user_id: Option<Id>, output: Output) -> Result<()> {
    let offers = client.list_barter_offers(user_id).await?;
    output.emit(&offers, |offers| {
        heading("🔁 Barter offers", offers.len());
        for offer in offers {
            print_offer(offer);
        }
    })
}

pub async fn get(client: &ApiClient, id: Id, output: Output) -> Result<()> {
    let offer = client.get_barter_offer(id).await?;
    output.emit(&offer, print_offer)
}

pub async fn create(client: &ApiClient, offer: NewBarterOffer, output: Output) -> Result<()> {
    let offer = client.create_barter_offer(&offer).await?;
    output.emit(&offer, |offer| {
        created("Barter offer", offer.id);
        print_offer(offer);
    })
}

pub async fn set_status(
    client: &ApiClient,
    id: Id,
    status: BarterStatus,
    output: Output,
) -> Result<()> {
    let offer = client.update_barter_status(id, status).await?;
    output.emit(&offer, print_offer)
}

fn print_offer(offer: &BarterOffer) {
    println!(
        "   #{} user #{} offers item #{} for item #{} of user #{} [{}]",
        offer.id,
        offer.offer_user_id,
        offer.offer_item_id,
        offer.request_item_id,
        offer.receive_user_id,
        status_label(offer.status)
    );
}

fn status_label(status: BarterStatus) -> ColoredString {
    match status {
        BarterStatus::Pending => status.as_str().yellow(),
        BarterStatus::Accepted => status.as_str().green(),
        BarterStatus::Rejected => status.as_str().red(),
    }
}
