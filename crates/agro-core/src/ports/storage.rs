//! Storage trait for persistence
//!
//! Every backend must behave identically from the caller's perspective:
//! identifiers are assigned monotonically on create, defaults are applied by
//! the store, lists come back in creation order and lookups of an absent id
//! return `Ok(None)`.

use crate::Result;
use agro_types::{
    BarterOffer, BarterStatus, DaoProposal, Id, LiquidityPool, MarketplaceItem, Microjob,
    MicrojobStatus, NewBarterOffer, NewLiquidityPool, NewMarketplaceItem, NewMicrojob,
    NewProposal, NewUser, RiskLevel, User, Vote,
};
use async_trait::async_trait;

#[async_trait]
pub trait Storage: Send + Sync {
    // Users
    async fn create_user(&self, user: NewUser) -> Result<User>;
    async fn get_user(&self, id: Id) -> Result<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;

    // Marketplace
    async fn list_marketplace_items(&self) -> Result<Vec<MarketplaceItem>>;
    async fn get_marketplace_item(&self, id: Id) -> Result<Option<MarketplaceItem>>;
    async fn list_marketplace_items_by_user(&self, user_id: Id) -> Result<Vec<MarketplaceItem>>;
    async fn list_marketplace_items_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<MarketplaceItem>>;
    async fn create_marketplace_item(&self, item: NewMarketplaceItem) -> Result<MarketplaceItem>;

    // Barter
    async fn list_barter_offers(&self) -> Result<Vec<BarterOffer>>;
    async fn get_barter_offer(&self, id: Id) -> Result<Option<BarterOffer>>;
    /// Offers where the user is either the offering or the receiving party
    async fn list_barter_offers_by_user(&self, user_id: Id) -> Result<Vec<BarterOffer>>;
    async fn create_barter_offer(&self, offer: NewBarterOffer) -> Result<BarterOffer>;
    async fn update_barter_offer_status(
        &self,
        id: Id,
        status: BarterStatus,
    ) -> Result<Option<BarterOffer>>;

    // Microjobs
    async fn list_microjobs(&self) -> Result<Vec<Microjob>>;
    async fn get_microjob(&self, id: Id) -> Result<Option<Microjob>>;
    async fn list_microjobs_by_user(&self, user_id: Id) -> Result<Vec<Microjob>>;
    async fn create_microjob(&self, job: NewMicrojob) -> Result<Microjob>;
    async fn update_microjob_status(
        &self,
        id: Id,
        status: MicrojobStatus,
    ) -> Result<Option<Microjob>>;

    // DAO proposals
    async fn list_proposals(&self) -> Result<Vec<DaoProposal>>;
    async fn get_proposal(&self, id: Id) -> Result<Option<DaoProposal>>;
    async fn create_proposal(&self, proposal: NewProposal) -> Result<DaoProposal>;
    /// Record one ballot and re-evaluate the proposal status atomically.
    async fn vote_on_proposal(&self, id: Id, vote: Vote) -> Result<Option<DaoProposal>>;

    // Liquidity pools
    /// All pools, or exactly those with the given risk level
    async fn list_liquidity_pools(&self, risk: Option<RiskLevel>) -> Result<Vec<LiquidityPool>>;
    async fn get_liquidity_pool(&self, id: Id) -> Result<Option<LiquidityPool>>;
    async fn create_liquidity_pool(&self, pool: NewLiquidityPool) -> Result<LiquidityPool>;
}
