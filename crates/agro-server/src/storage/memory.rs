//! In-memory store using DashMap

use agro_core::governance;
use agro_core::{
    AgroError, BarterOffer, BarterStatus, DaoProposal, Id, LiquidityPool, MarketplaceItem,
    Microjob, MicrojobStatus, NewBarterOffer, NewLiquidityPool, NewMarketplaceItem, NewMicrojob,
    NewProposal, NewUser, Result, RiskLevel, Storage, User, Vote,
};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};

/// One entity kind: rows keyed by id plus the next id to hand out
struct Table<T> {
    rows: DashMap<Id, T>,
    next_id: AtomicI64,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    fn next_id(&self) -> Id {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    fn insert_with(&self, build: impl FnOnce(Id) -> T) -> T {
        let id = self.next_id();
        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }

    fn get(&self, id: Id) -> Option<T> {
        self.rows.get(&id).map(|row| row.value().clone())
    }

    /// Matching rows in creation (id) order
    fn list_where(&self, keep: impl Fn(&T) -> bool) -> Vec<T> {
        let mut rows: Vec<(Id, T)> = self
            .rows
            .iter()
            .filter(|entry| keep(entry.value()))
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();
        rows.sort_by_key(|(id, _)| *id);
        rows.into_iter().map(|(_, row)| row).collect()
    }

    fn list(&self) -> Vec<T> {
        self.list_where(|_| true)
    }

    /// Mutate a row under its shard lock
    fn update(&self, id: Id, change: impl FnOnce(&mut T)) -> Option<T> {
        self.rows.get_mut(&id).map(|mut row| {
            change(row.value_mut());
            row.value().clone()
        })
    }
}

/// Process-local storage backend. Owned by the entry point and shared
/// through the router state.
pub struct MemoryStorage {
    users: Table<User>,
    /// username -> id, guards uniqueness
    usernames: DashMap<String, Id>,
    marketplace_items: Table<MarketplaceItem>,
    barter_offers: Table<BarterOffer>,
    microjobs: Table<Microjob>,
    proposals: Table<DaoProposal>,
    liquidity_pools: Table<LiquidityPool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            users: Table::new(),
            usernames: DashMap::new(),
            marketplace_items: Table::new(),
            barter_offers: Table::new(),
            microjobs: Table::new(),
            proposals: Table::new(),
            liquidity_pools: Table::new(),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn create_user(&self, user: NewUser) -> Result<User> {
        match self.usernames.entry(user.username.clone()) {
            Entry::Occupied(_) => Err(AgroError::Conflict(format!(
                "username '{}' is already taken",
                user.username
            ))),
            Entry::Vacant(slot) => {
                let created = self
                    .users
                    .insert_with(|id| User::from_new(id, user, Utc::now()));
                slot.insert(created.id);
                Ok(created)
            }
        }
    }

    async fn get_user(&self, id: Id) -> Result<Option<User>> {
        Ok(self.users.get(id))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let id = self.usernames.get(username).map(|entry| *entry.value());
        Ok(id.and_then(|id| self.users.get(id)))
    }

    async fn list_marketplace_items(&self) -> Result<Vec<MarketplaceItem>> {
        Ok(self.marketplace_items.list())
    }

    async fn get_marketplace_item(&self, id: Id) -> Result<Option<MarketplaceItem>> {
        Ok(self.marketplace_items.get(id))
    }

    async fn list_marketplace_items_by_user(&self, user_id: Id) -> Result<Vec<MarketplaceItem>> {
        Ok(self.marketplace_items.list_where(|item| item.user_id == user_id))
    }

    async fn list_marketplace_items_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<MarketplaceItem>> {
        Ok(self
            .marketplace_items
            .list_where(|item| item.category == category))
    }

    async fn create_marketplace_item(&self, item: NewMarketplaceItem) -> Result<MarketplaceItem> {
        Ok(self
            .marketplace_items
            .insert_with(|id| MarketplaceItem::from_new(id, item, Utc::now())))
    }

    async fn list_barter_offers(&self) -> Result<Vec<BarterOffer>> {
        Ok(self.barter_offers.list())
    }

    async fn get_barter_offer(&self, id: Id) -> Result<Option<BarterOffer>> {
        Ok(self.barter_offers.get(id))
    }

    async fn list_barter_offers_by_user(&self, user_id: Id) -> Result<Vec<BarterOffer>> {
        Ok(self.barter_offers.list_where(|offer| offer.involves(user_id)))
    }

    async fn create_barter_offer(&self, offer: NewBarterOffer) -> Result<BarterOffer> {
        Ok(self
            .barter_offers
            .insert_with(|id| BarterOffer::from_new(id, offer, Utc::now())))
    }

    async fn update_barter_offer_status(
        &self,
        id: Id,
        status: BarterStatus,
    ) -> Result<Option<BarterOffer>> {
        Ok(self.barter_offers.update(id, |offer| offer.status = status))
    }

    async fn list_microjobs(&self) -> Result<Vec<Microjob>> {
        Ok(self.microjobs.list())
    }

    async fn get_microjob(&self, id: Id) -> Result<Option<Microjob>> {
        Ok(self.microjobs.get(id))
    }

    async fn list_microjobs_by_user(&self, user_id: Id) -> Result<Vec<Microjob>> {
        Ok(self.microjobs.list_where(|job| job.user_id == user_id))
    }

    async fn create_microjob(&self, job: NewMicrojob) -> Result<Microjob> {
        Ok(self
            .microjobs
            .insert_with(|id| Microjob::from_new(id, job, Utc::now())))
    }

    async fn update_microjob_status(
        &self,
        id: Id,
        status: MicrojobStatus,
    ) -> Result<Option<Microjob>> {
        Ok(self.microjobs.update(id, |job| job.status = status))
    }

    async fn list_proposals(&self) -> Result<Vec<DaoProposal>> {
        Ok(self.proposals.list())
    }

    async fn get_proposal(&self, id: Id) -> Result<Option<DaoProposal>> {
        Ok(self.proposals.get(id))
    }

    async fn create_proposal(&self, proposal: NewProposal) -> Result<DaoProposal> {
        Ok(self
            .proposals
            .insert_with(|id| DaoProposal::from_new(id, proposal, Utc::now())))
    }

    async fn vote_on_proposal(&self, id: Id, vote: Vote) -> Result<Option<DaoProposal>> {
        Ok(self
            .proposals
            .update(id, |proposal| governance::cast_vote(proposal, vote)))
    }

    async fn list_liquidity_pools(&self, risk: Option<RiskLevel>) -> Result<Vec<LiquidityPool>> {
        Ok(match risk {
            Some(risk) => self.liquidity_pools.list_where(|pool| pool.risk == risk),
            None => self.liquidity_pools.list(),
        })
    }

    async fn get_liquidity_pool(&self, id: Id) -> Result<Option<LiquidityPool>> {
        Ok(self.liquidity_pools.get(id))
    }

    async fn create_liquidity_pool(&self, pool: NewLiquidityPool) -> Result<LiquidityPool> {
        Ok(self
            .liquidity_pools
            .insert_with(|id| LiquidityPool::from_new(id, pool, Utc::now())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::conformance;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_conformance() {
        conformance::run_all(&MemoryStorage::new()).await;
    }

    #[tokio::test]
    async fn test_concurrent_votes_are_not_lost() {
        let store = Arc::new(MemoryStorage::new());
        let proposal = store
            .create_proposal(conformance::new_proposal())
            .await
            .unwrap();

        let mut handles = Vec::new();
        for _ in 0..32 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.vote_on_proposal(proposal.id, Vote::For).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let proposal = store.get_proposal(proposal.id).await.unwrap().unwrap();
        assert_eq!(proposal.votes_for, 32);
    }
}
