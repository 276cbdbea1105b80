//! Storage layer
//!
//! Two interchangeable `Storage` backends: SQLite (embedded) for persistent
//! deployments and DashMap (in-memory) for demos and tests.

pub mod db;
pub mod memory;

pub use db::Database;
pub use memory::MemoryStorage;

use crate::config::{Config, StorageBackend};
use agro_core::Storage;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

/// Build the backend selected by the configuration
pub async fn open(config: &Config) -> Result<Arc<dyn Storage>> {
    match config.storage {
        StorageBackend::Memory => {
            info!("Using in-memory storage (data is lost on restart)");
            Ok(Arc::new(MemoryStorage::new()))
        }
        StorageBackend::Sqlite => {
            info!("Using SQLite storage at: {}", config.database_path);
            let db = Database::new(&config.database_path)
                .await
                .context("Failed to initialize database")?;
            Ok(Arc::new(db))
        }
    }
}

/// Behaviour every backend must share, run against each implementation.
#[cfg(test)]
pub(crate) mod conformance {
    use agro_core::*;
    use chrono::{Duration, Utc};

    pub fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            password: "$argon2id$v=19$placeholder".to_string(),
            full_name: "John Farmer".to_string(),
            user_type: UserType::Farmer,
            location: "Rural County, Midwest".to_string(),
            wallet_address: Some("0x1234567890abcdef".to_string()),
            bio: None,
            profile_image: None,
        }
    }

    pub fn new_item(user_id: Id, category: &str) -> NewMarketplaceItem {
        NewMarketplaceItem {
            user_id,
            title: "Organic wheat seeds".to_string(),
            description: "High-yield, drought resistant".to_string(),
            category: category.to_string(),
            price: 45.5,
            unit: "kg".to_string(),
            quantity: 100.0,
            location: "Midwest".to_string(),
            image_url: None,
        }
    }

    pub fn new_offer(from: Id, to: Id) -> NewBarterOffer {
        NewBarterOffer {
            offer_user_id: from,
            receive_user_id: to,
            offer_item_id: 1,
            request_item_id: 2,
        }
    }

    pub fn new_job(user_id: Id) -> NewMicrojob {
        NewMicrojob {
            user_id,
            title: "Harvest helper".to_string(),
            description: "Two days of corn harvest".to_string(),
            skills_required: "harvesting".to_string(),
            compensation: 120.0,
            location: "Midwest".to_string(),
            duration: "2 days".to_string(),
        }
    }

    pub fn new_proposal() -> NewProposal {
        NewProposal {
            user_id: 1,
            title: "Community seed bank".to_string(),
            description: "Fund a shared seed bank".to_string(),
            ends_at: Utc::now() + Duration::days(14),
        }
    }

    pub fn new_pool(risk: RiskLevel) -> NewLiquidityPool {
        NewLiquidityPool {
            name: format!("{} pool", risk),
            description: "Seasonal yield pool".to_string(),
            pool_type: "yield".to_string(),
            total_liquidity: 250_000.0,
            asset: "wheat".to_string(),
            apy: 8.5,
            participants: 42,
            risk,
            duration: "6 months".to_string(),
            user_id: 1,
            image_url: None,
        }
    }

    pub async fn run_all(store: &dyn Storage) {
        users(store).await;
        marketplace(store).await;
        barter(store).await;
        microjobs(store).await;
        proposals(store).await;
        liquidity(store).await;
    }

    async fn users(store: &dyn Storage) {
        let first = store.create_user(new_user("farmer_john")).await.unwrap();
        let second = store.create_user(new_user("agro_corp")).await.unwrap();
        assert!(second.id > first.id);
        assert!(!first.verified);
        assert_eq!(first.wallet_address.as_deref(), Some("0x1234567890abcdef"));

        let fetched = store.get_user(first.id).await.unwrap().unwrap();
        assert_eq!(fetched, first);
        assert_eq!(store.get_user(first.id).await.unwrap().unwrap(), fetched);

        let by_name = store.get_user_by_username("agro_corp").await.unwrap();
        assert_eq!(by_name.map(|u| u.id), Some(second.id));
        assert!(store.get_user_by_username("nobody").await.unwrap().is_none());
        assert!(store.get_user(9_999).await.unwrap().is_none());

        let duplicate = store.create_user(new_user("farmer_john")).await;
        assert!(matches!(duplicate, Err(AgroError::Conflict(_))));
    }

    async fn marketplace(store: &dyn Storage) {
        let seed = store.create_marketplace_item(new_item(1, "seed")).await.unwrap();
        let tool = store.create_marketplace_item(new_item(2, "tool")).await.unwrap();
        let seed2 = store.create_marketplace_item(new_item(2, "seed")).await.unwrap();
        assert!(seed.is_available);

        let all = store.list_marketplace_items().await.unwrap();
        let ids: Vec<_> = all.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![seed.id, tool.id, seed2.id]);

        let seeds = store.list_marketplace_items_by_category("seed").await.unwrap();
        assert_eq!(seeds.iter().map(|i| i.id).collect::<Vec<_>>(), vec![seed.id, seed2.id]);

        let by_user = store.list_marketplace_items_by_user(2).await.unwrap();
        assert_eq!(by_user.iter().map(|i| i.id).collect::<Vec<_>>(), vec![tool.id, seed2.id]);

        assert_eq!(store.get_marketplace_item(tool.id).await.unwrap(), Some(tool));
        assert!(store.get_marketplace_item(9_999).await.unwrap().is_none());
    }

    async fn barter(store: &dyn Storage) {
        let offer = store.create_barter_offer(new_offer(1, 2)).await.unwrap();
        let other = store.create_barter_offer(new_offer(3, 4)).await.unwrap();
        assert_eq!(offer.status, BarterStatus::Pending);

        let for_user_two = store.list_barter_offers_by_user(2).await.unwrap();
        assert_eq!(for_user_two.iter().map(|o| o.id).collect::<Vec<_>>(), vec![offer.id]);
        let for_user_three = store.list_barter_offers_by_user(3).await.unwrap();
        assert_eq!(for_user_three.iter().map(|o| o.id).collect::<Vec<_>>(), vec![other.id]);
        assert_eq!(store.list_barter_offers().await.unwrap().len(), 2);

        let accepted = store
            .update_barter_offer_status(offer.id, BarterStatus::Accepted)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(accepted.status, BarterStatus::Accepted);
        let fetched = store.get_barter_offer(offer.id).await.unwrap().unwrap();
        assert_eq!(fetched.status, BarterStatus::Accepted);

        let missing = store
            .update_barter_offer_status(9_999, BarterStatus::Rejected)
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    async fn microjobs(store: &dyn Storage) {
        let job = store.create_microjob(new_job(5)).await.unwrap();
        store.create_microjob(new_job(6)).await.unwrap();
        assert_eq!(job.status, MicrojobStatus::Open);

        let mine = store.list_microjobs_by_user(5).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(store.list_microjobs().await.unwrap().len(), 2);

        let assigned = store
            .update_microjob_status(job.id, MicrojobStatus::Assigned)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(assigned.status, MicrojobStatus::Assigned);
        assert_eq!(
            store.get_microjob(job.id).await.unwrap().unwrap().status,
            MicrojobStatus::Assigned
        );
        assert!(store
            .update_microjob_status(9_999, MicrojobStatus::Completed)
            .await
            .unwrap()
            .is_none());
    }

    async fn proposals(store: &dyn Storage) {
        let proposal = store.create_proposal(new_proposal()).await.unwrap();
        assert_eq!((proposal.votes_for, proposal.votes_against), (0, 0));
        assert_eq!(proposal.status, ProposalStatus::Active);

        let mut latest = proposal.clone();
        for _ in 0..10 {
            latest = store
                .vote_on_proposal(proposal.id, Vote::For)
                .await
                .unwrap()
                .unwrap();
        }
        assert_eq!(latest.status, ProposalStatus::Active);

        latest = store
            .vote_on_proposal(proposal.id, Vote::For)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(latest.votes_for, 11);
        assert_eq!(latest.status, ProposalStatus::Passed);
        assert_eq!(store.get_proposal(proposal.id).await.unwrap(), Some(latest));

        assert!(store.vote_on_proposal(9_999, Vote::Against).await.unwrap().is_none());
        assert_eq!(store.list_proposals().await.unwrap().len(), 1);
    }

    async fn liquidity(store: &dyn Storage) {
        let low = store.create_liquidity_pool(new_pool(RiskLevel::Low)).await.unwrap();
        store.create_liquidity_pool(new_pool(RiskLevel::High)).await.unwrap();
        let low2 = store.create_liquidity_pool(new_pool(RiskLevel::Low)).await.unwrap();

        let lows = store.list_liquidity_pools(Some(RiskLevel::Low)).await.unwrap();
        assert_eq!(lows.iter().map(|p| p.id).collect::<Vec<_>>(), vec![low.id, low2.id]);
        assert!(lows.iter().all(|p| p.risk == RiskLevel::Low));

        let mediums = store.list_liquidity_pools(Some(RiskLevel::Medium)).await.unwrap();
        assert!(mediums.is_empty());
        assert_eq!(store.list_liquidity_pools(None).await.unwrap().len(), 3);
        assert_eq!(store.get_liquidity_pool(low.id).await.unwrap(), Some(low));
    }
}
