//! SQLite database layer (embedded, no external dependencies)

use agro_core::governance;
use agro_core::{
    AgroError, BarterOffer, BarterStatus, DaoProposal, Id, LiquidityPool, MarketplaceItem,
    Microjob, MicrojobStatus, NewBarterOffer, NewLiquidityPool, NewMarketplaceItem, NewMicrojob,
    NewProposal, NewUser, Result, RiskLevel, Storage, User, Vote,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::sync::Arc;

const USER_COLUMNS: &str = "id, username, password, full_name, user_type, location, \
     wallet_address, bio, verified, profile_image, created_at";

const ITEM_COLUMNS: &str = "id, user_id, title, description, category, price, unit, quantity, \
     location, image_url, is_available, created_at";

const OFFER_COLUMNS: &str =
    "id, offer_user_id, receive_user_id, offer_item_id, request_item_id, status, created_at";

const JOB_COLUMNS: &str = "id, user_id, title, description, skills_required, compensation, \
     location, duration, status, created_at";

const PROPOSAL_COLUMNS: &str =
    "id, user_id, title, description, votes_for, votes_against, status, created_at, ends_at";

const POOL_COLUMNS: &str = "id, name, description, pool_type, total_liquidity, asset, apy, \
     participants, risk, duration, created_at, user_id, image_url";

pub struct Database {
    pool: Arc<SqlitePool>,
}

impl Database {
    pub async fn new(database_path: &str) -> anyhow::Result<Self> {
        use anyhow::Context;

        tracing::info!("Opening SQLite database at: {}", database_path);

        // Create parent directory if needed
        if let Some(parent) = std::path::Path::new(database_path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create database directory: {}", parent.display())
                })?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            // Writers queue on the database lock instead of failing with SQLITE_BUSY.
            .busy_timeout(std::time::Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .with_context(|| {
                format!("Failed to connect to SQLite database at: {}", database_path)
            })?;

        tracing::info!("SQLite connection established, running migrations...");

        Self::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        tracing::info!("Database initialization complete");

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Private database that lives as long as its single connection
    pub async fn in_memory() -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::run_migrations(&pool).await?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        let statements = [
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL,
                full_name TEXT NOT NULL,
                user_type TEXT NOT NULL,
                location TEXT NOT NULL,
                wallet_address TEXT,
                bio TEXT,
                verified BOOLEAN NOT NULL DEFAULT 0,
                profile_image TEXT,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS marketplace_items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                category TEXT NOT NULL,
                price REAL NOT NULL,
                unit TEXT NOT NULL,
                quantity REAL NOT NULL,
                location TEXT NOT NULL,
                image_url TEXT,
                is_available BOOLEAN NOT NULL DEFAULT 1,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS barter_offers (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                offer_user_id INTEGER NOT NULL,
                receive_user_id INTEGER NOT NULL,
                offer_item_id INTEGER NOT NULL,
                request_item_id INTEGER NOT NULL,
                status TEXT NOT NULL DEFAULT 'pending',
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS microjobs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                skills_required TEXT NOT NULL,
                compensation REAL NOT NULL,
                location TEXT NOT NULL,
                duration TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'open',
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS dao_proposals (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                votes_for INTEGER NOT NULL DEFAULT 0,
                votes_against INTEGER NOT NULL DEFAULT 0,
                status TEXT NOT NULL DEFAULT 'active',
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                ends_at DATETIME NOT NULL
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS liquidity_pools (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                pool_type TEXT NOT NULL,
                total_liquidity REAL NOT NULL,
                asset TEXT NOT NULL,
                apy REAL NOT NULL,
                participants INTEGER NOT NULL,
                risk TEXT NOT NULL,
                duration TEXT NOT NULL,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                user_id INTEGER NOT NULL,
                image_url TEXT
            )
            "#,
        ];

        for statement in statements {
            sqlx::query(statement)
                .execute(pool)
                .await
                .map_err(db_err)?;
        }

        Ok(())
    }
}

#[async_trait]
impl Storage for Database {
    async fn create_user(&self, user: NewUser) -> Result<User> {
        let row: UserRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO users (username, password, full_name, user_type, location,
                               wallet_address, bio, verified, profile_image, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0, ?8, ?9)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&user.username)
        .bind(&user.password)
        .bind(&user.full_name)
        .bind(user.user_type.as_str())
        .bind(&user.location)
        .bind(&user.wallet_address)
        .bind(&user.bio)
        .bind(&user.profile_image)
        .bind(Utc::now())
        .fetch_one(&*self.pool)
        .await
        .map_err(db_err)?;

        row.try_into()
    }

    async fn get_user(&self, id: Id) -> Result<Option<User>> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"))
                .bind(id)
                .fetch_optional(&*self.pool)
                .await
                .map_err(db_err)?;

        row.map(User::try_from).transpose()
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1"))
                .bind(username)
                .fetch_optional(&*self.pool)
                .await
                .map_err(db_err)?;

        row.map(User::try_from).transpose()
    }

    async fn list_marketplace_items(&self) -> Result<Vec<MarketplaceItem>> {
        let rows: Vec<ItemRow> =
            sqlx::query_as(&format!("SELECT {ITEM_COLUMNS} FROM marketplace_items ORDER BY id"))
                .fetch_all(&*self.pool)
                .await
                .map_err(db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_marketplace_item(&self, id: Id) -> Result<Option<MarketplaceItem>> {
        let row: Option<ItemRow> = sqlx::query_as(&format!(
            "SELECT {ITEM_COLUMNS} FROM marketplace_items WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&*self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.map(Into::into))
    }

    async fn list_marketplace_items_by_user(&self, user_id: Id) -> Result<Vec<MarketplaceItem>> {
        let rows: Vec<ItemRow> = sqlx::query_as(&format!(
            "SELECT {ITEM_COLUMNS} FROM marketplace_items WHERE user_id = ?1 ORDER BY id"
        ))
        .bind(user_id)
        .fetch_all(&*self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_marketplace_items_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<MarketplaceItem>> {
        let rows: Vec<ItemRow> = sqlx::query_as(&format!(
            "SELECT {ITEM_COLUMNS} FROM marketplace_items WHERE category = ?1 ORDER BY id"
        ))
        .bind(category)
        .fetch_all(&*self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create_marketplace_item(&self, item: NewMarketplaceItem) -> Result<MarketplaceItem> {
        let row: ItemRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO marketplace_items (user_id, title, description, category, price, unit,
                                           quantity, location, image_url, is_available, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 1, ?10)
            RETURNING {ITEM_COLUMNS}
            "#
        ))
        .bind(item.user_id)
        .bind(&item.title)
        .bind(&item.description)
        .bind(&item.category)
        .bind(item.price)
        .bind(&item.unit)
        .bind(item.quantity)
        .bind(&item.location)
        .bind(&item.image_url)
        .bind(Utc::now())
        .fetch_one(&*self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.into())
    }

    async fn list_barter_offers(&self) -> Result<Vec<BarterOffer>> {
        let rows: Vec<OfferRow> =
            sqlx::query_as(&format!("SELECT {OFFER_COLUMNS} FROM barter_offers ORDER BY id"))
                .fetch_all(&*self.pool)
                .await
                .map_err(db_err)?;

        rows.into_iter().map(BarterOffer::try_from).collect()
    }

    async fn get_barter_offer(&self, id: Id) -> Result<Option<BarterOffer>> {
        let row: Option<OfferRow> =
            sqlx::query_as(&format!("SELECT {OFFER_COLUMNS} FROM barter_offers WHERE id = ?1"))
                .bind(id)
                .fetch_optional(&*self.pool)
                .await
                .map_err(db_err)?;

        row.map(BarterOffer::try_from).transpose()
    }

    async fn list_barter_offers_by_user(&self, user_id: Id) -> Result<Vec<BarterOffer>> {
        let rows: Vec<OfferRow> = sqlx::query_as(&format!(
            r#"
            SELECT {OFFER_COLUMNS} FROM barter_offers
            WHERE offer_user_id = ?1 OR receive_user_id = ?1
            ORDER BY id
            "#
        ))
        .bind(user_id)
        .fetch_all(&*self.pool)
        .await
        .map_err(db_err)?;

        rows.into_iter().map(BarterOffer::try_from).collect()
    }

    async fn create_barter_offer(&self, offer: NewBarterOffer) -> Result<BarterOffer> {
        let row: OfferRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO barter_offers (offer_user_id, receive_user_id, offer_item_id,
                                       request_item_id, status, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            RETURNING {OFFER_COLUMNS}
            "#
        ))
        .bind(offer.offer_user_id)
        .bind(offer.receive_user_id)
        .bind(offer.offer_item_id)
        .bind(offer.request_item_id)
        .bind(BarterStatus::Pending.as_str())
        .bind(Utc::now())
        .fetch_one(&*self.pool)
        .await
        .map_err(db_err)?;

        row.try_into()
    }

    async fn update_barter_offer_status(
        &self,
        id: Id,
        status: BarterStatus,
    ) -> Result<Option<BarterOffer>> {
        let row: Option<OfferRow> = sqlx::query_as(&format!(
            "UPDATE barter_offers SET status = ?1 WHERE id = ?2 RETURNING {OFFER_COLUMNS}"
        ))
        .bind(status.as_str())
        .bind(id)
        .fetch_optional(&*self.pool)
        .await
        .map_err(db_err)?;

        row.map(BarterOffer::try_from).transpose()
    }

    async fn list_microjobs(&self) -> Result<Vec<Microjob>> {
        let rows: Vec<JobRow> =
            sqlx::query_as(&format!("SELECT {JOB_COLUMNS} FROM microjobs ORDER BY id"))
                .fetch_all(&*self.pool)
                .await
                .map_err(db_err)?;

        rows.into_iter().map(Microjob::try_from).collect()
    }

    async fn get_microjob(&self, id: Id) -> Result<Option<Microjob>> {
        let row: Option<JobRow> =
            sqlx::query_as(&format!("SELECT {JOB_COLUMNS} FROM microjobs WHERE id = ?1"))
                .bind(id)
                .fetch_optional(&*self.pool)
                .await
                .map_err(db_err)?;

        row.map(Microjob::try_from).transpose()
    }

    async fn list_microjobs_by_user(&self, user_id: Id) -> Result<Vec<Microjob>> {
        let rows: Vec<JobRow> = sqlx::query_as(&format!(
            "SELECT {JOB_COLUMNS} FROM microjobs WHERE user_id = ?1 ORDER BY id"
        ))
        .bind(user_id)
        .fetch_all(&*self.pool)
        .await
        .map_err(db_err)?;

        rows.into_iter().map(Microjob::try_from).collect()
    }

    async fn create_microjob(&self, job: NewMicrojob) -> Result<Microjob> {
        let row: JobRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO microjobs (user_id, title, description, skills_required, compensation,
                                   location, duration, status, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            RETURNING {JOB_COLUMNS}
            "#
        ))
        .bind(job.user_id)
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.skills_required)
        .bind(job.compensation)
        .bind(&job.location)
        .bind(&job.duration)
        .bind(MicrojobStatus::Open.as_str())
        .bind(Utc::now())
        .fetch_one(&*self.pool)
        .await
        .map_err(db_err)?;

        row.try_into()
    }

    async fn update_microjob_status(
        &self,
        id: Id,
        status: MicrojobStatus,
    ) -> Result<Option<Microjob>> {
        let row: Option<JobRow> = sqlx::query_as(&format!(
            "UPDATE microjobs SET status = ?1 WHERE id = ?2 RETURNING {JOB_COLUMNS}"
        ))
        .bind(status.as_str())
        .bind(id)
        .fetch_optional(&*self.pool)
        .await
        .map_err(db_err)?;

        row.map(Microjob::try_from).transpose()
    }

    async fn list_proposals(&self) -> Result<Vec<DaoProposal>> {
        let rows: Vec<ProposalRow> =
            sqlx::query_as(&format!("SELECT {PROPOSAL_COLUMNS} FROM dao_proposals ORDER BY id"))
                .fetch_all(&*self.pool)
                .await
                .map_err(db_err)?;

        rows.into_iter().map(DaoProposal::try_from).collect()
    }

    async fn get_proposal(&self, id: Id) -> Result<Option<DaoProposal>> {
        let row: Option<ProposalRow> = sqlx::query_as(&format!(
            "SELECT {PROPOSAL_COLUMNS} FROM dao_proposals WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&*self.pool)
        .await
        .map_err(db_err)?;

        row.map(DaoProposal::try_from).transpose()
    }

    async fn create_proposal(&self, proposal: NewProposal) -> Result<DaoProposal> {
        let row: ProposalRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO dao_proposals (user_id, title, description, votes_for, votes_against,
                                       status, created_at, ends_at)
            VALUES (?1, ?2, ?3, 0, 0, ?4, ?5, ?6)
            RETURNING {PROPOSAL_COLUMNS}
            "#
        ))
        .bind(proposal.user_id)
        .bind(&proposal.title)
        .bind(&proposal.description)
        .bind(agro_core::ProposalStatus::Active.as_str())
        .bind(Utc::now())
        .bind(proposal.ends_at)
        .fetch_one(&*self.pool)
        .await
        .map_err(db_err)?;

        row.try_into()
    }

    async fn vote_on_proposal(&self, id: Id, vote: Vote) -> Result<Option<DaoProposal>> {
        let (add_for, add_against) = match vote {
            Vote::For => (1, 0),
            Vote::Against => (0, 1),
        };

        // The increment comes first so the transaction holds the write lock
        // before the status is derived from the new tallies.
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let row: Option<ProposalRow> = sqlx::query_as(&format!(
            r#"
            UPDATE dao_proposals
            SET votes_for = votes_for + ?1, votes_against = votes_against + ?2
            WHERE id = ?3
            RETURNING {PROPOSAL_COLUMNS}
            "#
        ))
        .bind(add_for)
        .bind(add_against)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_err)?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut proposal = DaoProposal::try_from(row)?;

        let status =
            governance::evaluate(proposal.votes_for, proposal.votes_against, proposal.status);
        if status != proposal.status {
            sqlx::query("UPDATE dao_proposals SET status = ?1 WHERE id = ?2")
                .bind(status.as_str())
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(db_err)?;
            proposal.status = status;
        }

        tx.commit().await.map_err(db_err)?;

        Ok(Some(proposal))
    }

    async fn list_liquidity_pools(&self, risk: Option<RiskLevel>) -> Result<Vec<LiquidityPool>> {
        let rows: Vec<PoolRow> = match risk {
            Some(risk) => {
                sqlx::query_as::<_, PoolRow>(&format!(
                    "SELECT {POOL_COLUMNS} FROM liquidity_pools WHERE risk = ?1 ORDER BY id"
                ))
                .bind(risk.as_str())
                .fetch_all(&*self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, PoolRow>(&format!(
                    "SELECT {POOL_COLUMNS} FROM liquidity_pools ORDER BY id"
                ))
                .fetch_all(&*self.pool)
                .await
            }
        }
        .map_err(db_err)?;

        rows.into_iter().map(LiquidityPool::try_from).collect()
    }

    async fn get_liquidity_pool(&self, id: Id) -> Result<Option<LiquidityPool>> {
        let row: Option<PoolRow> = sqlx::query_as(&format!(
            "SELECT {POOL_COLUMNS} FROM liquidity_pools WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&*self.pool)
        .await
        .map_err(db_err)?;

        row.map(LiquidityPool::try_from).transpose()
    }

    async fn create_liquidity_pool(&self, pool: NewLiquidityPool) -> Result<LiquidityPool> {
        let row: PoolRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO liquidity_pools (name, description, pool_type, total_liquidity, asset,
                                         apy, participants, risk, duration, created_at,
                                         user_id, image_url)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            RETURNING {POOL_COLUMNS}
            "#
        ))
        .bind(&pool.name)
        .bind(&pool.description)
        .bind(&pool.pool_type)
        .bind(pool.total_liquidity)
        .bind(&pool.asset)
        .bind(pool.apy)
        .bind(pool.participants)
        .bind(pool.risk.as_str())
        .bind(&pool.duration)
        .bind(Utc::now())
        .bind(pool.user_id)
        .bind(&pool.image_url)
        .fetch_one(&*self.pool)
        .await
        .map_err(db_err)?;

        row.try_into()
    }
}

/// Unique-constraint failures become conflicts, everything else is a
/// database error.
fn db_err(e: sqlx::Error) -> AgroError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AgroError::Conflict(db.message().to_string())
        }
        _ => AgroError::Database(e.to_string()),
    }
}

// Helper structs for sqlx query_as
#[derive(sqlx::FromRow)]
struct UserRow {
    id: Id,
    username: String,
    password: String,
    full_name: String,
    user_type: String,
    location: String,
    wallet_address: Option<String>,
    bio: Option<String>,
    verified: bool,
    profile_image: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = AgroError;

    fn try_from(r: UserRow) -> Result<Self> {
        Ok(User {
            id: r.id,
            username: r.username,
            password: r.password,
            full_name: r.full_name,
            user_type: r.user_type.parse()?,
            location: r.location,
            wallet_address: r.wallet_address,
            bio: r.bio,
            verified: r.verified,
            profile_image: r.profile_image,
            created_at: r.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ItemRow {
    id: Id,
    user_id: Id,
    title: String,
    description: String,
    category: String,
    price: f64,
    unit: String,
    quantity: f64,
    location: String,
    image_url: Option<String>,
    is_available: bool,
    created_at: DateTime<Utc>,
}

impl From<ItemRow> for MarketplaceItem {
    fn from(r: ItemRow) -> Self {
        MarketplaceItem {
            id: r.id,
            user_id: r.user_id,
            title: r.title,
            description: r.description,
            category: r.category,
            price: r.price,
            unit: r.unit,
            quantity: r.quantity,
            location: r.location,
            image_url: r.image_url,
            is_available: r.is_available,
            created_at: r.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OfferRow {
    id: Id,
    offer_user_id: Id,
    receive_user_id: Id,
    offer_item_id: Id,
    request_item_id: Id,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<OfferRow> for BarterOffer {
    type Error = AgroError;

    fn try_from(r: OfferRow) -> Result<Self> {
        Ok(BarterOffer {
            id: r.id,
            offer_user_id: r.offer_user_id,
            receive_user_id: r.receive_user_id,
            offer_item_id: r.offer_item_id,
            request_item_id: r.request_item_id,
            status: r.status.parse()?,
            created_at: r.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct JobRow {
    id: Id,
    user_id: Id,
    title: String,
    description: String,
    skills_required: String,
    compensation: f64,
    location: String,
    duration: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<JobRow> for Microjob {
    type Error = AgroError;

    fn try_from(r: JobRow) -> Result<Self> {
        Ok(Microjob {
            id: r.id,
            user_id: r.user_id,
            title: r.title,
            description: r.description,
            skills_required: r.skills_required,
            compensation: r.compensation,
            location: r.location,
            duration: r.duration,
            status: r.status.parse()?,
            created_at: r.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ProposalRow {
    id: Id,
    user_id: Id,
    title: String,
    description: String,
    votes_for: i64,
    votes_against: i64,
    status: String,
    created_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
}

impl TryFrom<ProposalRow> for DaoProposal {
    type Error = AgroError;

    fn try_from(r: ProposalRow) -> Result<Self> {
        Ok(DaoProposal {
            id: r.id,
            user_id: r.user_id,
            title: r.title,
            description: r.description,
            votes_for: r.votes_for,
            votes_against: r.votes_against,
            status: r.status.parse()?,
            created_at: r.created_at,
            ends_at: r.ends_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct PoolRow {
    id: Id,
    name: String,
    description: String,
    pool_type: String,
    total_liquidity: f64,
    asset: String,
    apy: f64,
    participants: i64,
    risk: String,
    duration: String,
    created_at: DateTime<Utc>,
    user_id: Id,
    image_url: Option<String>,
}

impl TryFrom<PoolRow> for LiquidityPool {
    type Error = AgroError;

    fn try_from(r: PoolRow) -> Result<Self> {
        Ok(LiquidityPool {
            id: r.id,
            name: r.name,
            description: r.description,
            pool_type: r.pool_type,
            total_liquidity: r.total_liquidity,
            asset: r.asset,
            apy: r.apy,
            participants: r.participants,
            risk: r.risk.parse()?,
            duration: r.duration,
            created_at: r.created_at,
            user_id: r.user_id,
            image_url: r.image_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::conformance;

    #[tokio::test]
    async fn test_conformance() {
        let db = Database::in_memory().await.unwrap();
        conformance::run_all(&db).await;
    }

    #[tokio::test]
    async fn test_rejected_proposal_persists_status() {
        let db = Database::in_memory().await.unwrap();
        let proposal = db.create_proposal(conformance::new_proposal()).await.unwrap();

        for _ in 0..11 {
            db.vote_on_proposal(proposal.id, Vote::Against).await.unwrap();
        }

        let stored = db.get_proposal(proposal.id).await.unwrap().unwrap();
        assert_eq!(stored.votes_against, 11);
        assert_eq!(stored.status, agro_core::ProposalStatus::Rejected);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_votes_are_not_lost() {
        let dir = std::env::temp_dir().join(format!("agrochain-votes-{}", std::process::id()));
        let path = dir.join("agrochain.db").to_string_lossy().to_string();

        let db = Arc::new(Database::new(&path).await.unwrap());
        let proposal = db.create_proposal(conformance::new_proposal()).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..40 {
            let db = db.clone();
            handles.push(tokio::spawn(async move {
                db.vote_on_proposal(proposal.id, Vote::For).await
            }));
        }
        for handle in handles {
            let voted = handle.await.unwrap().unwrap();
            assert!(voted.is_some());
        }

        let stored = db.get_proposal(proposal.id).await.unwrap().unwrap();
        assert_eq!(stored.votes_for, 40);
        assert_eq!(stored.status, agro_core::ProposalStatus::Passed);

        drop(db);
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn test_file_database_reopens() {
        let dir = std::env::temp_dir().join(format!("agrochain-db-{}", std::process::id()));
        let path = dir.join("agrochain.db");
        let path = path.to_string_lossy().to_string();

        let id = {
            let db = Database::new(&path).await.unwrap();
            db.create_microjob(conformance::new_job(7)).await.unwrap().id
        };

        let db = Database::new(&path).await.unwrap();
        let job = db.get_microjob(id).await.unwrap().unwrap();
        assert_eq!(job.user_id, 7);

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
