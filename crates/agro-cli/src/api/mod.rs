//! API client for the AgroChain server
//!
//! GET responses are cached for the life of the client; any POST or PATCH
//! evicts the cached reads of the collection it touched.

mod cache;

use cache::{collection_of, ResponseCache};

use agro_types::{
    BarterOffer, BarterStatus, DaoProposal, Id, LiquidityPool, MarketplaceItem, Microjob,
    MicrojobStatus, NewBarterOffer, NewLiquidityPool, NewMarketplaceItem, NewMicrojob,
    NewProposal, NewUser, RiskLevel, User, Vote,
};
use anyhow::{Context, Result};
use reqwest::{Client as ReqwestClient, RequestBuilder, Url};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use tracing::debug;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

pub struct ApiClient {
    http: ReqwestClient,
    base_url: String,
    cache: ResponseCache,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: ReqwestClient::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            cache: ResponseCache::new(),
        }
    }

    pub async fn health(&self) -> Result<Value> {
        self.get("/health", &[]).await
    }

    // Users

    pub async fn create_user(&self, user: &NewUser) -> Result<User> {
        self.post("/api/users", user).await
    }

    pub async fn get_user(&self, id: Id) -> Result<User> {
        self.get(&format!("/api/users/{}", id), &[]).await
    }

    // Marketplace

    pub async fn list_marketplace_items(
        &self,
        category: Option<&str>,
        user_id: Option<Id>,
    ) -> Result<Vec<MarketplaceItem>> {
        let user_id = user_id.map(|id| id.to_string());
        self.get(
            "/api/marketplace",
            &[("category", category), ("userId", user_id.as_deref())],
        )
        .await
    }

    pub async fn get_marketplace_item(&self, id: Id) -> Result<MarketplaceItem> {
        self.get(&format!("/api/marketplace/{}", id), &[]).await
    }

    pub async fn create_marketplace_item(
        &self,
        item: &NewMarketplaceItem,
    ) -> Result<MarketplaceItem> {
        self.post("/api/marketplace", item).await
    }

    // Barter

    pub async fn list_barter_offers(&self, user_id: Option<Id>) -> Result<Vec<BarterOffer>> {
        let user_id = user_id.map(|id| id.to_string());
        self.get("/api/barter", &[("userId", user_id.as_deref())]).await
    }

    pub async fn get_barter_offer(&self, id: Id) -> Result<BarterOffer> {
        self.get(&format!("/api/barter/{}", id), &[]).await
    }

    pub async fn create_barter_offer(&self, offer: &NewBarterOffer) -> Result<BarterOffer> {
        self.post("/api/barter", offer).await
    }

    pub async fn update_barter_status(&self, id: Id, status: BarterStatus) -> Result<BarterOffer> {
        self.patch(
            &format!("/api/barter/{}/status", id),
            &json!({ "status": status }),
        )
        .await
    }

    // Microjobs

    pub async fn list_microjobs(&self, user_id: Option<Id>) -> Result<Vec<Microjob>> {
        let user_id = user_id.map(|id| id.to_string());
        self.get("/api/microjobs", &[("userId", user_id.as_deref())]).await
    }

    pub async fn get_microjob(&self, id: Id) -> Result<Microjob> {
        self.get(&format!("/api/microjobs/{}", id), &[]).await
    }

    pub async fn create_microjob(&self, job: &NewMicrojob) -> Result<Microjob> {
        self.post("/api/microjobs", job).await
    }

    pub async fn update_microjob_status(&self, id: Id, status: MicrojobStatus) -> Result<Microjob> {
        self.patch(
            &format!("/api/microjobs/{}/status", id),
            &json!({ "status": status }),
        )
        .await
    }

    // DAO

    pub async fn list_proposals(&self) -> Result<Vec<DaoProposal>> {
        self.get("/api/dao/proposals", &[]).await
    }

    pub async fn get_proposal(&self, id: Id) -> Result<DaoProposal> {
        self.get(&format!("/api/dao/proposals/{}", id), &[]).await
    }

    pub async fn create_proposal(&self, proposal: &NewProposal) -> Result<DaoProposal> {
        self.post("/api/dao/proposals", proposal).await
    }

    pub async fn vote(&self, id: Id, vote: Vote) -> Result<DaoProposal> {
        self.post(
            &format!("/api/dao/proposals/{}/vote", id),
            &json!({ "vote": vote }),
        )
        .await
    }

    // Liquidity pools

    pub async fn list_liquidity_pools(
        &self,
        risk: Option<RiskLevel>,
    ) -> Result<Vec<LiquidityPool>> {
        self.get(
            "/api/liquidity/pools",
            &[("risk", risk.as_ref().map(RiskLevel::as_str))],
        )
        .await
    }

    pub async fn get_liquidity_pool(&self, id: Id) -> Result<LiquidityPool> {
        self.get(&format!("/api/liquidity/pools/{}", id), &[]).await
    }

    pub async fn create_liquidity_pool(&self, pool: &NewLiquidityPool) -> Result<LiquidityPool> {
        self.post("/api/liquidity/pools", pool).await
    }

    // Transport

    fn url(&self, path: &str, query: &[(&str, Option<&str>)]) -> Result<Url> {
        let raw = format!("{}{}", self.base_url, path);
        let params: Vec<(&str, &str)> = query
            .iter()
            .filter_map(|(key, value)| value.map(|v| (*key, v)))
            .collect();

        let url = if params.is_empty() {
            Url::parse(&raw)
        } else {
            Url::parse_with_params(&raw, &params)
        };
        url.with_context(|| format!("Invalid server URL: {}", self.base_url))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, Option<&str>)],
    ) -> Result<T> {
        let url = self.url(path, query)?;
        let key = cache_key(&url);

        let value = match self.cache.get(&key) {
            Some(value) => {
                debug!("Cache hit: {}", key);
                value
            }
            None => {
                let value = self.send(self.http.get(url)).await?;
                self.cache.put(key, value.clone());
                value
            }
        };

        serde_json::from_value(value).context("Failed to parse server response")
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path, &[])?;
        let value = self.send(self.http.post(url.clone()).json(body)).await;
        self.evict(&url);
        serde_json::from_value(value?).context("Failed to parse server response")
    }

    async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path, &[])?;
        let value = self.send(self.http.patch(url.clone()).json(body)).await;
        self.evict(&url);
        serde_json::from_value(value?).context("Failed to parse server response")
    }

    fn evict(&self, url: &Url) {
        let collection = collection_of(url.path());
        let removed = self.cache.invalidate(&collection);
        debug!("Invalidated {} cached reads under {}", removed, collection);
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value> {
        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to reach server at {}", self.base_url))?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let error: Value = serde_json::from_str(&body).unwrap_or_default();
            anyhow::bail!("{}", error_message(status, &error));
        }

        serde_json::from_str(&body).context("Failed to parse server response")
    }
}

fn cache_key(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}

/// Server `message` plus any validation details
fn error_message(status: reqwest::StatusCode, error: &Value) -> String {
    let mut message = format!(
        "{} ({})",
        error["message"].as_str().unwrap_or("Request failed"),
        status
    );

    if let Some(details) = error["details"].as_array() {
        for issue in details {
            let path: Vec<&str> = issue["path"]
                .as_array()
                .map(|p| p.iter().filter_map(Value::as_str).collect())
                .unwrap_or_default();
            message.push_str(&format!(
                "\n  {}: {}",
                path.join("."),
                issue["message"].as_str().unwrap_or("invalid")
            ));
        }
    }

    message
}
