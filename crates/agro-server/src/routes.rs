//! HTTP routing

use crate::handlers;
use crate::AppState;
use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api_routes())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(handlers::users::create))
        .route("/users/:id", get(handlers::users::get))
        .route(
            "/marketplace",
            get(handlers::marketplace::list).post(handlers::marketplace::create),
        )
        .route("/marketplace/:id", get(handlers::marketplace::get))
        .route(
            "/barter",
            get(handlers::barter::list).post(handlers::barter::create),
        )
        .route("/barter/:id", get(handlers::barter::get))
        .route("/barter/:id/status", patch(handlers::barter::update_status))
        .route(
            "/microjobs",
            get(handlers::microjobs::list).post(handlers::microjobs::create),
        )
        .route("/microjobs/:id", get(handlers::microjobs::get))
        .route(
            "/microjobs/:id/status",
            patch(handlers::microjobs::update_status),
        )
        .route(
            "/dao/proposals",
            get(handlers::dao::list).post(handlers::dao::create),
        )
        .route("/dao/proposals/:id", get(handlers::dao::get))
        .route("/dao/proposals/:id/vote", post(handlers::dao::vote))
        .route(
            "/liquidity/pools",
            get(handlers::liquidity::list).post(handlers::liquidity::create),
        )
        .route("/liquidity/pools/:id", get(handlers::liquidity::get))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageBackend;
    use crate::storage::{Database, MemoryStorage};
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn memory_app() -> Router {
        app(AppState::new(
            Arc::new(MemoryStorage::new()),
            StorageBackend::Memory,
        ))
    }

    async fn sqlite_app() -> Router {
        let db = Database::in_memory().await.unwrap();
        app(AppState::new(Arc::new(db), StorageBackend::Sqlite))
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
        send(app, Method::GET, uri, None).await
    }

    async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        send(app, Method::POST, uri, Some(body)).await
    }

    async fn patch(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        send(app, Method::PATCH, uri, Some(body)).await
    }

    fn user_body(username: &str) -> Value {
        json!({
            "username": username,
            "password": "hunter2",
            "fullName": "John Farmer",
            "userType": "farmer",
            "location": "Rural County, Midwest",
            "walletAddress": "0x1234567890abcdef"
        })
    }

    fn item_body(user_id: i64, category: &str) -> Value {
        json!({
            "userId": user_id,
            "title": "Organic wheat seeds",
            "description": "High-yield, drought resistant",
            "category": category,
            "price": 45.5,
            "unit": "kg",
            "quantity": 100,
            "location": "Midwest"
        })
    }

    fn proposal_body() -> Value {
        json!({
            "userId": 1,
            "title": "Community seed bank",
            "description": "Fund a shared seed bank",
            "endsAt": "2030-01-01T00:00:00Z"
        })
    }

    fn pool_body(risk: &str) -> Value {
        json!({
            "name": "Harvest yield",
            "description": "Seasonal yield pool",
            "poolType": "yield",
            "totalLiquidity": 250000,
            "asset": "wheat",
            "apy": 8.5,
            "participants": 42,
            "risk": risk,
            "duration": "6 months",
            "userId": 1
        })
    }

    #[tokio::test]
    async fn test_health() {
        let app = memory_app();
        let (status, body) = get(&app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["storage"], "memory");
    }

    #[tokio::test]
    async fn test_register_user_hides_password() {
        let app = memory_app();
        let (status, user) = post(&app, "/api/users", user_body("farmer_john")).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(user["username"], "farmer_john");
        assert_eq!(user["verified"], false);
        assert!(user.get("password").is_none());
        assert!(user["createdAt"].is_string());

        let uri = format!("/api/users/{}", user["id"]);
        let (status, fetched) = get(&app, &uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, user);
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let app = memory_app();
        post(&app, "/api/users", user_body("farmer_john")).await;
        let (status, body) = post(&app, "/api/users", user_body("farmer_john")).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["message"], "Username already exists");
    }

    #[tokio::test]
    async fn test_unknown_and_malformed_ids() {
        let app = memory_app();
        let (status, body) = get(&app, "/api/users/999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "User not found");

        let (status, body) = get(&app, "/api/marketplace/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("abc"));

        let (status, _) = get(&app, "/api/liquidity/pools/42").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_listing_is_rejected_and_not_stored() {
        let app = memory_app();
        let mut body = item_body(1, "seed");
        body.as_object_mut().unwrap().remove("price");

        let (status, error) = post(&app, "/api/marketplace", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["message"], "Validation error");
        assert_eq!(error["details"][0]["path"], json!(["price"]));

        let (_, items) = get(&app, "/api/marketplace").await;
        assert_eq!(items, json!([]));
    }

    #[tokio::test]
    async fn test_marketplace_filters() {
        let app = memory_app();
        post(&app, "/api/marketplace", item_body(1, "seed")).await;
        post(&app, "/api/marketplace", item_body(2, "tool")).await;
        post(&app, "/api/marketplace", item_body(2, "seed")).await;

        let (_, all) = get(&app, "/api/marketplace?category=").await;
        assert_eq!(all.as_array().unwrap().len(), 3);

        let (_, seeds) = get(&app, "/api/marketplace?category=seed").await;
        assert_eq!(seeds.as_array().unwrap().len(), 2);

        let (_, mine) = get(&app, "/api/marketplace?userId=2").await;
        assert_eq!(mine.as_array().unwrap().len(), 2);

        let (_, both) = get(&app, "/api/marketplace?category=seed&userId=2").await;
        assert_eq!(both.as_array().unwrap().len(), 1);
        assert_eq!(both[0]["userId"], 2);
    }

    #[tokio::test]
    async fn test_blank_or_malformed_user_filter_lists_everything() {
        let app = memory_app();
        post(&app, "/api/marketplace", item_body(1, "seed")).await;
        post(&app, "/api/marketplace", item_body(2, "seed")).await;
        let offer = json!({
            "offerUserId": 1,
            "receiveUserId": 2,
            "offerItemId": 10,
            "requestItemId": 20
        });
        post(&app, "/api/barter", offer).await;

        for uri in [
            "/api/barter?userId=",
            "/api/barter?userId=abc",
            "/api/microjobs?userId=",
            "/api/microjobs?userId=abc",
        ] {
            let (status, body) = get(&app, uri).await;
            assert_eq!(status, StatusCode::OK, "{}", uri);
            assert!(body.is_array(), "{}", uri);
        }

        let (_, offers) = get(&app, "/api/barter?userId=").await;
        assert_eq!(offers.as_array().unwrap().len(), 1);

        let (status, seeds) = get(&app, "/api/marketplace?userId=&category=seed").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(seeds.as_array().unwrap().len(), 2);

        let (_, all) = get(&app, "/api/marketplace?userId=abc").await;
        assert_eq!(all.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_barter_status_update() {
        let app = sqlite_app().await;
        let offer = json!({
            "offerUserId": 1,
            "receiveUserId": 2,
            "offerItemId": 10,
            "requestItemId": 20
        });
        let (status, created) = post(&app, "/api/barter", offer).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["status"], "pending");

        let uri = format!("/api/barter/{}/status", created["id"]);
        let (status, updated) = patch(&app, &uri, json!({ "status": "accepted" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["status"], "accepted");

        let (status, body) = patch(&app, &uri, json!({ "status": "maybe" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid status value");

        let (_, fetched) = get(&app, &format!("/api/barter/{}", created["id"])).await;
        assert_eq!(fetched["status"], "accepted");

        let (_, for_receiver) = get(&app, "/api/barter?userId=2").await;
        assert_eq!(for_receiver.as_array().unwrap().len(), 1);
        let (_, for_stranger) = get(&app, "/api/barter?userId=7").await;
        assert_eq!(for_stranger, json!([]));

        let rejected = json!({ "status": "rejected" });
        let (status, _) = patch(&app, "/api/barter/999/status", rejected).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_microjob_lifecycle() {
        let app = memory_app();
        let job = json!({
            "userId": 3,
            "title": "Harvest helper",
            "description": "Two days of corn harvest",
            "skillsRequired": "harvesting",
            "compensation": 120,
            "location": "Midwest",
            "duration": "2 days"
        });
        let (status, created) = post(&app, "/api/microjobs", job).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["status"], "open");

        let uri = format!("/api/microjobs/{}/status", created["id"]);
        let (_, assigned) = patch(&app, &uri, json!({ "status": "assigned" })).await;
        assert_eq!(assigned["status"], "assigned");

        let (status, _) = patch(&app, &uri, json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    async fn proposal_reaches_passed(app: Router) {
        let (status, proposal) = post(&app, "/api/dao/proposals", proposal_body()).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(proposal["status"], "active");
        assert_eq!(proposal["votesFor"], 0);

        let uri = format!("/api/dao/proposals/{}/vote", proposal["id"]);
        let mut latest = Value::Null;
        for _ in 0..11 {
            let (status, body) = post(&app, &uri, json!({ "vote": "for" })).await;
            assert_eq!(status, StatusCode::OK);
            latest = body;
        }
        assert_eq!(latest["votesFor"], 11);
        assert_eq!(latest["status"], "passed");

        let uri = format!("/api/dao/proposals/{}", proposal["id"]);
        let (_, fetched) = get(&app, &uri).await;
        assert_eq!(fetched["status"], "passed");
    }

    #[tokio::test]
    async fn test_proposal_passes_in_memory() {
        proposal_reaches_passed(memory_app()).await;
    }

    #[tokio::test]
    async fn test_proposal_passes_in_sqlite() {
        proposal_reaches_passed(sqlite_app().await).await;
    }

    #[tokio::test]
    async fn test_invalid_vote() {
        let app = memory_app();
        let (_, proposal) = post(&app, "/api/dao/proposals", proposal_body()).await;
        let uri = format!("/api/dao/proposals/{}/vote", proposal["id"]);

        let (status, body) = post(&app, &uri, json!({ "vote": "abstain" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid vote value");

        let (status, _) = post(&app, "/api/dao/proposals/77/vote", json!({ "vote": "for" })).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_proposal_requires_timestamp() {
        let app = memory_app();
        let mut body = proposal_body();
        body["endsAt"] = json!("next tuesday");
        let (status, error) = post(&app, "/api/dao/proposals", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["details"][0]["path"], json!(["endsAt"]));
    }

    #[tokio::test]
    async fn test_liquidity_risk_filter() {
        let app = memory_app();
        post(&app, "/api/liquidity/pools", pool_body("low")).await;
        post(&app, "/api/liquidity/pools", pool_body("high")).await;

        let (_, low) = get(&app, "/api/liquidity/pools?risk=low").await;
        assert_eq!(low.as_array().unwrap().len(), 1);
        assert_eq!(low[0]["risk"], "low");

        let (_, all) = get(&app, "/api/liquidity/pools").await;
        assert_eq!(all.as_array().unwrap().len(), 2);

        let (status, unknown) = get(&app, "/api/liquidity/pools?risk=extreme").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(unknown, json!([]));

        let (status, _) = post(&app, "/api/liquidity/pools", pool_body("extreme")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
