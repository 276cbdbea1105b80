//! DAO proposal handlers

use crate::error::{ApiError, OrInternal};
use crate::extractors::{EntityId, JsonBody, ValidatedJson};
use crate::AppState;
use agro_core::{DaoProposal, NewProposal, ProposalStatus, Vote};
use axum::{extract::State, http::StatusCode, Json};
use tracing::{debug, info};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<DaoProposal>>, ApiError> {
    let proposals = state
        .storage
        .list_proposals()
        .await
        .or_internal("Failed to get DAO proposals")?;

    Ok(Json(proposals))
}

pub async fn get(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<DaoProposal>, ApiError> {
    state
        .storage
        .get_proposal(id)
        .await
        .or_internal("Failed to get DAO proposal")?
        .map(Json)
        .ok_or(ApiError::NotFound("DAO proposal"))
}

pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(proposal): ValidatedJson<NewProposal>,
) -> Result<(StatusCode, Json<DaoProposal>), ApiError> {
    let proposal = state
        .storage
        .create_proposal(proposal)
        .await
        .or_internal("Failed to create DAO proposal")?;

    info!("Proposal {} opened: {}", proposal.id, proposal.title);
    Ok((StatusCode::CREATED, Json(proposal)))
}

pub async fn vote(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    body: JsonBody,
) -> Result<Json<DaoProposal>, ApiError> {
    let vote = body
        .str_field("vote")
        .and_then(|s| s.parse::<Vote>().ok())
        .ok_or_else(|| ApiError::BadRequest("Invalid vote value".to_string()))?;

    let proposal = state
        .storage
        .vote_on_proposal(id, vote)
        .await
        .or_internal("Failed to vote on proposal")?
        .ok_or(ApiError::NotFound("DAO proposal"))?;

    debug!(
        "Proposal {} tally: {} for / {} against",
        proposal.id, proposal.votes_for, proposal.votes_against
    );
    if proposal.status != ProposalStatus::Active {
        info!("Proposal {} is {}", proposal.id, proposal.status);
    }

    Ok(Json(proposal))
}
