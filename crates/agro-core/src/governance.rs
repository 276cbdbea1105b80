//! DAO proposal vote tallying

use agro_types::{DaoProposal, ProposalStatus, Vote};

/// A side must hold strictly more than this many votes to close a proposal.
pub const PASS_THRESHOLD: i64 = 10;

/// Derive the proposal status from its current tallies.
///
/// A side that leads and exceeds [`PASS_THRESHOLD`] decides the proposal;
/// otherwise the current status is kept. Nothing forces a decided proposal
/// back to `Active`.
pub fn evaluate(votes_for: i64, votes_against: i64, current: ProposalStatus) -> ProposalStatus {
    if votes_for > votes_against && votes_for > PASS_THRESHOLD {
        ProposalStatus::Passed
    } else if votes_against > votes_for && votes_against > PASS_THRESHOLD {
        ProposalStatus::Rejected
    } else {
        current
    }
}

/// Count one unweighted ballot and re-evaluate the status in place.
///
/// `ends_at` is not consulted and closed proposals still accept ballots.
pub fn cast_vote(proposal: &mut DaoProposal, vote: Vote) {
    match vote {
        Vote::For => proposal.votes_for += 1,
        Vote::Against => proposal.votes_against += 1,
    }
    proposal.status = evaluate(proposal.votes_for, proposal.votes_against, proposal.status);
}
