//! DAO proposal commands

use super::{created, heading, Output};
use crate::api::ApiClient;
use agro_types::{DaoProposal, Id, NewProposal, ProposalStatus, Vote};
use anyhow::Result;
use colored::{ColoredString, Colorize};

pub async fn list(client: &ApiClient, output: Output) -> Result<()> {
    let proposals = client.list_proposals().await?;
    output.emit(&proposals, |proposals| {
        heading("🏛  DAO proposals", proposals.len());
        for proposal in proposals {
            print_proposal(proposal);
        }
    })
}

pub async fn get(client: &ApiClient, id: Id, output: Output) -> Result<()> {
    let proposal = client.get_proposal(id).await?;
    output.emit(&proposal, |proposal| {
        print_proposal(proposal);
        println!("       {}", proposal.description);
    })
}

pub async fn create(client: &ApiClient, proposal: NewProposal, output: Output) -> Result<()> {
    let proposal = client.create_proposal(&proposal).await?;
    output.emit(&proposal, |proposal| {
        created("Proposal", proposal.id);
        print_proposal(proposal);
    })
}

pub async fn vote(client: &ApiClient, id: Id, vote: Vote, output: Output) -> Result<()> {
    let before = client.get_proposal(id).await?.status;
    let proposal = client.vote(id, vote).await?;

    output.emit(&proposal, |proposal| {
        println!("{}", format!("🗳  Voted {} on #{}", vote, proposal.id).green());
        print_proposal(proposal);
        if proposal.status != before {
            println!(
                "   Status changed: {} -> {}",
                status_label(before),
                status_label(proposal.status)
            );
        }
    })
}

fn print_proposal(proposal: &DaoProposal) {
    println!(
        "   #{} {} [{}]",
        proposal.id,
        proposal.title.cyan(),
        status_label(proposal.status)
    );
    println!(
        "       {} for / {} against, ends {}",
        proposal.votes_for,
        proposal.votes_against,
        proposal.ends_at.format("%Y-%m-%d %H:%M UTC")
    );
}

fn status_label(status: ProposalStatus) -> ColoredString {
    match status {
        ProposalStatus::Active => status.as_str().yellow(),
        ProposalStatus::Passed => status.as_str().green(),
        ProposalStatus::Rejected => status.as_str().red(),
    }
}
