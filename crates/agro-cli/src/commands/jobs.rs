//! Microjob commands

use super::{created, heading, Output};
use crate::api::ApiClient;
use agro_types::{Id, Microjob, MicrojobStatus, NewMicrojob};
use anyhow::Result;
use colored::Colorize;

pub async fn list(client: &ApiClient, user_id: Option<Id>, output: Output) -> Result<()> {
    let jobs = client.list_microjobs(user_id).await?;
    output.emit(&jobs, |jobs| {
        heading("🧑‍🌾 Microjobs", jobs.len());
        for job in jobs {
            print_job(job);
        }
    })
}

pub async fn get(client: &ApiClient, id: Id, output: Output) -> Result<()> {
    let job = client.get_microjob(id).await?;
    output.emit(&job, |job| {
        print_job(job);
        println!("       {}", job.description);
        println!("       Skills: {}", job.skills_required);
    })
}

pub async fn create(client: &ApiClient, job: NewMicrojob, output: Output) -> Result<()> {
    let job = client.create_microjob(&job).await?;
    output.emit(&job, |job| {
        created("Microjob", job.id);
        print_job(job);
    })
}

pub async fn set_status(
    client: &ApiClient,
    id: Id,
    status: MicrojobStatus,
    output: Output,
) -> Result<()> {
    let job = client.update_microjob_status(id, status).await?;
    output.emit(&job, print_job)
}

fn print_job(job: &Microjob) {
    println!(
        "   #{} {} - {:.2} for {} [{}]",
        job.id,
        job.title.cyan(),
        job.compensation,
        job.duration,
        job.status
    );
    println!("       {} | posted by #{}", job.location.dimmed(), job.user_id);
}
