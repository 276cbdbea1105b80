//! Subcommand implementations

pub mod barter;
pub mod dao;
pub mod health;
pub mod jobs;
pub mod market;
pub mod pools;
pub mod users;

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

/// How results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Pretty,
    Json,
}

impl Output {
    /// Print `value` as JSON, or fall back to the pretty renderer
    pub fn emit<T: Serialize>(self, value: &T, pretty: impl FnOnce(&T)) -> Result<()> {
        match self {
            Output::Json => println!("{}", serde_json::to_string_pretty(value)?),
            Output::Pretty => pretty(value),
        }
        Ok(())
    }
}

pub(crate) fn heading(title: &str, count: usize) {
    println!("{} {}", title.blue().bold(), format!("({})", count).dimmed());
    println!();
    if count == 0 {
        println!("   (none)");
    }
}

pub(crate) fn created(what: &str, id: i64) {
    println!("{}", format!("✅ {} #{} created", what, id).green());
}
