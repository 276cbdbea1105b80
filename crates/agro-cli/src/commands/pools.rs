//! Liquidity pool commands

use super::{created, heading, Output};
use crate::api::ApiClient;
use agro_types::{Id, LiquidityPool, NewLiquidityPool, RiskLevel};
use anyhow::Result;
use colored::{ColoredString, Colorize};

pub async fn list(client: &ApiClient, risk: Option<RiskLevel>, output: Output) -> Result<()> {
    let pools = client.list_liquidity_pools(risk).await?;
    output.emit(&pools, |pools| {
        heading("💧 Liquidity pools", pools.len());
        for pool in pools {
            print_pool(pool);
        }
    })
}

pub async fn get(client: &ApiClient, id: Id, output: Output) -> Result<()> {
    let pool = client.get_liquidity_pool(id).await?;
    output.emit(&pool, |pool| {
        print_pool(pool);
        println!("       {}", pool.description);
    })
}

pub async fn create(client: &ApiClient, pool: NewLiquidityPool, output: Output) -> Result<()> {
    let pool = client.create_liquidity_pool(&pool).await?;
    output.emit(&pool, |pool| {
        created("Pool", pool.id);
        print_pool(pool);
    })
}

fn print_pool(pool: &LiquidityPool) {
    println!(
        "   #{} {} ({}) - {:.2}% APY [{} risk]",
        pool.id,
        pool.name.cyan(),
        pool.asset,
        pool.apy,
        risk_label(pool.risk)
    );
    println!(
        "       {:.2} total, {} participants, {}",
        pool.total_liquidity, pool.participants, pool.duration
    );
}

fn risk_label(risk: RiskLevel) -> ColoredString {
    match risk {
        RiskLevel::Low => risk.as_str().green(),
        RiskLevel::Medium => risk.as_str().yellow(),
        RiskLevel::High => risk.as_str().red(),
    }
}
