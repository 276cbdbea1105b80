//! AgroChain CLI
//!
//! Command-line client for the AgroChain marketplace API.

mod api;
mod commands;

use agro_types::{
    BarterStatus, Id, MicrojobStatus, NewBarterOffer, NewLiquidityPool, NewMarketplaceItem,
    NewMicrojob, NewProposal, NewUser, RiskLevel, UserType, Vote,
};
use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::{debug, error};

use api::{ApiClient, DEFAULT_SERVER_URL};
use commands::Output;

#[derive(Parser)]
#[command(name = "agro")]
#[command(author, version, about = "AgroChain marketplace client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API server URL
    #[arg(long, global = true, env = "AGRO_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    server: String,

    /// Print raw JSON instead of formatted output
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Register and look up users
    Users {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Browse and create marketplace listings
    Market {
        #[command(subcommand)]
        action: MarketAction,
    },

    /// Propose and answer item swaps
    Barter {
        #[command(subcommand)]
        action: BarterAction,
    },

    /// Post and track microjobs
    Jobs {
        #[command(subcommand)]
        action: JobAction,
    },

    /// DAO proposals and voting
    Dao {
        #[command(subcommand)]
        action: DaoAction,
    },

    /// Liquidity pools
    Pools {
        #[command(subcommand)]
        action: PoolAction,
    },

    /// Check that the server is up
    Health,
}

#[derive(Subcommand)]
enum UserAction {
    /// Register a new user
    Create(CreateUser),
    /// Show a user
    Get { id: Id },
}

#[derive(Args)]
struct CreateUser {
    #[arg(long)]
    username: String,
    #[arg(long)]
    password: String,
    #[arg(long)]
    full_name: String,
    /// farmer, industry or government
    #[arg(long)]
    user_type: UserType,
    #[arg(long)]
    location: String,
    #[arg(long)]
    wallet_address: Option<String>,
    #[arg(long)]
    bio: Option<String>,
    #[arg(long)]
    profile_image: Option<String>,
}

impl From<CreateUser> for NewUser {
    fn from(args: CreateUser) -> Self {
        NewUser {
            username: args.username,
            password: args.password,
            full_name: args.full_name,
            user_type: args.user_type,
            location: args.location,
            wallet_address: args.wallet_address,
            bio: args.bio,
            profile_image: args.profile_image,
        }
    }
}

#[derive(Subcommand)]
enum MarketAction {
    /// List marketplace items
    List {
        /// Only items in this category
        #[arg(short, long)]
        category: Option<String>,
        /// Only items listed by this user
        #[arg(short, long)]
        user: Option<Id>,
    },
    /// Show one item
    Get { id: Id },
    /// List an item for sale
    Create(CreateItem),
}

#[derive(Args)]
struct CreateItem {
    #[arg(long)]
    user_id: Id,
    #[arg(long)]
    title: String,
    #[arg(long)]
    description: String,
    #[arg(long)]
    category: String,
    #[arg(long)]
    price: f64,
    #[arg(long)]
    unit: String,
    #[arg(long)]
    quantity: f64,
    #[arg(long)]
    location: String,
    #[arg(long)]
    image_url: Option<String>,
}

impl From<CreateItem> for NewMarketplaceItem {
    fn from(args: CreateItem) -> Self {
        NewMarketplaceItem {
            user_id: args.user_id,
            title: args.title,
            description: args.description,
            category: args.category,
            price: args.price,
            unit: args.unit,
            quantity: args.quantity,
            location: args.location,
            image_url: args.image_url,
        }
    }
}

#[derive(Subcommand)]
enum BarterAction {
    /// List offers, optionally those involving one user
    List {
        #[arg(short, long)]
        user: Option<Id>,
    },
    /// Show one offer
    Get { id: Id },
    /// Offer one of your items for someone else's
    Create {
        #[arg(long)]
        from: Id,
        #[arg(long)]
        to: Id,
        /// Item you give
        #[arg(long)]
        offer_item: Id,
        /// Item you want
        #[arg(long)]
        request_item: Id,
    },
    /// Accept or reject an offer
    Status {
        id: Id,
        /// pending, accepted or rejected
        status: BarterStatus,
    },
}

#[derive(Subcommand)]
enum JobAction {
    /// List microjobs
    List {
        #[arg(short, long)]
        user: Option<Id>,
    },
    /// Show one microjob
    Get { id: Id },
    /// Post a microjob
    Create(CreateJob),
    /// Move a microjob along
    Status {
        id: Id,
        /// open, assigned or completed
        status: MicrojobStatus,
    },
}

#[derive(Args)]
struct CreateJob {
    #[arg(long)]
    user_id: Id,
    #[arg(long)]
    title: String,
    #[arg(long)]
    description: String,
    #[arg(long)]
    skills: String,
    #[arg(long)]
    compensation: f64,
    #[arg(long)]
    location: String,
    #[arg(long)]
    duration: String,
}

impl From<CreateJob> for NewMicrojob {
    fn from(args: CreateJob) -> Self {
        NewMicrojob {
            user_id: args.user_id,
            title: args.title,
            description: args.description,
            skills_required: args.skills,
            compensation: args.compensation,
            location: args.location,
            duration: args.duration,
        }
    }
}

#[derive(Subcommand)]
enum DaoAction {
    /// List proposals
    List,
    /// Show one proposal
    Get { id: Id },
    /// Open a proposal
    Create(CreateProposal),
    /// Vote on a proposal
    Vote {
        id: Id,
        /// for or against
        vote: Vote,
    },
}

#[derive(Args)]
struct CreateProposal {
    #[arg(long)]
    user_id: Id,
    #[arg(long)]
    title: String,
    #[arg(long)]
    description: String,
    /// Closing time (RFC 3339); defaults to now plus --days
    #[arg(long)]
    ends_at: Option<DateTime<Utc>>,
    #[arg(long, default_value_t = 7)]
    days: i64,
}

impl TryFrom<CreateProposal> for NewProposal {
    type Error = anyhow::Error;

    fn try_from(args: CreateProposal) -> Result<Self> {
        let ends_at = match args.ends_at {
            Some(ends_at) => ends_at,
            None => Duration::try_days(args.days)
                .and_then(|span| Utc::now().checked_add_signed(span))
                .ok_or_else(|| anyhow::anyhow!("--days {} is out of range", args.days))?,
        };
        Ok(NewProposal {
            user_id: args.user_id,
            title: args.title,
            description: args.description,
            ends_at,
        })
    }
}

#[derive(Subcommand)]
enum PoolAction {
    /// List pools, optionally by risk level
    List {
        /// low, medium or high
        #[arg(short, long)]
        risk: Option<RiskLevel>,
    },
    /// Show one pool
    Get { id: Id },
    /// Create a pool
    Create(CreatePool),
}

#[derive(Args)]
struct CreatePool {
    #[arg(long)]
    user_id: Id,
    #[arg(long)]
    name: String,
    #[arg(long)]
    description: String,
    #[arg(long)]
    pool_type: String,
    #[arg(long)]
    total_liquidity: f64,
    #[arg(long)]
    asset: String,
    #[arg(long)]
    apy: f64,
    #[arg(long, default_value_t = 0)]
    participants: i64,
    #[arg(long)]
    risk: RiskLevel,
    #[arg(long)]
    duration: String,
    #[arg(long)]
    image_url: Option<String>,
}

impl From<CreatePool> for NewLiquidityPool {
    fn from(args: CreatePool) -> Self {
        NewLiquidityPool {
            name: args.name,
            description: args.description,
            pool_type: args.pool_type,
            total_liquidity: args.total_liquidity,
            asset: args.asset,
            apy: args.apy,
            participants: args.participants,
            risk: args.risk,
            duration: args.duration,
            user_id: args.user_id,
            image_url: args.image_url,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(if cli.verbose { "agro=debug" } else { "agro=warn" })
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    debug!("Using server {}", cli.server);

    let client = ApiClient::new(&cli.server);
    let output = if cli.json { Output::Json } else { Output::Pretty };

    let result = match cli.command {
        Commands::Users { action } => match action {
            UserAction::Create(args) => commands::users::create(&client, args.into(), output).await,
            UserAction::Get { id } => commands::users::get(&client, id, output).await,
        },
        Commands::Market { action } => match action {
            MarketAction::List { category, user } => {
                commands::market::list(&client, category, user, output).await
            }
            MarketAction::Get { id } => commands::market::get(&client, id, output).await,
            MarketAction::Create(args) => {
                commands::market::create(&client, args.into(), output).await
            }
        },
        Commands::Barter { action } => match action {
            BarterAction::List { user } => commands::barter::list(&client, user, output).await,
            BarterAction::Get { id } => commands::barter::get(&client, id, output).await,
            BarterAction::Create {
                from,
                to,
                offer_item,
                request_item,
            } => {
                let offer = NewBarterOffer {
                    offer_user_id: from,
                    receive_user_id: to,
                    offer_item_id: offer_item,
                    request_item_id: request_item,
                };
                commands::barter::create(&client, offer, output).await
            }
            BarterAction::Status { id, status } => {
                commands::barter::set_status(&client, id, status, output).await
            }
        },
        Commands::Jobs { action } => match action {
            JobAction::List { user } => commands::jobs::list(&client, user, output).await,
            JobAction::Get { id } => commands::jobs::get(&client, id, output).await,
            JobAction::Create(args) => commands::jobs::create(&client, args.into(), output).await,
            JobAction::Status { id, status } => {
                commands::jobs::set_status(&client, id, status, output).await
            }
        },
        Commands::Dao { action } => match action {
            DaoAction::List => commands::dao::list(&client, output).await,
            DaoAction::Get { id } => commands::dao::get(&client, id, output).await,
            DaoAction::Create(args) => match NewProposal::try_from(args) {
                Ok(proposal) => commands::dao::create(&client, proposal, output).await,
                Err(e) => Err(e),
            },
            DaoAction::Vote { id, vote } => commands::dao::vote(&client, id, vote, output).await,
        },
        Commands::Pools { action } => match action {
            PoolAction::List { risk } => commands::pools::list(&client, risk, output).await,
            PoolAction::Get { id } => commands::pools::get(&client, id, output).await,
            PoolAction::Create(args) => commands::pools::create(&client, args.into(), output).await,
        },
        Commands::Health => commands::health::execute(&client, output).await,
    };

    if let Err(ref e) = result {
        error!("Command failed: {:#}", e);
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    result
}
