use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use rota_scheduler::RoleSelector;
use rota_state::RosterStore;

mod commands;
mod manifest;

#[derive(Parser)]
#[command(
    name = "rota",
    about = "rota — weighted fair hearing roster scheduler",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Path to the roster database file
    #[arg(long, global = true, default_value = "rota.redb")]
    db: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a roster manifest (campaign, agents, hearings) into the store
    Import {
        /// Path to the manifest TOML file
        manifest: PathBuf,
    },
    /// Assign agents to every hearing of a campaign
    Schedule {
        /// Campaign to schedule
        #[arg(long)]
        campaign: u64,
        /// Which pool supplies the assignments
        #[arg(long, value_enum, default_value_t = RoleArg::Any)]
        role: RoleArg,
    },
    /// Move a hearing's whole group to a different agent
    Reassign {
        /// Any hearing in the group to move
        #[arg(long)]
        hearing: u64,
        /// Agent taking the group over
        #[arg(long)]
        agent: u64,
    },
    /// Rename a campaign's court and backfill its hearings
    UpdateCourt {
        #[arg(long)]
        campaign: u64,
        #[arg(long)]
        court: String,
    },
    /// List campaigns
    Campaigns,
    /// List agents with their balances
    Agents,
    /// List the hearings of a campaign
    Hearings {
        #[arg(long)]
        campaign: u64,
    },
}

/// CLI spelling of the role selector.
#[derive(Clone, Copy, ValueEnum)]
enum RoleArg {
    Attorney,
    Representative,
    Any,
}

impl From<RoleArg> for RoleSelector {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Attorney => RoleSelector::Attorney,
            RoleArg::Representative => RoleSelector::Representative,
            RoleArg::Any => RoleSelector::Any,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("rota=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let store = RosterStore::open(&cli.db)?;

    match cli.command {
        Commands::Import { manifest } => commands::import::import(&store, &manifest),
        Commands::Schedule { campaign, role } => {
            commands::schedule::schedule(&store, campaign, role.into())
        }
        Commands::Reassign { hearing, agent } => {
            commands::reassign::reassign(&store, hearing, agent)
        }
        Commands::UpdateCourt { campaign, court } => {
            commands::reassign::update_court(&store, campaign, &court)
        }
        Commands::Campaigns => commands::show::campaigns(&store),
        Commands::Agents => commands::show::agents(&store),
        Commands::Hearings { campaign } => commands::show::hearings(&store, campaign),
    }
}
