//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};
use portfolio_db::DbPool;
use std::path::PathBuf;

use crate::config::Config;

pub mod member;
pub mod project;
pub mod report;
pub mod serve;

/// Portfolio - project portfolio tracking
#[derive(Parser)]
#[command(name = "portfolio")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration file (defaults to ./portfolio.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the SQLite database
    #[arg(long, global = true, env = "PORTFOLIO_DB")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server
    Serve(serve::ServeArgs),

    /// Member directory
    #[command(subcommand)]
    Member(member::MemberCommands),

    /// Project management
    #[command(subcommand)]
    Project(project::ProjectCommands),

    /// Show the portfolio report
    Report,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = Config::load(self.config.as_deref())?.with_overrides(self.db, None, None);

        match self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Member(cmd) => member::execute(cmd, &open_db(&config)?).await,
            Commands::Project(cmd) => project::execute(cmd, &open_db(&config)?, &config).await,
            Commands::Report => report::execute(&open_db(&config)?).await,
        }
    }
}

/// Open the configured database, creating and migrating it as needed.
pub fn open_db(config: &Config) -> Result<DbPool> {
    Ok(portfolio_db::init_pool(&config.database)?)
}
