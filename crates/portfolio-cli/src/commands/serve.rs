//! Web server command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use super::open_db;
use crate::config::Config;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, env = "PORTFOLIO_PORT")]
    pub port: Option<u16>,

    /// Host to bind to
    #[arg(long, env = "PORTFOLIO_HOST")]
    pub host: Option<String>,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file used with --log (defaults to logs/serve.log)
    #[arg(long, requires = "log")]
    pub log_file: Option<PathBuf>,
}

pub async fn execute(args: ServeArgs, config: Config) -> Result<()> {
    let config = config.with_overrides(None, args.host, args.port);
    let pool = open_db(&config)?;

    println!();
    println!("  {} {}", "Portfolio".cyan().bold(), "API Server".bold());
    println!();
    println!(
        "  {}       http://{}:{}/api",
        "API".green(),
        config.host,
        config.port
    );
    println!(
        "  {}    http://{}:{}/health",
        "Health".green(),
        config.host,
        config.port
    );
    println!(
        "  {}  {}",
        "Database".green(),
        config.database.display()
    );
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    portfolio_web::run_server(pool, &config.host, config.port, config.page_size).await?;

    Ok(())
}
