//! Member directory commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use portfolio_core::{member, MemberId};
use portfolio_db::DbPool;

use crate::output;

#[derive(Subcommand)]
pub enum MemberCommands {
    /// Register a new member
    Add(AddMemberArgs),

    /// List members
    List {
        /// Only members with this role (manager, staff)
        #[arg(long)]
        role: Option<String>,
    },

    /// Show a member
    Show {
        /// Member ID
        id: MemberId,
    },
}

#[derive(Args)]
pub struct AddMemberArgs {
    /// Member name
    pub name: String,

    /// Role (manager, staff)
    pub role: String,
}

pub async fn execute(cmd: MemberCommands, pool: &DbPool) -> Result<()> {
    match cmd {
        MemberCommands::Add(args) => {
            let created = member::create_member(pool, &args.name, &args.role)?;
            println!(
                "{} Added {}: {} ({})",
                "✓".green().bold(),
                created.role,
                created.name.cyan(),
                created.id.to_string().dimmed()
            );
        }

        MemberCommands::List { role } => {
            let members = match role {
                Some(role) => member::list_members_by_role(pool, &role)?,
                None => member::list_members(pool)?,
            };
            output::print_members_table(&members);
        }

        MemberCommands::Show { id } => {
            let found = member::get_member(pool, id)?;
            output::print_member(&found);
        }
    }

    Ok(())
}
