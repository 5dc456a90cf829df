//! Project management commands.

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use colored::Colorize;
use portfolio_core::{
    CreateProject, MemberId, Money, PageRequest, ProjectId, ProjectService, ProjectStatus,
    ProjectUpdate,
};
use portfolio_db::DbPool;

use crate::config::Config;
use crate::output;

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Create a new project
    Create(CreateProjectArgs),

    /// List projects page by page
    List(ListProjectsArgs),

    /// Show a project
    Show {
        /// Project ID
        id: ProjectId,
    },

    /// Change project fields
    Update(UpdateProjectArgs),

    /// Move a project to another status
    Status {
        /// Project ID
        id: ProjectId,

        /// Target status (under_review, review_done, review_approved, started, planned, in_progress, closed, cancelled)
        status: String,
    },

    /// Delete a project that has not started
    Delete {
        /// Project ID
        id: ProjectId,
    },

    /// Allocate a staff member to a project
    AddMember {
        /// Project ID
        id: ProjectId,

        /// Member ID
        member_id: MemberId,
    },

    /// Release a staff member from a project
    RemoveMember {
        /// Project ID
        id: ProjectId,

        /// Member ID
        member_id: MemberId,
    },
}

#[derive(Args)]
pub struct CreateProjectArgs {
    /// Project name
    #[arg(long)]
    pub name: String,

    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: NaiveDate,

    /// Planned end date (YYYY-MM-DD)
    #[arg(long)]
    pub end: NaiveDate,

    /// Total budget
    #[arg(long)]
    pub budget: f64,

    /// Project description
    #[arg(short, long)]
    pub description: String,

    /// Manager member ID
    #[arg(short, long)]
    pub manager: MemberId,

    /// Staff member IDs
    #[arg(short, long = "staff", num_args = 1..)]
    pub staff: Vec<MemberId>,
}

#[derive(Args)]
pub struct ListProjectsArgs {
    /// Zero-based page number
    #[arg(long, default_value = "0")]
    pub page: u32,

    /// Page size (defaults to the configured page size)
    #[arg(long)]
    pub size: Option<u32>,

    /// Only projects in this status
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Args)]
pub struct UpdateProjectArgs {
    /// Project ID
    pub id: ProjectId,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub start: Option<NaiveDate>,

    #[arg(long)]
    pub end: Option<NaiveDate>,

    #[arg(long)]
    pub budget: Option<f64>,

    #[arg(short, long)]
    pub description: Option<String>,

    #[arg(short, long)]
    pub manager: Option<MemberId>,
}

fn parse_budget(budget: f64) -> Result<Money> {
    Money::try_from(budget).map_err(anyhow::Error::msg)
}

pub async fn execute(cmd: ProjectCommands, pool: &DbPool, config: &Config) -> Result<()> {
    let service = ProjectService::new(pool.clone(), pool.clone());

    match cmd {
        ProjectCommands::Create(args) => {
            let view = service.create(CreateProject {
                name: Some(args.name),
                start_date: Some(args.start),
                planned_end_date: Some(args.end),
                budget: Some(parse_budget(args.budget)?),
                description: Some(args.description),
                manager_id: Some(args.manager),
                staff: Some(args.staff),
            })?;

            println!(
                "{} Created project: {} ({}), risk {}",
                "✓".green().bold(),
                view.name.cyan(),
                view.id.to_string().dimmed(),
                output::risk_colored(view.risk)
            );
        }

        ProjectCommands::List(args) => {
            let request = PageRequest::new(args.page, args.size.unwrap_or(config.page_size))?;
            let status = args
                .status
                .as_deref()
                .map(str::parse::<ProjectStatus>)
                .transpose()?;
            let page = service.list(request, status)?;
            output::print_projects_page(&page);
        }

        ProjectCommands::Show { id } => {
            let view = service.get(id)?;
            output::print_project(&view);
        }

        ProjectCommands::Update(args) => {
            let update = ProjectUpdate {
                name: args.name,
                start_date: args.start,
                planned_end_date: args.end,
                budget: args.budget.map(parse_budget).transpose()?,
                description: args.description,
                manager_id: args.manager,
            };
            if update.is_empty() {
                println!("{}", "Nothing to update.".dimmed());
                return Ok(());
            }

            let view = service.update(args.id, update)?;
            println!(
                "{} Updated project: {} ({})",
                "✓".green().bold(),
                view.name.cyan(),
                view.id.to_string().dimmed()
            );
        }

        ProjectCommands::Status { id, status } => {
            let status: ProjectStatus = status.parse()?;
            let view = service.change_status(id, status)?;
            println!(
                "{} Moved project {} to {}",
                "✓".green().bold(),
                id.to_string().dimmed(),
                output::status_colored(view.status)
            );
            if let Some(end) = view.actual_end_date {
                println!("  Closed on {}", end);
            }
        }

        ProjectCommands::Delete { id } => {
            service.delete(id)?;
            println!("{} Deleted project {}", "✓".green().bold(), id.to_string().dimmed());
        }

        ProjectCommands::AddMember { id, member_id } => {
            let view = service.add_member(id, member_id)?;
            println!(
                "{} Allocated member {} to {} ({} staff)",
                "✓".green().bold(),
                member_id.to_string().cyan(),
                view.name.cyan(),
                view.staff_ids.len()
            );
        }

        ProjectCommands::RemoveMember { id, member_id } => {
            let view = service.remove_member(id, member_id)?;
            println!(
                "{} Released member {} from {} ({} staff)",
                "✓".green().bold(),
                member_id.to_string().cyan(),
                view.name.cyan(),
                view.staff_ids.len()
            );
        }
    }

    Ok(())
}
