//! Terminal output formatting.

use colored::{ColoredString, Colorize};
use portfolio_core::{Member, Page, PortfolioReport, ProjectStatus, ProjectView, RiskTier};

/// Status label colored by lifecycle stage.
pub fn status_colored(status: ProjectStatus) -> ColoredString {
    let label = status.as_str();
    match status {
        ProjectStatus::UnderReview | ProjectStatus::ReviewDone => label.dimmed(),
        ProjectStatus::ReviewApproved | ProjectStatus::Planned => label.blue(),
        ProjectStatus::Started | ProjectStatus::InProgress => label.yellow(),
        ProjectStatus::Closed => label.green(),
        ProjectStatus::Cancelled => label.red(),
    }
}

pub fn risk_colored(risk: RiskTier) -> ColoredString {
    let label = risk.as_str();
    match risk {
        RiskTier::Low => label.green(),
        RiskTier::Medium => label.yellow(),
        RiskTier::High => label.red().bold(),
        RiskTier::Undefined => label.dimmed(),
    }
}

/// Print a single member.
pub fn print_member(member: &Member) {
    println!("{} {}", member.name.cyan().bold(), format!("({})", member.id).dimmed());
    println!("{}: {}", "Role".bold(), member.role);
}

/// Print members as a table.
pub fn print_members_table(members: &[Member]) {
    if members.is_empty() {
        println!("{}", "No members found.".dimmed());
        return;
    }

    println!("{:<8} {:<30} {:<10}", "ID", "Name", "Role");
    println!("{}", "─".repeat(50));

    for member in members {
        println!(
            "{:<8} {:<30} {:<10}",
            member.id,
            truncate(&member.name, 28),
            member.role.as_str()
        );
    }

    println!();
    println!("{} member(s) total", members.len());
}

/// Print a single project.
pub fn print_project(view: &ProjectView) {
    println!("{} {}", view.name.cyan().bold(), format!("({})", view.id).dimmed());
    println!();
    println!("{}", view.description);
    println!();

    println!("{}: {}", "Status".bold(), status_colored(view.status));
    println!("{}: {}", "Risk".bold(), risk_colored(view.risk));
    println!("{}: {}", "Budget".bold(), view.budget);
    println!("{}: {}", "Start".bold(), date_or_dash(view.start_date));
    println!("{}: {}", "Planned end".bold(), date_or_dash(view.planned_end_date));
    if let Some(end) = view.actual_end_date {
        println!("{}: {}", "Actual end".bold(), end);
    }

    match &view.manager {
        Some(manager) => println!("{}: {} ({})", "Manager".bold(), manager.name, manager.id),
        None => println!("{}: {}", "Manager".bold(), "-".dimmed()),
    }

    let staff: Vec<String> = view.staff_ids.iter().map(|id| id.to_string()).collect();
    println!("{}: {}", "Staff".bold(), staff.join(", "));

    let next: Vec<&str> = view
        .status
        .allowed_next_states()
        .into_iter()
        .map(ProjectStatus::as_str)
        .collect();
    if !next.is_empty() {
        println!();
        println!("{} {}", "Next:".dimmed(), next.join(", ").dimmed());
    }
}

/// Print one page of projects as a table.
pub fn print_projects_page(page: &Page<ProjectView>) {
    if page.items.is_empty() {
        println!("{}", "No projects found.".dimmed());
        return;
    }

    println!(
        "{:<6} {:<28} {:<13} {:<10} {:>14} {:<6}",
        "ID", "Name", "Status", "Risk", "Budget", "Staff"
    );
    println!("{}", "─".repeat(80));

    for view in &page.items {
        println!(
            "{:<6} {:<28} {:<13} {:<10} {:>14} {:<6}",
            view.id,
            truncate(&view.name, 26),
            status_colored(view.status),
            risk_colored(view.risk),
            view.budget.to_string(),
            view.staff_ids.len()
        );
    }

    println!();
    println!(
        "Page {} of {} ({} project(s) total)",
        page.page + 1,
        page.total_pages.max(1),
        page.total_items
    );
}

/// Print the portfolio report.
pub fn print_report(report: &PortfolioReport) {
    println!("{}", "Portfolio Report".cyan().bold());
    println!();

    if report.counts_by_status.is_empty() {
        println!("{}", "No projects yet.".dimmed());
    } else {
        println!("{:<13} {:>7} {:>16}", "Status", "Count", "Budget");
        println!("{}", "─".repeat(38));
        for (status, count) in &report.counts_by_status {
            let budget = report
                .budget_by_status
                .get(status)
                .map(ToString::to_string)
                .unwrap_or_default();
            println!("{:<13} {:>7} {:>16}", status_colored(*status), count, budget);
        }
    }

    println!();
    println!(
        "{}: {:.1} days",
        "Mean closed duration".bold(),
        report.mean_closed_duration_days
    );
    println!("{}: {}", "Distinct staff".bold(), report.distinct_staff_count);
}

fn date_or_dash(date: Option<chrono::NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Truncate a string to `max` characters.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(2)).collect();
        format!("{}..", kept)
    }
}
