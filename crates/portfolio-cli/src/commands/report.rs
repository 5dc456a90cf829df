//! Portfolio report command.

use anyhow::Result;
use portfolio_core::ProjectService;
use portfolio_db::DbPool;

use crate::output;

pub async fn execute(pool: &DbPool) -> Result<()> {
    let service = ProjectService::new(pool.clone(), pool.clone());
    let report = service.report()?;
    output::print_report(&report);
    Ok(())
}
