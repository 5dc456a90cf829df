//! Aggregate statistics over the whole portfolio.

use crate::error::{PortfolioError, PortfolioResult};
use crate::money::Money;
use crate::project::model::Project;
use crate::project::status::ProjectStatus;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Portfolio snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioReport {
    pub counts_by_status: BTreeMap<ProjectStatus, u64>,
    pub budget_by_status: BTreeMap<ProjectStatus, Money>,
    /// Mean of `actual_end - start` in days over closed projects, 0 when none.
    pub mean_closed_duration_days: f64,
    pub distinct_staff_count: usize,
}

impl PortfolioReport {
    /// Fails when a per-status budget total does not fit in [`Money`].
    pub fn from_projects(projects: &[Project]) -> PortfolioResult<Self> {
        let mut counts_by_status = BTreeMap::new();
        let mut budget_by_status = BTreeMap::new();
        let mut staff = BTreeSet::new();
        let mut closed_days = Vec::new();

        for project in projects {
            *counts_by_status.entry(project.status).or_insert(0) += 1;
            let budget = budget_by_status.entry(project.status).or_insert(Money::ZERO);
            *budget = budget.checked_add(project.budget).ok_or_else(|| {
                PortfolioError::validation(format!(
                    "Total budget of '{}' projects is out of range",
                    project.status
                ))
            })?;
            staff.extend(project.staff.iter().copied());

            if project.status == ProjectStatus::Closed {
                if let Some(days) = project.actual_duration_days() {
                    closed_days.push(days);
                }
            }
        }

        let mean_closed_duration_days = if closed_days.is_empty() {
            0.0
        } else {
            closed_days.iter().sum::<i64>() as f64 / closed_days.len() as f64
        };

        Ok(Self {
            counts_by_status,
            budget_by_status,
            mean_closed_duration_days,
            distinct_staff_count: staff.len(),
        })
    }
}
