//! Project domain models.

use crate::error::{PortfolioError, PortfolioResult};
use crate::member::model::MemberId;
use crate::money::Money;
use crate::project::risk::{self, RiskTier};
use crate::project::status::ProjectStatus;
use chrono::NaiveDate;
use portfolio_db::queries::projects::ProjectRow;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Store-assigned project identifier.
pub type ProjectId = i64;

/// A tracked project and its staff assignments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub start_date: Option<NaiveDate>,
    pub planned_end_date: Option<NaiveDate>,
    /// Set only by the transition to `closed`.
    pub actual_end_date: Option<NaiveDate>,
    pub budget: Money,
    pub description: String,
    pub manager_id: Option<MemberId>,
    pub status: ProjectStatus,
    pub staff: BTreeSet<MemberId>,
}

impl Project {
    /// Create from database row.
    pub fn from_row(row: ProjectRow) -> PortfolioResult<Self> {
        Ok(Self {
            id: row.id,
            name: row.name,
            start_date: row.start_date,
            planned_end_date: row.planned_end_date,
            actual_end_date: row.actual_end_date,
            budget: Money::from_cents(row.budget_cents),
            description: row.description,
            manager_id: row.manager_id,
            status: row.status.parse()?,
            staff: row.staff_ids.into_iter().collect(),
        })
    }

    /// Convert into a database row.
    pub fn to_row(&self) -> ProjectRow {
        ProjectRow {
            id: self.id,
            name: self.name.clone(),
            start_date: self.start_date,
            planned_end_date: self.planned_end_date,
            actual_end_date: self.actual_end_date,
            budget_cents: self.budget.cents(),
            description: self.description.clone(),
            manager_id: self.manager_id,
            status: self.status.as_str().to_string(),
            staff_ids: self.staff.iter().copied().collect(),
        }
    }

    /// Risk tier computed from the current schedule and budget.
    pub fn risk(&self) -> RiskTier {
        risk::classify(self.start_date, self.planned_end_date, Some(self.budget))
    }

    /// Days from start to actual end, when both are known.
    pub fn actual_duration_days(&self) -> Option<i64> {
        match (self.start_date, self.actual_end_date) {
            (Some(start), Some(end)) => Some((end - start).num_days()),
            _ => None,
        }
    }
}

/// A validated project that has not been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub name: String,
    pub start_date: NaiveDate,
    pub planned_end_date: NaiveDate,
    pub budget: Money,
    pub description: String,
    pub manager_id: MemberId,
    pub status: ProjectStatus,
    pub staff: BTreeSet<MemberId>,
}

/// Input for creating a project.
///
/// Required fields are optional here so that a missing value is reported as a
/// validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateProject {
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub planned_end_date: Option<NaiveDate>,
    pub budget: Option<Money>,
    pub description: Option<String>,
    pub manager_id: Option<MemberId>,
    pub staff: Option<Vec<MemberId>>,
}

/// The required fields of a [`CreateProject`], once checked.
#[derive(Debug, Clone)]
pub(crate) struct ProjectFields {
    pub name: String,
    pub start_date: NaiveDate,
    pub planned_end_date: NaiveDate,
    pub budget: Money,
    pub description: String,
    pub manager_id: MemberId,
    /// Requested staff in request order; may be empty.
    pub staff: Vec<MemberId>,
}

impl CreateProject {
    pub(crate) fn validate(&self) -> PortfolioResult<ProjectFields> {
        Ok(ProjectFields {
            name: required_text("name", self.name.as_deref())?,
            start_date: self
                .start_date
                .ok_or_else(|| missing("start_date"))?,
            planned_end_date: self
                .planned_end_date
                .ok_or_else(|| missing("planned_end_date"))?,
            budget: positive_budget(self.budget.ok_or_else(|| missing("budget"))?)?,
            description: required_text("description", self.description.as_deref())?,
            manager_id: self.manager_id.ok_or_else(|| missing("manager_id"))?,
            staff: self.staff.clone().ok_or_else(|| missing("staff"))?,
        })
    }
}

/// Partial update of a project. Only fields that are present are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub planned_end_date: Option<NaiveDate>,
    pub budget: Option<Money>,
    pub description: Option<String>,
    pub manager_id: Option<MemberId>,
}

impl ProjectUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.start_date.is_none()
            && self.planned_end_date.is_none()
            && self.budget.is_none()
            && self.description.is_none()
            && self.manager_id.is_none()
    }
}

fn missing(field: &str) -> PortfolioError {
    PortfolioError::validation(format!("Field '{}' is required", field))
}

pub(crate) fn required_text(field: &str, value: Option<&str>) -> PortfolioResult<String> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        Some(_) => Err(PortfolioError::validation(format!(
            "Field '{}' must not be blank",
            field
        ))),
        None => Err(missing(field)),
    }
}

pub(crate) fn positive_budget(budget: Money) -> PortfolioResult<Money> {
    if budget.is_positive() {
        Ok(budget)
    } else {
        Err(PortfolioError::validation(format!(
            "Budget must be positive, got {}",
            budget
        )))
    }
}
