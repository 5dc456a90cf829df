//! Read-side projection of a project.

use crate::member::model::{Member, MemberId};
use crate::money::Money;
use crate::project::model::{Project, ProjectId};
use crate::project::risk::RiskTier;
use crate::project::status::ProjectStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// What callers see of a project: its fields, the resolved manager and the
/// computed risk tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectView {
    pub id: ProjectId,
    pub name: String,
    pub start_date: Option<NaiveDate>,
    pub planned_end_date: Option<NaiveDate>,
    pub actual_end_date: Option<NaiveDate>,
    pub budget: Money,
    pub description: String,
    pub manager: Option<Member>,
    pub status: ProjectStatus,
    pub risk: RiskTier,
    pub staff_ids: BTreeSet<MemberId>,
}

impl ProjectView {
    pub fn new(project: &Project, manager: Option<Member>) -> Self {
        Self {
            id: project.id,
            name: project.name.clone(),
            start_date: project.start_date,
            planned_end_date: project.planned_end_date,
            actual_end_date: project.actual_end_date,
            budget: project.budget,
            description: project.description.clone(),
            manager,
            status: project.status,
            risk: project.risk(),
            staff_ids: project.staff.clone(),
        }
    }
}
