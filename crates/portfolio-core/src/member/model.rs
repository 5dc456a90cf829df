//! Member domain models.

use crate::error::{PortfolioError, PortfolioResult};
use portfolio_db::queries::members::MemberRow;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Store-assigned member identifier.
pub type MemberId = i64;

/// Role a member holds in the organisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Manager,
    Staff,
}

impl MemberRole {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manager => "manager",
            Self::Staff => "staff",
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemberRole {
    type Err = PortfolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "manager" => Ok(Self::Manager),
            "staff" => Ok(Self::Staff),
            other => Err(PortfolioError::validation(format!(
                "Invalid role '{}'. Valid roles: manager, staff",
                other
            ))),
        }
    }
}

/// A person who can manage or staff projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub role: MemberRole,
}

impl Member {
    /// Create from database row.
    pub fn from_row(row: MemberRow) -> PortfolioResult<Self> {
        Ok(Self {
            id: row.id,
            name: row.name,
            role: row.role.parse()?,
        })
    }
}
