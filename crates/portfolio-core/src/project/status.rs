//! Project lifecycle states and transition rules.
//!
//! ```text
//! under_review → review_done → review_approved → started → planned → in_progress → closed
//!       └──────────────┴─────────────┴──────────────┴──────────┴───────────┴──→ cancelled
//! ```
//!
//! A project advances one step at a time. Any state that is not terminal may
//! jump straight to `cancelled`. `closed` and `cancelled` accept no further
//! transitions.

use crate::error::{PortfolioError, PortfolioResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status of a project. Variants are declared in lifecycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    UnderReview,
    ReviewDone,
    ReviewApproved,
    Started,
    Planned,
    InProgress,
    Closed,
    Cancelled,
}

/// The linear part of the lifecycle.
const SEQUENCE: [ProjectStatus; 7] = [
    ProjectStatus::UnderReview,
    ProjectStatus::ReviewDone,
    ProjectStatus::ReviewApproved,
    ProjectStatus::Started,
    ProjectStatus::Planned,
    ProjectStatus::InProgress,
    ProjectStatus::Closed,
];

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 8] = [
        Self::UnderReview,
        Self::ReviewDone,
        Self::ReviewApproved,
        Self::Started,
        Self::Planned,
        Self::InProgress,
        Self::Closed,
        Self::Cancelled,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnderReview => "under_review",
            Self::ReviewDone => "review_done",
            Self::ReviewApproved => "review_approved",
            Self::Started => "started",
            Self::Planned => "planned",
            Self::InProgress => "in_progress",
            Self::Closed => "closed",
            Self::Cancelled => "cancelled",
        }
    }

    /// The status immediately after this one in the linear sequence.
    pub fn successor(self) -> Option<Self> {
        let index = SEQUENCE.iter().position(|s| *s == self)?;
        SEQUENCE.get(index + 1).copied()
    }

    /// `closed` and `cancelled` are final.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Closed | Self::Cancelled)
    }

    /// Active projects count toward a member's allocation limit.
    pub const fn is_active(self) -> bool {
        !self.is_terminal()
    }

    /// Projects that have started work, or finished it, must be kept.
    pub const fn is_deletable(self) -> bool {
        !matches!(self, Self::Started | Self::InProgress | Self::Closed)
    }

    /// Valid next states from the current state.
    pub fn allowed_next_states(self) -> Vec<Self> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.successor()
            .into_iter()
            .chain(std::iter::once(Self::Cancelled))
            .collect()
    }

    /// Check whether transitioning to `next` is allowed.
    pub fn can_transition_to(self, next: Self) -> bool {
        if self.is_terminal() {
            return false;
        }
        next == Self::Cancelled || self.successor() == Some(next)
    }
}

/// Reject any transition that skips a step, moves backwards or leaves a
/// terminal state.
pub fn validate_transition(current: ProjectStatus, requested: ProjectStatus) -> PortfolioResult<()> {
    if current.can_transition_to(requested) {
        Ok(())
    } else {
        Err(PortfolioError::InvalidTransition {
            from: current,
            to: requested,
        })
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = PortfolioError;

    /// Case-insensitive, so `IN_PROGRESS` and `in_progress` both parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|s| s.as_str()).collect();
                PortfolioError::validation(format!(
                    "Invalid status '{}'. Valid statuses: {}",
                    s,
                    valid.join(", ")
                ))
            })
    }
}
