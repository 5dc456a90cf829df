//! Centralized error types for portfolio operations.

use crate::member::model::{MemberId, MemberRole};
use crate::project::model::ProjectId;
use crate::project::status::ProjectStatus;
use thiserror::Error;

/// Main error type for portfolio operations.
#[derive(Error, Debug)]
pub enum PortfolioError {
    #[error("Project not found: {0}")]
    ProjectNotFound(ProjectId),

    #[error("Member not found: {0}")]
    MemberNotFound(MemberId),

    #[error("Member {0} is not allocated to this project")]
    StaffNotAssigned(MemberId),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Member {member_id} has role '{actual}', only '{expected}' members can be used here")]
    RoleMismatch {
        member_id: MemberId,
        expected: MemberRole,
        actual: MemberRole,
    },

    #[error("A project must be created with at least one staff member")]
    EmptyStaffList,

    #[error("Project already has the maximum of {limit} staff members")]
    CapacityExceeded { limit: usize },

    #[error("Member {member_id} is already allocated to {limit} active projects")]
    OverAllocated { member_id: MemberId, limit: usize },

    #[error("Member {0} is already allocated to this project")]
    AlreadyAllocated(MemberId),

    #[error("A project must keep at least one staff member")]
    MinimumStaffViolation,

    #[error("Invalid status transition: cannot move from '{from}' to '{to}', status must follow the sequence or be cancelled")]
    InvalidTransition {
        from: ProjectStatus,
        to: ProjectStatus,
    },

    #[error("Projects with status '{0}' cannot be deleted")]
    DeletionForbidden(ProjectStatus),

    #[error("Database error: {0}")]
    Database(#[from] portfolio_db::DbError),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for portfolio operations.
pub type PortfolioResult<T> = Result<T, PortfolioError>;

/// Coarse classification used by outer layers to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The addressed entity does not exist.
    NotFound,
    /// The request was understood but violates an input or business rule.
    Rejected,
    /// Something failed that the caller cannot fix.
    Internal,
}

impl PortfolioError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ProjectNotFound(_) | Self::MemberNotFound(_) | Self::StaffNotAssigned(_) => {
                ErrorKind::NotFound
            }
            Self::Database(_) | Self::Store(_) | Self::Config(_) => ErrorKind::Internal,
            _ => ErrorKind::Rejected,
        }
    }

    /// Stable machine-readable code for the error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ProjectNotFound(_) | Self::MemberNotFound(_) | Self::StaffNotAssigned(_) => {
                "not_found"
            }
            Self::ValidationError(_) => "validation_error",
            Self::RoleMismatch { .. } => "role_mismatch",
            Self::EmptyStaffList => "empty_staff_list",
            Self::CapacityExceeded { .. } => "capacity_exceeded",
            Self::OverAllocated { .. } => "over_allocated",
            Self::AlreadyAllocated(_) => "already_allocated",
            Self::MinimumStaffViolation => "minimum_staff_violation",
            Self::InvalidTransition { .. } => "invalid_transition",
            Self::DeletionForbidden(_) => "deletion_forbidden",
            Self::Database(_) | Self::Store(_) | Self::Config(_) => "internal_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(PortfolioError::ProjectNotFound(1).kind(), ErrorKind::NotFound);
        assert_eq!(PortfolioError::StaffNotAssigned(1).kind(), ErrorKind::NotFound);
        assert_eq!(PortfolioError::EmptyStaffList.kind(), ErrorKind::Rejected);
        assert_eq!(
            PortfolioError::DeletionForbidden(ProjectStatus::Closed).kind(),
            ErrorKind::Rejected
        );
        assert_eq!(
            PortfolioError::Store("poisoned".into()).kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn test_messages_are_human_readable() {
        let err = PortfolioError::InvalidTransition {
            from: ProjectStatus::UnderReview,
            to: ProjectStatus::Started,
        };
        assert!(err.to_string().contains("'under_review' to 'started'"));

        let err = PortfolioError::RoleMismatch {
            member_id: 7,
            expected: MemberRole::Manager,
            actual: MemberRole::Staff,
        };
        assert_eq!(
            err.to_string(),
            "Member 7 has role 'staff', only 'manager' members can be used here"
        );
    }
}
