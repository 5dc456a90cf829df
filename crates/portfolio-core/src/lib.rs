//! Portfolio Core Library
//!
//! Domain models and business rules for project portfolio tracking: the
//! project lifecycle, staffing constraints, risk classification and
//! portfolio reporting.

pub mod clock;
pub mod error;
pub mod member;
pub mod money;
pub mod project;
pub mod store;

pub use error::{ErrorKind, PortfolioError, PortfolioResult};
pub use member::model::{Member, MemberId, MemberRole};
pub use money::Money;
pub use project::model::{CreateProject, Project, ProjectId, ProjectUpdate};
pub use project::report::PortfolioReport;
pub use project::risk::RiskTier;
pub use project::status::ProjectStatus;
pub use project::view::ProjectView;
pub use project::ProjectService;
pub use store::{MemberDirectory, MemberStore, Page, PageRequest, ProjectStore};
