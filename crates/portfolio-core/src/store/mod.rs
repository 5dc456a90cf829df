//! Persistence seams used by the project rules.
//!
//! [`ProjectStore`] and [`MemberDirectory`] are the only capabilities the
//! business rules need. `DbPool` implements them on SQLite (see [`sqlite`]);
//! [`memory::InMemoryStore`] implements them on plain collections.

pub mod memory;
pub mod sqlite;

use crate::error::{PortfolioError, PortfolioResult};
use crate::member::model::{Member, MemberId, MemberRole};
use crate::project::model::{NewProject, Project, ProjectId};
use crate::project::status::ProjectStatus;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Resolves member identifiers.
pub trait MemberDirectory {
    /// Look up a member; `None` when the id is unknown.
    fn find_member(&self, id: MemberId) -> PortfolioResult<Option<Member>>;
}

/// Member registry backing the member directory operations.
pub trait MemberStore: MemberDirectory {
    fn insert_member(&self, name: &str, role: MemberRole) -> PortfolioResult<Member>;

    /// All members ordered by id, optionally restricted to one role.
    fn list_members(&self, role: Option<MemberRole>) -> PortfolioResult<Vec<Member>>;
}

/// Project persistence.
pub trait ProjectStore {
    fn find_project(&self, id: ProjectId) -> PortfolioResult<Option<Project>>;

    /// Every project, ordered by id.
    fn all_projects(&self) -> PortfolioResult<Vec<Project>>;

    /// One page of projects ordered by id, optionally restricted to a status.
    fn projects_page(
        &self,
        request: PageRequest,
        status: Option<ProjectStatus>,
    ) -> PortfolioResult<Page<Project>>;

    /// Persist a new project and its staff set in one write.
    fn insert_project(&self, project: NewProject) -> PortfolioResult<Project>;

    /// Overwrite an existing project, staff set included.
    fn save_project(&self, project: &Project) -> PortfolioResult<()>;

    fn delete_project(&self, id: ProjectId) -> PortfolioResult<()>;

    /// Number of active projects whose staff set contains `member_id`.
    fn active_allocations(&self, member_id: MemberId) -> PortfolioResult<usize>;
}

/// Zero-based page selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> PortfolioResult<Self> {
        if size == 0 || size > MAX_PAGE_SIZE {
            return Err(PortfolioError::validation(format!(
                "Page size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, size
            )));
        }
        Ok(Self { page, size })
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// A page of results plus enough totals to navigate the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        Self {
            items,
            page: request.page,
            size: request.size,
            total_items,
            total_pages: total_items.div_ceil(u64::from(request.size)),
        }
    }

    /// Convert every item, stopping at the first failure.
    pub fn try_map<U, E, F>(self, f: F) -> Result<Page<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        Ok(Page {
            items: self.items.into_iter().map(f).collect::<Result<Vec<_>, _>>()?,
            page: self.page,
            size: self.size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        })
    }
}
