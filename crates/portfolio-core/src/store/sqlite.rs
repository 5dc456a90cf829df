//! SQLite-backed stores.

use super::{MemberDirectory, MemberStore, Page, PageRequest, ProjectStore};
use crate::error::{PortfolioError, PortfolioResult};
use crate::member::model::{Member, MemberId, MemberRole};
use crate::project::model::{NewProject, Project, ProjectId};
use crate::project::status::ProjectStatus;
use portfolio_db::queries::{members, projects};
use portfolio_db::DbPool;

/// Statuses that do not count toward a member's allocation.
const INACTIVE_STATUSES: [&str; 2] = [
    ProjectStatus::Closed.as_str(),
    ProjectStatus::Cancelled.as_str(),
];

impl MemberDirectory for DbPool {
    fn find_member(&self, id: MemberId) -> PortfolioResult<Option<Member>> {
        members::find_member(self, id)?
            .map(Member::from_row)
            .transpose()
    }
}

impl MemberStore for DbPool {
    fn insert_member(&self, name: &str, role: MemberRole) -> PortfolioResult<Member> {
        let id = members::create_member(self, name, role.as_str())?;
        Member::from_row(members::get_member(self, id)?)
    }

    fn list_members(&self, role: Option<MemberRole>) -> PortfolioResult<Vec<Member>> {
        let rows = match role {
            Some(role) => members::list_members_by_role(self, role.as_str())?,
            None => members::list_members(self)?,
        };
        rows.into_iter().map(Member::from_row).collect()
    }
}

impl ProjectStore for DbPool {
    fn find_project(&self, id: ProjectId) -> PortfolioResult<Option<Project>> {
        projects::find_project(self, id)?
            .map(Project::from_row)
            .transpose()
    }

    fn all_projects(&self) -> PortfolioResult<Vec<Project>> {
        projects::list_projects(self)?
            .into_iter()
            .map(Project::from_row)
            .collect()
    }

    fn projects_page(
        &self,
        request: PageRequest,
        status: Option<ProjectStatus>,
    ) -> PortfolioResult<Page<Project>> {
        let status = status.map(ProjectStatus::as_str);
        let offset = i64::try_from(request.offset())
            .map_err(|_| PortfolioError::validation("Page offset out of range"))?;

        let total = projects::count_projects(self, status)?;
        let rows = projects::list_projects_page(self, status, i64::from(request.size), offset)?;
        let items = rows
            .into_iter()
            .map(Project::from_row)
            .collect::<PortfolioResult<Vec<_>>>()?;

        Ok(Page::new(items, request, total.max(0) as u64))
    }

    fn insert_project(&self, project: NewProject) -> PortfolioResult<Project> {
        let staff_ids: Vec<i64> = project.staff.iter().copied().collect();
        let id = projects::create_project(
            self,
            &projects::NewProjectRow {
                name: &project.name,
                start_date: Some(project.start_date),
                planned_end_date: Some(project.planned_end_date),
                budget_cents: project.budget.cents(),
                description: &project.description,
                manager_id: Some(project.manager_id),
                status: project.status.as_str(),
                staff_ids: &staff_ids,
            },
        )?;
        Project::from_row(projects::get_project(self, id)?)
    }

    fn save_project(&self, project: &Project) -> PortfolioResult<()> {
        projects::update_project(self, &project.to_row()).map_err(|e| match e {
            portfolio_db::DbError::NotFound(_) => PortfolioError::ProjectNotFound(project.id),
            e => e.into(),
        })
    }

    fn delete_project(&self, id: ProjectId) -> PortfolioResult<()> {
        if projects::delete_project(self, id)? {
            Ok(())
        } else {
            Err(PortfolioError::ProjectNotFound(id))
        }
    }

    fn active_allocations(&self, member_id: MemberId) -> PortfolioResult<usize> {
        let count = projects::count_member_projects(self, member_id, &INACTIVE_STATUSES)?;
        Ok(count.max(0) as usize)
    }
}
