//! In-memory stores, handy for tests and embedding.

use super::{MemberDirectory, MemberStore, Page, PageRequest, ProjectStore};
use crate::error::{PortfolioError, PortfolioResult};
use crate::member::model::{Member, MemberId, MemberRole};
use crate::project::model::{NewProject, Project, ProjectId};
use crate::project::status::ProjectStatus;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Default)]
struct Inner {
    members: BTreeMap<MemberId, Member>,
    projects: BTreeMap<ProjectId, Project>,
    last_member_id: MemberId,
    last_project_id: ProjectId,
}

/// Members and projects kept in ordered maps. Clones share state.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> PortfolioResult<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| PortfolioError::Store("in-memory store mutex poisoned".to_string()))
    }
}

impl MemberDirectory for InMemoryStore {
    fn find_member(&self, id: MemberId) -> PortfolioResult<Option<Member>> {
        Ok(self.lock()?.members.get(&id).cloned())
    }
}

impl MemberStore for InMemoryStore {
    fn insert_member(&self, name: &str, role: MemberRole) -> PortfolioResult<Member> {
        let mut inner = self.lock()?;
        inner.last_member_id += 1;
        let member = Member {
            id: inner.last_member_id,
            name: name.to_string(),
            role,
        };
        inner.members.insert(member.id, member.clone());
        Ok(member)
    }

    fn list_members(&self, role: Option<MemberRole>) -> PortfolioResult<Vec<Member>> {
        Ok(self
            .lock()?
            .members
            .values()
            .filter(|m| role.map_or(true, |r| m.role == r))
            .cloned()
            .collect())
    }
}

impl ProjectStore for InMemoryStore {
    fn find_project(&self, id: ProjectId) -> PortfolioResult<Option<Project>> {
        Ok(self.lock()?.projects.get(&id).cloned())
    }

    fn all_projects(&self) -> PortfolioResult<Vec<Project>> {
        Ok(self.lock()?.projects.values().cloned().collect())
    }

    fn projects_page(
        &self,
        request: PageRequest,
        status: Option<ProjectStatus>,
    ) -> PortfolioResult<Page<Project>> {
        let inner = self.lock()?;
        let matching: Vec<&Project> = inner
            .projects
            .values()
            .filter(|p| status.map_or(true, |s| p.status == s))
            .collect();
        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let items = matching
            .iter()
            .skip(offset)
            .take(request.size as usize)
            .map(|p| (*p).clone())
            .collect();
        Ok(Page::new(items, request, matching.len() as u64))
    }

    fn insert_project(&self, project: NewProject) -> PortfolioResult<Project> {
        let mut inner = self.lock()?;
        inner.last_project_id += 1;
        let project = Project {
            id: inner.last_project_id,
            name: project.name,
            start_date: Some(project.start_date),
            planned_end_date: Some(project.planned_end_date),
            actual_end_date: None,
            budget: project.budget,
            description: project.description,
            manager_id: Some(project.manager_id),
            status: project.status,
            staff: project.staff,
        };
        inner.projects.insert(project.id, project.clone());
        Ok(project)
    }

    fn save_project(&self, project: &Project) -> PortfolioResult<()> {
        let mut inner = self.lock()?;
        match inner.projects.get_mut(&project.id) {
            Some(slot) => {
                *slot = project.clone();
                Ok(())
            }
            None => Err(PortfolioError::ProjectNotFound(project.id)),
        }
    }

    fn delete_project(&self, id: ProjectId) -> PortfolioResult<()> {
        self.lock()?
            .projects
            .remove(&id)
            .map(|_| ())
            .ok_or(PortfolioError::ProjectNotFound(id))
    }

    fn active_allocations(&self, member_id: MemberId) -> PortfolioResult<usize> {
        Ok(self
            .lock()?
            .projects
            .values()
            .filter(|p| p.status.is_active() && p.staff.contains(&member_id))
            .count())
    }
}
