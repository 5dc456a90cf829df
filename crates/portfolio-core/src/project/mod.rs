//! Project management: lifecycle, staffing and reporting.

pub mod model;
pub mod report;
pub mod risk;
pub mod staffing;
pub mod status;
pub mod view;

use crate::clock::{Clock, SystemClock};
use crate::error::{PortfolioError, PortfolioResult};
use crate::member::model::{Member, MemberId};
use crate::store::{MemberDirectory, Page, PageRequest, ProjectStore};
use model::{positive_budget, required_text, CreateProject, NewProject, Project, ProjectId, ProjectUpdate};
use report::PortfolioReport;
use status::ProjectStatus;
use std::sync::Arc;
use tracing::{debug, info, warn};
use view::ProjectView;

/// Entry point for every project operation.
///
/// Operations run synchronously against the store. Checks and the write that
/// follows them are not isolated from concurrent callers.
pub struct ProjectService<S, D> {
    store: S,
    directory: D,
    clock: Arc<dyn Clock>,
}

impl<S, D> ProjectService<S, D>
where
    S: ProjectStore,
    D: MemberDirectory,
{
    pub fn new(store: S, directory: D) -> Self {
        Self {
            store,
            directory,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used to stamp the actual end date.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    fn load(&self, id: ProjectId) -> PortfolioResult<Project> {
        self.store.find_project(id)?.ok_or_else(|| {
            warn!(project_id = id, "Project not found");
            PortfolioError::ProjectNotFound(id)
        })
    }

    fn render(&self, project: &Project) -> PortfolioResult<ProjectView> {
        let manager = match project.manager_id {
            Some(id) => self.directory.find_member(id)?,
            None => None,
        };
        Ok(ProjectView::new(project, manager))
    }

    fn render_with(&self, project: &Project, manager: Member) -> ProjectView {
        ProjectView::new(project, Some(manager))
    }

    /// List one page of projects, optionally filtered by status.
    pub fn list(
        &self,
        request: PageRequest,
        status: Option<ProjectStatus>,
    ) -> PortfolioResult<Page<ProjectView>> {
        let page = self.store.projects_page(request, status)?;
        debug!(
            page = request.page,
            returned = page.items.len(),
            total = page.total_items,
            status = ?status,
            "Listed projects"
        );
        page.try_map(|project| self.render(&project))
    }

    /// Get a project by ID.
    pub fn get(&self, id: ProjectId) -> PortfolioResult<ProjectView> {
        let project = self.load(id)?;
        self.render(&project)
    }

    /// Create a project with its manager and initial staff.
    ///
    /// Every requested staff member is validated before anything is written;
    /// the project and its complete staff set are then stored together.
    pub fn create(&self, request: CreateProject) -> PortfolioResult<ProjectView> {
        let fields = request.validate()?;
        info!(name = %fields.name, staff = fields.staff.len(), "Creating project");

        if fields.staff.is_empty() {
            warn!(name = %fields.name, "Attempt to create a project without staff");
            return Err(PortfolioError::EmptyStaffList);
        }

        let manager = staffing::validate_manager(&self.directory, fields.manager_id)?;
        let staff = staffing::stage_staff(&self.store, &self.directory, &fields.staff)?;

        let project = self.store.insert_project(NewProject {
            name: fields.name,
            start_date: fields.start_date,
            planned_end_date: fields.planned_end_date,
            budget: fields.budget,
            description: fields.description,
            manager_id: manager.id,
            status: ProjectStatus::UnderReview,
            staff,
        })?;

        info!(project_id = project.id, name = %project.name, "Project created");
        Ok(self.render_with(&project, manager))
    }

    /// Apply the fields present in `update`.
    pub fn update(&self, id: ProjectId, update: ProjectUpdate) -> PortfolioResult<ProjectView> {
        let mut project = self.load(id)?;
        info!(project_id = id, "Updating project");

        if let Some(name) = update.name.as_deref() {
            project.name = required_text("name", Some(name))?;
        }
        if let Some(start_date) = update.start_date {
            debug!(project_id = id, from = ?project.start_date, to = %start_date, "Updating start date");
            project.start_date = Some(start_date);
        }
        if let Some(planned_end_date) = update.planned_end_date {
            debug!(project_id = id, from = ?project.planned_end_date, to = %planned_end_date, "Updating planned end date");
            project.planned_end_date = Some(planned_end_date);
        }
        if let Some(budget) = update.budget {
            debug!(project_id = id, from = %project.budget, to = %budget, "Updating budget");
            project.budget = positive_budget(budget)?;
        }
        if let Some(description) = update.description.as_deref() {
            project.description = required_text("description", Some(description))?;
        }
        if let Some(manager_id) = update.manager_id {
            let manager = staffing::validate_manager(&self.directory, manager_id)?;
            info!(project_id = id, manager_id, name = %manager.name, "Manager changed");
            project.manager_id = Some(manager.id);
        }

        self.store.save_project(&project)?;
        info!(project_id = id, name = %project.name, "Project updated");
        self.render(&project)
    }

    /// Delete a project that has not started work.
    pub fn delete(&self, id: ProjectId) -> PortfolioResult<()> {
        let project = self.load(id)?;
        if !project.status.is_deletable() {
            warn!(project_id = id, status = %project.status, "Refusing to delete project");
            return Err(PortfolioError::DeletionForbidden(project.status));
        }

        self.store.delete_project(id)?;
        info!(project_id = id, "Project deleted");
        Ok(())
    }

    /// Move a project to `new_status`, stamping the actual end date on close.
    pub fn change_status(&self, id: ProjectId, new_status: ProjectStatus) -> PortfolioResult<ProjectView> {
        let mut project = self.load(id)?;
        status::validate_transition(project.status, new_status).inspect_err(|_| {
            warn!(project_id = id, from = %project.status, to = %new_status, "Invalid status transition");
        })?;

        let previous = project.status;
        project.status = new_status;
        if new_status == ProjectStatus::Closed {
            project.actual_end_date = Some(self.clock.today());
        }

        self.store.save_project(&project)?;
        info!(project_id = id, from = %previous, to = %new_status, "Project status changed");
        self.render(&project)
    }

    /// Allocate a staff member to a project.
    pub fn add_member(&self, id: ProjectId, member_id: MemberId) -> PortfolioResult<ProjectView> {
        let mut project = self.load(id)?;
        staffing::add_staff_member(&self.store, &self.directory, &mut project, member_id)?;
        info!(project_id = id, member_id, staff = project.staff.len(), "Staff member added");
        self.render(&project)
    }

    /// Release a staff member from a project.
    pub fn remove_member(&self, id: ProjectId, member_id: MemberId) -> PortfolioResult<ProjectView> {
        let mut project = self.load(id)?;
        staffing::remove_staff_member(&self.store, &mut project, member_id)?;
        info!(project_id = id, member_id, staff = project.staff.len(), "Staff member removed");
        self.render(&project)
    }

    /// Aggregate statistics over every project.
    pub fn report(&self) -> PortfolioResult<PortfolioReport> {
        let projects = self.store.all_projects()?;
        let report = PortfolioReport::from_projects(&projects)?;
        debug!(projects = projects.len(), "Portfolio report generated");
        Ok(report)
    }
}
