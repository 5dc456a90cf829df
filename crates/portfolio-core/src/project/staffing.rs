//! Team-size and allocation rules for project staffing.

use crate::error::{PortfolioError, PortfolioResult};
use crate::member::model::{Member, MemberId, MemberRole};
use crate::project::model::Project;
use crate::store::{MemberDirectory, ProjectStore};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Maximum number of staff members on one project.
pub const MAX_STAFF: usize = 10;

/// Maximum number of active projects a staff member may be allocated to.
pub const MAX_ACTIVE_PROJECTS: usize = 3;

/// Resolve `member_id` and require it to hold `expected`.
fn resolve_with_role<D>(directory: &D, member_id: MemberId, expected: MemberRole) -> PortfolioResult<Member>
where
    D: MemberDirectory + ?Sized,
{
    let member = directory.find_member(member_id)?.ok_or_else(|| {
        warn!(member_id, "Member not found");
        PortfolioError::MemberNotFound(member_id)
    })?;

    if member.role != expected {
        warn!(member_id, role = %member.role, expected = %expected, "Member has the wrong role");
        return Err(PortfolioError::RoleMismatch {
            member_id,
            expected,
            actual: member.role,
        });
    }

    debug!(member_id, name = %member.name, role = %member.role, "Member validated");
    Ok(member)
}

/// A project's manager must exist and hold the manager role.
pub fn validate_manager<D>(directory: &D, member_id: MemberId) -> PortfolioResult<Member>
where
    D: MemberDirectory + ?Sized,
{
    resolve_with_role(directory, member_id, MemberRole::Manager)
}

/// Staff assignments must reference existing members with the staff role.
pub fn validate_staff<D>(directory: &D, member_id: MemberId) -> PortfolioResult<Member>
where
    D: MemberDirectory + ?Sized,
{
    resolve_with_role(directory, member_id, MemberRole::Staff)
}

/// Team-level checks for adding `member_id` to `staff`, given how many active
/// projects the member is already allocated to.
pub fn check_addition(
    staff: &BTreeSet<MemberId>,
    member_id: MemberId,
    active_allocations: usize,
) -> PortfolioResult<()> {
    if staff.contains(&member_id) {
        return Err(PortfolioError::AlreadyAllocated(member_id));
    }
    if staff.len() >= MAX_STAFF {
        return Err(PortfolioError::CapacityExceeded { limit: MAX_STAFF });
    }
    if active_allocations >= MAX_ACTIVE_PROJECTS {
        return Err(PortfolioError::OverAllocated {
            member_id,
            limit: MAX_ACTIVE_PROJECTS,
        });
    }
    Ok(())
}

/// Validate the requested staff of a project that does not exist yet.
///
/// Applies every addition rule in request order against a staged set and
/// returns the complete set. Nothing is written.
pub fn stage_staff<S, D>(
    store: &S,
    directory: &D,
    requested: &[MemberId],
) -> PortfolioResult<BTreeSet<MemberId>>
where
    S: ProjectStore + ?Sized,
    D: MemberDirectory + ?Sized,
{
    let mut staged = BTreeSet::new();
    for &member_id in requested {
        validate_staff(directory, member_id)?;
        let allocations = store.active_allocations(member_id)?;
        check_addition(&staged, member_id, allocations).inspect_err(|e| {
            warn!(member_id, error = %e, "Staff member rejected");
        })?;
        staged.insert(member_id);
    }
    Ok(staged)
}

/// Add a staff member to a persisted project and save it.
pub fn add_staff_member<S, D>(
    store: &S,
    directory: &D,
    project: &mut Project,
    member_id: MemberId,
) -> PortfolioResult<()>
where
    S: ProjectStore + ?Sized,
    D: MemberDirectory + ?Sized,
{
    validate_staff(directory, member_id)?;
    let allocations = store.active_allocations(member_id)?;
    check_addition(&project.staff, member_id, allocations).inspect_err(|e| {
        warn!(project_id = project.id, member_id, error = %e, "Staff member rejected");
    })?;

    project.staff.insert(member_id);
    store.save_project(project)
}

/// Remove a staff member from a persisted project and save it.
///
/// The project is left untouched when a rule rejects the removal.
pub fn remove_staff_member<S>(store: &S, project: &mut Project, member_id: MemberId) -> PortfolioResult<()>
where
    S: ProjectStore + ?Sized,
{
    if !project.staff.contains(&member_id) {
        return Err(PortfolioError::StaffNotAssigned(member_id));
    }
    if project.staff.len() <= 1 {
        warn!(project_id = project.id, member_id, "Refusing to remove the last staff member");
        return Err(PortfolioError::MinimumStaffViolation);
    }

    project.staff.remove(&member_id);
    store.save_project(project)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::project::model::NewProject;
    use crate::project::status::ProjectStatus;
    use crate::store::memory::InMemoryStore;
    use crate::store::MemberStore;
    use chrono::NaiveDate;

    fn store_with_members(staff: usize) -> (InMemoryStore, Member, Vec<MemberId>) {
        let store = InMemoryStore::new();
        let manager = store.insert_member("Manager", MemberRole::Manager).unwrap();
        let ids = (0..staff)
            .map(|i| {
                store
                    .insert_member(&format!("Staff {}", i), MemberRole::Staff)
                    .unwrap()
                    .id
            })
            .collect();
        (store, manager, ids)
    }

    fn persisted(store: &InMemoryStore, manager: &Member, staff: &[MemberId]) -> Project {
        store
            .insert_project(NewProject {
                name: "Apollo".into(),
                start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                planned_end_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                budget: Money::from_units(10_000),
                description: "Moon shot".into(),
                manager_id: manager.id,
                status: ProjectStatus::UnderReview,
                staff: staff.iter().copied().collect(),
            })
            .unwrap()
    }

    #[test]
    fn test_validate_manager_roles() {
        let (store, manager, staff) = store_with_members(1);
        assert_eq!(validate_manager(&store, manager.id).unwrap(), manager);
        assert!(matches!(
            validate_manager(&store, staff[0]),
            Err(PortfolioError::RoleMismatch {
                expected: MemberRole::Manager,
                actual: MemberRole::Staff,
                ..
            })
        ));
        assert!(matches!(
            validate_manager(&store, 404),
            Err(PortfolioError::MemberNotFound(404))
        ));
    }

    #[test]
    fn test_add_rejects_manager_and_unknown_member() {
        let (store, manager, staff) = store_with_members(1);
        let mut project = persisted(&store, &manager, &staff);

        assert!(matches!(
            add_staff_member(&store, &store, &mut project, manager.id),
            Err(PortfolioError::RoleMismatch { .. })
        ));
        assert!(matches!(
            add_staff_member(&store, &store, &mut project, 404),
            Err(PortfolioError::MemberNotFound(404))
        ));
        assert!(matches!(
            add_staff_member(&store, &store, &mut project, staff[0]),
            Err(PortfolioError::AlreadyAllocated(_))
        ));
    }

    #[test]
    fn test_eleventh_member_exceeds_capacity() {
        let (store, manager, staff) = store_with_members(11);
        let mut project = persisted(&store, &manager, &staff[..1]);

        for &id in &staff[1..10] {
            add_staff_member(&store, &store, &mut project, id).unwrap();
        }
        assert_eq!(project.staff.len(), MAX_STAFF);

        let err = add_staff_member(&store, &store, &mut project, staff[10]).unwrap_err();
        assert!(matches!(err, PortfolioError::CapacityExceeded { limit: 10 }));
        let stored = store.find_project(project.id).unwrap().unwrap();
        assert_eq!(stored.staff.len(), MAX_STAFF);
    }

    #[test]
    fn test_fourth_active_project_is_over_allocation() {
        let (store, manager, staff) = store_with_members(2);
        for _ in 0..3 {
            persisted(&store, &manager, &staff[..1]);
        }
        let mut fourth = persisted(&store, &manager, &staff[1..]);

        assert!(matches!(
            add_staff_member(&store, &store, &mut fourth, staff[0]),
            Err(PortfolioError::OverAllocated { limit: 3, .. })
        ));
    }

    #[test]
    fn test_inactive_projects_do_not_count_toward_allocation() {
        let (store, manager, staff) = store_with_members(2);
        for status in [ProjectStatus::Closed, ProjectStatus::Cancelled, ProjectStatus::Planned] {
            let mut project = persisted(&store, &manager, &staff[..1]);
            project.status = status;
            store.save_project(&project).unwrap();
        }
        let mut next = persisted(&store, &manager, &staff[1..]);

        add_staff_member(&store, &store, &mut next, staff[0]).unwrap();
        assert!(next.staff.contains(&staff[0]));
    }

    #[test]
    fn test_remove_last_member_is_rejected_and_leaves_set_unchanged() {
        let (store, manager, staff) = store_with_members(2);
        let mut project = persisted(&store, &manager, &staff);

        remove_staff_member(&store, &mut project, staff[0]).unwrap();
        assert!(matches!(
            remove_staff_member(&store, &mut project, staff[1]),
            Err(PortfolioError::MinimumStaffViolation)
        ));
        assert_eq!(project.staff.iter().copied().collect::<Vec<_>>(), vec![staff[1]]);
        let stored = store.find_project(project.id).unwrap().unwrap();
        assert_eq!(stored.staff, project.staff);
    }

    #[test]
    fn test_remove_unassigned_member() {
        let (store, manager, staff) = store_with_members(2);
        let mut project = persisted(&store, &manager, &staff[..1]);
        assert!(matches!(
            remove_staff_member(&store, &mut project, staff[1]),
            Err(PortfolioError::StaffNotAssigned(_))
        ));
    }

    #[test]
    fn test_stage_staff_rejects_duplicates_in_request() {
        let (store, _, staff) = store_with_members(2);
        let staged = stage_staff(&store, &store, &[staff[1], staff[0]]).unwrap();
        assert_eq!(staged.len(), 2);

        assert!(matches!(
            stage_staff(&store, &store, &[staff[0], staff[0]]),
            Err(PortfolioError::AlreadyAllocated(_))
        ));
    }
}
