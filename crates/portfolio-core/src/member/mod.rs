//! Member directory operations.

pub mod model;

use crate::error::{PortfolioError, PortfolioResult};
use crate::store::MemberStore;
use model::{Member, MemberId, MemberRole};
use tracing::{debug, info};

/// Register a new member.
pub fn create_member<S>(store: &S, name: &str, role: &str) -> PortfolioResult<Member>
where
    S: MemberStore + ?Sized,
{
    let name = name.trim();
    if name.is_empty() {
        return Err(PortfolioError::validation("Member name must not be blank"));
    }
    let role: MemberRole = role.parse()?;

    let member = store.insert_member(name, role)?;
    info!(member_id = member.id, role = %member.role, "Member created");
    Ok(member)
}

/// Get a member by ID.
pub fn get_member<S>(store: &S, id: MemberId) -> PortfolioResult<Member>
where
    S: MemberStore + ?Sized,
{
    store
        .find_member(id)?
        .ok_or(PortfolioError::MemberNotFound(id))
}

/// List all members.
pub fn list_members<S>(store: &S) -> PortfolioResult<Vec<Member>>
where
    S: MemberStore + ?Sized,
{
    let members = store.list_members(None)?;
    debug!(count = members.len(), "Listed members");
    Ok(members)
}

/// List members holding `role`.
pub fn list_members_by_role<S>(store: &S, role: &str) -> PortfolioResult<Vec<Member>>
where
    S: MemberStore + ?Sized,
{
    let role: MemberRole = role.parse()?;
    let members = store.list_members(Some(role))?;
    debug!(count = members.len(), role = %role, "Listed members by role");
    Ok(members)
}
