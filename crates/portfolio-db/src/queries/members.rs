//! Member-related database queries.

use crate::pool::{DbError, DbPool, DbResult};
use rusqlite::{params, OptionalExtension};

/// Member row from database.
#[derive(Debug, Clone)]
pub struct MemberRow {
    pub id: i64,
    pub name: String,
    pub role: String,
}

fn map_member(row: &rusqlite::Row<'_>) -> rusqlite::Result<MemberRow> {
    Ok(MemberRow {
        id: row.get(0)?,
        name: row.get(1)?,
        role: row.get(2)?,
    })
}

/// Insert a member and return its assigned id.
pub fn create_member(pool: &DbPool, name: &str, role: &str) -> DbResult<i64> {
    pool.with_conn(|conn| {
        conn.execute(
            "INSERT INTO members (name, role) VALUES (?1, ?2)",
            params![name, role],
        )?;
        Ok(conn.last_insert_rowid())
    })
}

/// Get a member by ID.
pub fn get_member(pool: &DbPool, id: i64) -> DbResult<MemberRow> {
    find_member(pool, id)?.ok_or_else(|| DbError::NotFound(format!("Member: {}", id)))
}

/// Look up a member by ID, returning `None` when absent.
pub fn find_member(pool: &DbPool, id: i64) -> DbResult<Option<MemberRow>> {
    pool.with_conn(|conn| {
        conn.query_row(
            "SELECT id, name, role FROM members WHERE id = ?1",
            params![id],
            map_member,
        )
        .optional()
        .map_err(DbError::from)
    })
}

/// List all members.
pub fn list_members(pool: &DbPool) -> DbResult<Vec<MemberRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare("SELECT id, name, role FROM members ORDER BY id")?;
        let rows = stmt.query_map([], map_member)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    })
}

/// List members holding the given role.
pub fn list_members_by_role(pool: &DbPool, role: &str) -> DbResult<Vec<MemberRow>> {
    pool.with_conn(|conn| {
        let mut stmt =
            conn.prepare("SELECT id, name, role FROM members WHERE role = ?1 ORDER BY id")?;
        let rows = stmt.query_map(params![role], map_member)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init_memory_pool;

    #[test]
    fn test_create_and_find_member() {
        let pool = init_memory_pool().unwrap();
        let id = create_member(&pool, "Ana", "manager").unwrap();

        let row = find_member(&pool, id).unwrap().unwrap();
        assert_eq!(row.name, "Ana");
        assert_eq!(row.role, "manager");

        assert!(find_member(&pool, id + 100).unwrap().is_none());
        assert!(matches!(get_member(&pool, id + 100), Err(DbError::NotFound(_))));
    }

    #[test]
    fn test_list_members_by_role() {
        let pool = init_memory_pool().unwrap();
        create_member(&pool, "Ana", "manager").unwrap();
        create_member(&pool, "Bruno", "staff").unwrap();
        create_member(&pool, "Carla", "staff").unwrap();

        assert_eq!(list_members(&pool).unwrap().len(), 3);
        let staff = list_members_by_role(&pool, "staff").unwrap();
        assert_eq!(staff.len(), 2);
        assert_eq!(staff[0].name, "Bruno");
    }

    #[test]
    fn test_unknown_role_is_rejected_by_schema() {
        let pool = init_memory_pool().unwrap();
        assert!(create_member(&pool, "Dora", "intern").is_err());
    }
}
