//! Project-related database queries.

use crate::pool::{DbError, DbPool, DbResult};
use chrono::NaiveDate;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

/// Project row from database, with its staff assignments attached.
#[derive(Debug, Clone)]
pub struct ProjectRow {
    pub id: i64,
    pub name: String,
    pub start_date: Option<NaiveDate>,
    pub planned_end_date: Option<NaiveDate>,
    pub actual_end_date: Option<NaiveDate>,
    pub budget_cents: i64,
    pub description: String,
    pub manager_id: Option<i64>,
    pub status: String,
    pub staff_ids: Vec<i64>,
}

/// Column values for a project that has not been assigned an id yet.
#[derive(Debug, Clone)]
pub struct NewProjectRow<'a> {
    pub name: &'a str,
    pub start_date: Option<NaiveDate>,
    pub planned_end_date: Option<NaiveDate>,
    pub budget_cents: i64,
    pub description: &'a str,
    pub manager_id: Option<i64>,
    pub status: &'a str,
    pub staff_ids: &'a [i64],
}

const PROJECT_COLUMNS: &str = "id, name, start_date, planned_end_date, actual_end_date,
     budget_cents, description, manager_id, status";

fn map_project(row: &rusqlite::Row<'_>) -> rusqlite::Result<ProjectRow> {
    Ok(ProjectRow {
        id: row.get(0)?,
        name: row.get(1)?,
        start_date: row.get(2)?,
        planned_end_date: row.get(3)?,
        actual_end_date: row.get(4)?,
        budget_cents: row.get(5)?,
        description: row.get(6)?,
        manager_id: row.get(7)?,
        status: row.get(8)?,
        staff_ids: Vec::new(),
    })
}

fn load_staff(conn: &Connection, project_id: i64) -> DbResult<Vec<i64>> {
    let mut stmt = conn.prepare_cached(
        "SELECT member_id FROM project_staff WHERE project_id = ?1 ORDER BY member_id",
    )?;
    let ids = stmt.query_map(params![project_id], |row| row.get(0))?;
    ids.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
}

fn attach_staff(conn: &Connection, mut rows: Vec<ProjectRow>) -> DbResult<Vec<ProjectRow>> {
    for row in &mut rows {
        row.staff_ids = load_staff(conn, row.id)?;
    }
    Ok(rows)
}

fn replace_staff(conn: &Connection, project_id: i64, staff_ids: &[i64]) -> DbResult<()> {
    conn.execute(
        "DELETE FROM project_staff WHERE project_id = ?1",
        params![project_id],
    )?;
    let mut stmt =
        conn.prepare_cached("INSERT INTO project_staff (project_id, member_id) VALUES (?1, ?2)")?;
    for member_id in staff_ids {
        stmt.execute(params![project_id, member_id])?;
    }
    Ok(())
}

/// Insert a project together with its staff and return the assigned id.
///
/// Both writes happen in one transaction.
pub fn create_project(pool: &DbPool, project: &NewProjectRow<'_>) -> DbResult<i64> {
    pool.with_conn_mut(|conn| {
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO projects (name, start_date, planned_end_date, budget_cents,
                                   description, manager_id, status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                project.name,
                project.start_date,
                project.planned_end_date,
                project.budget_cents,
                project.description,
                project.manager_id,
                project.status,
            ],
        )?;
        let id = tx.last_insert_rowid();
        replace_staff(&tx, id, project.staff_ids)?;
        tx.commit()?;
        Ok(id)
    })
}

/// Look up a project by ID, returning `None` when absent.
pub fn find_project(pool: &DbPool, id: i64) -> DbResult<Option<ProjectRow>> {
    pool.with_conn(|conn| {
        let row = conn
            .query_row(
                &format!("SELECT {} FROM projects WHERE id = ?1", PROJECT_COLUMNS),
                params![id],
                map_project,
            )
            .optional()?;

        match row {
            Some(mut row) => {
                row.staff_ids = load_staff(conn, row.id)?;
                Ok(Some(row))
            }
            None => Ok(None),
        }
    })
}

/// Get a project by ID.
pub fn get_project(pool: &DbPool, id: i64) -> DbResult<ProjectRow> {
    find_project(pool, id)?.ok_or_else(|| DbError::NotFound(format!("Project: {}", id)))
}

/// List all projects.
pub fn list_projects(pool: &DbPool) -> DbResult<Vec<ProjectRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM projects ORDER BY id",
            PROJECT_COLUMNS
        ))?;
        let rows = stmt
            .query_map([], map_project)?
            .collect::<Result<Vec<_>, _>>()?;
        attach_staff(conn, rows)
    })
}

/// List one page of projects, optionally restricted to a status.
pub fn list_projects_page(
    pool: &DbPool,
    status: Option<&str>,
    limit: i64,
    offset: i64,
) -> DbResult<Vec<ProjectRow>> {
    pool.with_conn(|conn| {
        let rows = match status {
            Some(status) => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM projects WHERE status = ?1 ORDER BY id LIMIT ?2 OFFSET ?3",
                    PROJECT_COLUMNS
                ))?;
                let rows = stmt
                    .query_map(params![status, limit, offset], map_project)?
                    .collect::<Result<Vec<_>, _>>()?;
                rows
            }
            None => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM projects ORDER BY id LIMIT ?1 OFFSET ?2",
                    PROJECT_COLUMNS
                ))?;
                let rows = stmt
                    .query_map(params![limit, offset], map_project)?
                    .collect::<Result<Vec<_>, _>>()?;
                rows
            }
        };
        attach_staff(conn, rows)
    })
}

/// Count projects, optionally restricted to a status.
pub fn count_projects(pool: &DbPool, status: Option<&str>) -> DbResult<i64> {
    pool.with_conn(|conn| {
        let count = match status {
            Some(status) => conn.query_row(
                "SELECT COUNT(*) FROM projects WHERE status = ?1",
                params![status],
                |row| row.get(0),
            )?,
            None => conn.query_row("SELECT COUNT(*) FROM projects", [], |row| row.get(0))?,
        };
        Ok(count)
    })
}

/// Overwrite a project's columns and staff set.
pub fn update_project(pool: &DbPool, project: &ProjectRow) -> DbResult<()> {
    pool.with_conn_mut(|conn| {
        let tx = conn.transaction()?;
        let changed = tx.execute(
            "UPDATE projects
             SET name = ?1, start_date = ?2, planned_end_date = ?3, actual_end_date = ?4,
                 budget_cents = ?5, description = ?6, manager_id = ?7, status = ?8,
                 updated_at = datetime('now')
             WHERE id = ?9",
            params![
                project.name,
                project.start_date,
                project.planned_end_date,
                project.actual_end_date,
                project.budget_cents,
                project.description,
                project.manager_id,
                project.status,
                project.id,
            ],
        )?;
        if changed == 0 {
            return Err(DbError::NotFound(format!("Project: {}", project.id)));
        }
        replace_staff(&tx, project.id, &project.staff_ids)?;
        tx.commit()?;
        Ok(())
    })
}

/// Delete a project. Returns whether a row was removed.
pub fn delete_project(pool: &DbPool, id: i64) -> DbResult<bool> {
    pool.with_conn(|conn| {
        let deleted = conn.execute("DELETE FROM projects WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    })
}

/// Count the projects a member is staffed on, ignoring projects whose status
/// is one of `excluded_statuses`.
pub fn count_member_projects(
    pool: &DbPool,
    member_id: i64,
    excluded_statuses: &[&str],
) -> DbResult<i64> {
    pool.with_conn(|conn| {
        let mut sql = String::from(
            "SELECT COUNT(*) FROM project_staff ps
             JOIN projects p ON p.id = ps.project_id
             WHERE ps.member_id = ?",
        );
        if !excluded_statuses.is_empty() {
            let placeholders = vec!["?"; excluded_statuses.len()].join(", ");
            sql.push_str(&format!(" AND p.status NOT IN ({})", placeholders));
        }

        let mut values: Vec<rusqlite::types::Value> = vec![member_id.into()];
        values.extend(excluded_statuses.iter().map(|s| s.to_string().into()));

        let count = conn.query_row(&sql, params_from_iter(values), |row| row.get(0))?;
        Ok(count)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init_memory_pool;
    use crate::queries::members;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn seed(pool: &DbPool, status: &str, staff: &[i64]) -> i64 {
        create_project(
            pool,
            &NewProjectRow {
                name: "Apollo",
                start_date: date(2024, 1, 1),
                planned_end_date: date(2024, 3, 1),
                budget_cents: 5_000_000,
                description: "Moon shot",
                manager_id: None,
                status,
                staff_ids: staff,
            },
        )
        .unwrap()
    }

    fn staff_pool() -> (DbPool, Vec<i64>) {
        let pool = init_memory_pool().unwrap();
        let ids = (0..3)
            .map(|i| members::create_member(&pool, &format!("Staff {}", i), "staff").unwrap())
            .collect();
        (pool, ids)
    }

    #[test]
    fn test_create_and_get_project_with_staff() {
        let (pool, staff) = staff_pool();
        let id = seed(&pool, "under_review", &staff[..2]);

        let row = get_project(&pool, id).unwrap();
        assert_eq!(row.name, "Apollo");
        assert_eq!(row.start_date, date(2024, 1, 1));
        assert_eq!(row.actual_end_date, None);
        assert_eq!(row.budget_cents, 5_000_000);
        assert_eq!(row.staff_ids, staff[..2].to_vec());
    }

    #[test]
    fn test_update_replaces_staff() {
        let (pool, staff) = staff_pool();
        let id = seed(&pool, "under_review", &staff[..2]);

        let mut row = get_project(&pool, id).unwrap();
        row.staff_ids = vec![staff[2]];
        row.status = "closed".to_string();
        row.actual_end_date = date(2024, 2, 1);
        update_project(&pool, &row).unwrap();

        let reloaded = get_project(&pool, id).unwrap();
        assert_eq!(reloaded.staff_ids, vec![staff[2]]);
        assert_eq!(reloaded.status, "closed");
        assert_eq!(reloaded.actual_end_date, date(2024, 2, 1));
    }

    #[test]
    fn test_update_missing_project() {
        let (pool, _) = staff_pool();
        let row = ProjectRow {
            id: 42,
            name: "Ghost".to_string(),
            start_date: None,
            planned_end_date: None,
            actual_end_date: None,
            budget_cents: 1,
            description: "none".to_string(),
            manager_id: None,
            status: "under_review".to_string(),
            staff_ids: vec![],
        };
        assert!(matches!(update_project(&pool, &row), Err(DbError::NotFound(_))));
    }

    #[test]
    fn test_paging_and_status_filter() {
        let (pool, staff) = staff_pool();
        for _ in 0..3 {
            seed(&pool, "under_review", &staff[..1]);
        }
        seed(&pool, "planned", &staff[..1]);

        let page = list_projects_page(&pool, None, 2, 0).unwrap();
        assert_eq!(page.len(), 2);
        let rest = list_projects_page(&pool, None, 2, 2).unwrap();
        assert_eq!(rest.len(), 2);
        assert!(rest.iter().all(|p| p.staff_ids == staff[..1].to_vec()));

        assert_eq!(count_projects(&pool, None).unwrap(), 4);
        assert_eq!(count_projects(&pool, Some("planned")).unwrap(), 1);
        assert_eq!(
            list_projects_page(&pool, Some("planned"), 10, 0).unwrap().len(),
            1
        );
    }

    #[test]
    fn test_delete_cascades_staff() {
        let (pool, staff) = staff_pool();
        let id = seed(&pool, "under_review", &staff);

        assert!(delete_project(&pool, id).unwrap());
        assert!(!delete_project(&pool, id).unwrap());
        assert!(find_project(&pool, id).unwrap().is_none());
        assert_eq!(count_member_projects(&pool, staff[0], &[]).unwrap(), 0);
    }

    #[test]
    fn test_count_member_projects_skips_excluded_statuses() {
        let (pool, staff) = staff_pool();
        seed(&pool, "under_review", &staff[..1]);
        seed(&pool, "in_progress", &staff[..1]);
        seed(&pool, "closed", &staff[..1]);
        seed(&pool, "cancelled", &staff[..1]);

        assert_eq!(count_member_projects(&pool, staff[0], &[]).unwrap(), 4);
        assert_eq!(
            count_member_projects(&pool, staff[0], &["closed", "cancelled"]).unwrap(),
            2
        );
        assert_eq!(count_member_projects(&pool, staff[1], &["closed"]).unwrap(), 0);
    }
}
