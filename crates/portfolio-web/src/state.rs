//! Application state.

use portfolio_core::ProjectService;
use portfolio_db::DbPool;
use std::sync::Arc;

/// Project service backed by SQLite for both projects and members.
pub type SqliteProjectService = ProjectService<DbPool, DbPool>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub projects: Arc<SqliteProjectService>,
    pub page_size: u32,
}

impl AppState {
    pub fn new(db: DbPool) -> Self {
        Self::with_service(db.clone(), ProjectService::new(db.clone(), db))
    }

    /// Build state around an already configured service, e.g. one with a fixed clock.
    pub fn with_service(db: DbPool, projects: SqliteProjectService) -> Self {
        Self {
            db,
            projects: Arc::new(projects),
            page_size: portfolio_core::store::DEFAULT_PAGE_SIZE,
        }
    }

    /// Page size used when a listing request does not give one.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }
}
