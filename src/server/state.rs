use sea_orm::DatabaseConnection;

/// Application state shared across all HTTP request handlers.
///
/// Cloned for each request; `DatabaseConnection` is a pool handle so clones are cheap.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: DatabaseConnection,

    /// Application base URL for generating password reset links.
    pub app_url: String,
}

impl AppState {
    pub fn new(db: DatabaseConnection, app_url: String) -> Self {
        Self { db, app_url }
    }
}
