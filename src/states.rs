use sqlx::SqlitePool;

// ============================================================================
// APPLICATION STATE - Shared data across all requests
// ============================================================================
/// Cloned into every handler. The pool hands a connection to each query and
/// reclaims it when the query future completes, on success and error paths
/// alike.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub session_secret: String,
}
