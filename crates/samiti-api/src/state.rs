//! Application state shared across handlers.

use samiti_core::{Config, PasswordHasher};
use samiti_db::MemberRepository;
use samiti_storage::UploadStore;
use sqlx::PgPool;
use std::sync::Arc;

/// Main application state, injected into handlers as `Arc<AppState>`.
///
/// Uploads and hashing sit behind trait objects so tests can substitute
/// temp-scoped or cheap implementations without touching the handler code.
pub struct AppState {
    pub pool: PgPool,
    pub members: MemberRepository,
    pub uploads: Arc<dyn UploadStore>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub config: Config,
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
