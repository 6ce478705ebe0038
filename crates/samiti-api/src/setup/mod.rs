//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from
//! main.rs for better organization and testability.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use crate::state::AppState;
use anyhow::Result;
use samiti_core::{BcryptPasswordHasher, Config};
use samiti_db::MemberRepository;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry();

    tracing::info!("Configuration loaded");

    let pool = database::setup_database(&config).await?;
    let uploads = storage::setup_storage(&config).await?;

    let state = Arc::new(AppState {
        pool: pool.clone(),
        members: MemberRepository::new(pool),
        uploads,
        hasher: Arc::new(BcryptPasswordHasher::new(config.bcrypt_cost())),
        config: config.clone(),
    });

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
