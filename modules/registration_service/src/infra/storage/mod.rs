//! Storage layer - database entities, repositories and the in-memory backend

pub mod entity;
pub mod mapper;
pub mod memory;
pub mod migrations;
pub mod repositories;

use crate::config::StorageConfig;
use crate::domain::repository::{RegistrationRepository, RequirementsRepository, TokenRepository};
use anyhow::Result;
use std::sync::Arc;

/// Initial status of every issued ticket
pub const TICKET_STATUS_ACTIVE: &str = "active";

/// Repository handles for one storage backend
#[derive(Clone)]
pub struct Repositories {
    pub tokens: Arc<dyn TokenRepository>,
    pub requirements: Arc<dyn RequirementsRepository>,
    pub registrations: Arc<dyn RegistrationRepository>,
}

impl Repositories {
    /// All repositories served by one in-memory store
    pub fn in_memory(store: Arc<memory::InMemoryStore>) -> Self {
        Self {
            tokens: store.clone(),
            requirements: store.clone(),
            registrations: store,
        }
    }
}

/// Connect the backend selected by configuration.
///
/// The choice is made once at startup; the database backend also runs its
/// pending migrations here.
pub async fn connect(config: &StorageConfig) -> Result<Repositories> {
    match config {
        StorageConfig::Memory => {
            tracing::info!("using in-memory storage backend");
            Ok(Repositories::in_memory(Arc::new(
                memory::InMemoryStore::new(),
            )))
        }
        StorageConfig::Database { url } => {
            use sea_orm_migration::MigratorTrait;

            let db = Arc::new(sea_orm::Database::connect(url.as_str()).await?);
            migrations::Migrator::up(&*db, None).await?;
            tracing::info!("database storage backend ready");

            Ok(Repositories {
                tokens: Arc::new(repositories::SeaOrmTokenRepository::new(db.clone())),
                requirements: Arc::new(repositories::SeaOrmRequirementsRepository::new(
                    db.clone(),
                )),
                registrations: Arc::new(repositories::SeaOrmRegistrationRepository::new(db)),
            })
        }
    }
}
