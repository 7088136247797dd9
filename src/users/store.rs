use axum::async_trait;
use sqlx::PgPool;
use thiserror::Error;

use crate::users::{repo, repo_types::User};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email {0} is already taken")]
    Duplicate(String),

    #[error("user {0} vanished before it could be written")]
    Missing(i32),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Unique-constraint violations on write become [`StoreError::Duplicate`].
    pub(crate) fn from_insert(e: sqlx::Error, email: &str) -> Self {
        match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Self::Duplicate(email.to_string())
            }
            _ => Self::Database(e),
        }
    }
}

/// Persistence accessors for the `users` table.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<User>, StoreError>;
    async fn get_by_id(&self, id: i32) -> Result<Option<User>, StoreError>;
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn create(&self, username: &str, email: &str) -> Result<User, StoreError>;
    async fn update(&self, user: &User, username: &str, email: &str) -> Result<User, StoreError>;
    async fn delete(&self, user: &User) -> Result<(), StoreError>;
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn list_all(&self) -> Result<Vec<User>, StoreError> {
        repo::list_all(&self.db).await
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<User>, StoreError> {
        repo::get_by_id(&self.db, id).await
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        repo::get_by_email(&self.db, email).await
    }

    async fn create(&self, username: &str, email: &str) -> Result<User, StoreError> {
        repo::create(&self.db, username, email).await
    }

    async fn update(&self, user: &User, username: &str, email: &str) -> Result<User, StoreError> {
        repo::update(&self.db, user, username, email).await
    }

    async fn delete(&self, user: &User) -> Result<(), StoreError> {
        repo::delete(&self.db, user).await
    }
}
