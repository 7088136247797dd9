//! In-process [`UserStore`] for handler tests. Mirrors the table's
//! `UNIQUE (email)` constraint so the conflict path can be exercised.

use axum::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use crate::users::{
    repo_types::User,
    store::{StoreError, UserStore},
};

#[derive(Default)]
pub struct MemoryUserStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    rows: Vec<User>,
    next_id: i32,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test fixture: inserts a row without going through the HTTP layer.
    pub async fn seed(&self, username: &str, email: &str) -> User {
        self.create(username, email).await.expect("seed user")
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn list_all(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.inner.read().await.rows.clone())
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<User>, StoreError> {
        Ok(self.inner.read().await.rows.iter().find(|u| u.id == id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .inner
            .read()
            .await
            .rows
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(&self, username: &str, email: &str) -> Result<User, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.rows.iter().any(|u| u.email == email) {
            return Err(StoreError::Duplicate(email.to_string()));
        }
        inner.next_id += 1;
        let user = User {
            id: inner.next_id,
            username: username.to_string(),
            email: email.to_string(),
            created_date: OffsetDateTime::now_utc(),
        };
        inner.rows.push(user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User, username: &str, email: &str) -> Result<User, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.rows.iter().any(|u| u.email == email && u.id != user.id) {
            return Err(StoreError::Duplicate(email.to_string()));
        }
        let row = inner
            .rows
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(StoreError::Missing(user.id))?;
        row.username = username.to_string();
        row.email = email.to_string();
        Ok(row.clone())
    }

    async fn delete(&self, user: &User) -> Result<(), StoreError> {
        self.inner.write().await.rows.retain(|u| u.id != user.id);
        Ok(())
    }
}
