//! Single-statement accessors over the `users` table.
//!
//! Every function takes the pool explicitly and commits on its own.

use sqlx::PgPool;

use crate::users::repo_types::User;
use crate::users::store::StoreError;

pub async fn list_all(db: &PgPool) -> Result<Vec<User>, StoreError> {
    let rows = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, created_date
          FROM users
         ORDER BY id ASC
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn get_by_id(db: &PgPool, id: i32) -> Result<Option<User>, StoreError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, created_date
          FROM users
         WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(user)
}

pub async fn get_by_email(db: &PgPool, email: &str) -> Result<Option<User>, StoreError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, created_date
          FROM users
         WHERE email = $1
         LIMIT 1
        "#,
    )
    .bind(email)
    .fetch_optional(db)
    .await?;
    Ok(user)
}

pub async fn create(db: &PgPool, username: &str, email: &str) -> Result<User, StoreError> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, email)
        VALUES ($1, $2)
        RETURNING id, username, email, created_date
        "#,
    )
    .bind(username)
    .bind(email)
    .fetch_one(db)
    .await
    .map_err(|e| StoreError::from_insert(e, email))
}

pub async fn update(
    db: &PgPool,
    user: &User,
    username: &str,
    email: &str,
) -> Result<User, StoreError> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users
           SET username = $2, email = $3
         WHERE id = $1
        RETURNING id, username, email, created_date
        "#,
    )
    .bind(user.id)
    .bind(username)
    .bind(email)
    .fetch_optional(db)
    .await
    .map_err(|e| StoreError::from_insert(e, email))?
    .ok_or(StoreError::Missing(user.id))
}

pub async fn delete(db: &PgPool, user: &User) -> Result<(), StoreError> {
    sqlx::query(r#"DELETE FROM users WHERE id = $1"#)
        .bind(user.id)
        .execute(db)
        .await?;
    Ok(())
}
