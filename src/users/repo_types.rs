use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use utoipa::ToSchema;

/// User record in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct User {
    #[schema(read_only)]
    pub id: i32,          // assigned by the database
    pub username: String,
    pub email: String,    // unique across all users
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime, read_only)]
    pub created_date: OffsetDateTime,
}
