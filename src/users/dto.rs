use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::schema::{Field, FieldKind, HasSchema, Schema};

/// Wire schema of a user. `id` and `created_date` are filled in by the server;
/// their kinds describe the response shape and are not checked on input.
pub static USER_SCHEMA: Schema = Schema {
    name: "User",
    fields: &[
        Field::read_only("id", FieldKind::Integer),
        Field::required("username", FieldKind::String),
        Field::required("email", FieldKind::String),
        Field::read_only("created_date", FieldKind::DateTime),
    ],
};

/// Body of `POST /users` and `PUT /users/{id}`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UserPayload {
    pub username: String,
    pub email: String,
}

impl HasSchema for UserPayload {
    fn schema() -> &'static Schema {
        &USER_SCHEMA
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// 400 body for a payload rejected by [`USER_SCHEMA`].
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationResponse {
    #[schema(example = "Input payload validation failed")]
    pub message: String,
    pub errors: BTreeMap<String, String>,
}
