use axum::Json;
use utoipa::OpenApi;

use crate::users::{
    dto::{MessageResponse, UserPayload, ValidationResponse},
    repo_types::User,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "users-api", description = "User management API"),
    paths(
        crate::users::handlers::list_users,
        crate::users::handlers::create_user,
        crate::users::handlers::get_user,
        crate::users::handlers::update_user,
        crate::users::handlers::delete_user,
    ),
    components(schemas(User, UserPayload, MessageResponse, ValidationResponse)),
    tags((name = "users", description = "User resources"))
)]
pub struct ApiDoc;

/// GET /openapi.json
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
