use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    error::{ApiError, ApiResult},
    extract::ValidatedJson,
    state::AppState,
    users::{
        dto::{MessageResponse, UserPayload, ValidationResponse},
        repo_types::User,
    },
};

pub fn collection_routes() -> Router<AppState> {
    Router::new().route("/users", get(list_users).post(create_user))
}

pub fn item_routes() -> Router<AppState> {
    Router::new().route(
        "/users/:id",
        get(get_user).put(update_user).delete(delete_user),
    )
}

// Only plain digit runs are ids; anything else (signs, spaces, overflow)
// can never match a row and gets the same 404.
fn parse_id(raw: &str) -> ApiResult<i32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::not_found(raw));
    }
    raw.parse::<i32>().map_err(|_| ApiError::not_found(raw))
}

async fn load_user(state: &AppState, raw_id: &str) -> ApiResult<User> {
    let id = parse_id(raw_id)?;
    match state.users.get_by_id(id).await? {
        Some(user) => Ok(user),
        None => {
            warn!(user_id = id, "user not found");
            Err(ApiError::not_found(id))
        }
    }
}

/// Returns all users.
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "All users, oldest first", body = Vec<User>),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = state.users.list_all().await?;
    Ok(Json(users))
}

/// Creates a new user.
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = UserPayload,
    responses(
        (status = 201, description = "<user_email> was added!", body = MessageResponse),
        (status = 400, description = "Input payload validation failed | Sorry. That email already exists.", body = ValidationResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UserPayload>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    if state.users.get_by_email(&payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already exists");
        return Err(ApiError::DuplicateEmail);
    }

    let user = state
        .users
        .create(&payload.username, &payload.email)
        .await?;

    info!(user_id = user.id, email = %user.email, "user created");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(format!("{} was added!", user.email))),
    ))
}

/// Returns a single user.
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "Success", body = User),
        (status = 404, description = "User <user_id> does not exist", body = MessageResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<User>> {
    let user = load_user(&state, &id).await?;
    Ok(Json(user))
}

/// Deletes a user.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "<user_email> was removed!", body = MessageResponse),
        (status = 404, description = "User <user_id> does not exist", body = MessageResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let user = load_user(&state, &id).await?;
    state.users.delete(&user).await?;

    info!(user_id = user.id, email = %user.email, "user removed");
    Ok(Json(MessageResponse::new(format!(
        "{} was removed!",
        user.email
    ))))
}

/// Updates a user. Conflicts only when the email belongs to a different
/// user; keeping one's own email is allowed.
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i32, Path, description = "User id")),
    request_body = UserPayload,
    responses(
        (status = 200, description = "<user_id> was updated!", body = MessageResponse),
        (status = 400, description = "Input payload validation failed | Sorry. That email already exists.", body = ValidationResponse),
        (status = 404, description = "User <user_id> does not exist", body = MessageResponse)
    )
)]
#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UserPayload>,
) -> ApiResult<Json<MessageResponse>> {
    let user = load_user(&state, &id).await?;

    if let Some(owner) = state.users.get_by_email(&payload.email).await? {
        if owner.id != user.id {
            warn!(user_id = user.id, owner_id = owner.id, email = %payload.email, "email already exists");
            return Err(ApiError::DuplicateEmail);
        }
    }

    let user = state
        .users
        .update(&user, &payload.username, &payload.email)
        .await?;

    info!(user_id = user.id, "user updated");
    Ok(Json(MessageResponse::new(format!("{} was updated!", user.id))))
}
