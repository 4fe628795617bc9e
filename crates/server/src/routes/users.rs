use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use models::{Tweet, User, UserLogin, UserRegister};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::state::AppState;

/// Body of `POST /users/:user_id`: look a user up by email.
#[derive(Debug, Deserialize)]
pub struct EmailLookup {
    pub email: String,
}

/// Register a user
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<UserRegister>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state.users.register(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Log a user in and return the home feed
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<UserLogin>,
) -> Result<Json<Vec<Tweet>>, ApiError> {
    input.validate()?;
    let feed = state.users.authenticate(&input.email, &input.password).await?;
    Ok(Json(feed))
}

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let users = state.users.list_all().await?;
    info!(count = users.len(), "list users");
    Ok(Json(users))
}

pub async fn show_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.users.get_by_id(user_id).await?))
}

/// Look a user up by the `email` in the body.
///
/// The lookup is scoped to the path id rather than ignoring it: an email that
/// belongs to a different user answers 404, so `{user_id}` cannot be used to look up
/// other accounts.
pub async fn show_user_by_email(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(input): Json<EmailLookup>,
) -> Result<Json<User>, ApiError> {
    let user = state.users.get_by_email(&input.email).await?;
    if user.user_id != user_id {
        return Err(service::ServiceError::not_found("user").into());
    }
    Ok(Json(user))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.users.delete_by_id(user_id).await?))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(input): Json<UserRegister>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.users.update_by_id(user_id, input).await?))
}
