use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use models::Tweet;
use tracing::info;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::state::AppState;

/// Home: every tweet in posting order
pub async fn home(State(state): State<AppState>) -> Result<Json<Vec<Tweet>>, ApiError> {
    let tweets = state.tweets.list_all().await?;
    info!(count = tweets.len(), "list tweets");
    Ok(Json(tweets))
}

pub async fn post_tweet(
    State(state): State<AppState>,
    Json(input): Json<Tweet>,
) -> Result<(StatusCode, Json<Tweet>), ApiError> {
    let tweet = state.tweets.post(input).await?;
    Ok((StatusCode::CREATED, Json(tweet)))
}

pub async fn show_tweet(
    State(state): State<AppState>,
    Path(tweet_id): Path<Uuid>,
) -> Result<Json<Tweet>, ApiError> {
    Ok(Json(state.tweets.get_by_id(tweet_id).await?))
}

pub async fn delete_tweet(
    State(state): State<AppState>,
    Path(tweet_id): Path<Uuid>,
) -> Result<Json<Tweet>, ApiError> {
    Ok(Json(state.tweets.delete_by_id(tweet_id).await?))
}

pub async fn update_tweet(
    State(state): State<AppState>,
    Path(tweet_id): Path<Uuid>,
    Json(input): Json<Tweet>,
) -> Result<Json<Tweet>, ApiError> {
    Ok(Json(state.tweets.update_by_id(tweet_id, input).await?))
}
