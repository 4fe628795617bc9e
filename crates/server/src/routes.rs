use axum::{
    routing::{delete, get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::state::AppState;

pub mod tweets;
pub mod users;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: user routes, tweet routes and health.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let user_routes = Router::new()
        .route("/signup", post(users::signup))
        .route("/login", post(users::login))
        .route("/users", get(users::list_users))
        .route("/users/:user_id", get(users::show_user).post(users::show_user_by_email))
        .route("/users/:user_id/delete", delete(users::delete_user))
        .route("/users/:user_id/update", put(users::update_user));

    let tweet_routes = Router::new()
        .route("/", get(tweets::home))
        .route("/post", post(tweets::post_tweet))
        .route("/tweets/:tweet_id", get(tweets::show_tweet))
        .route("/tweets/:tweet_id/delete", delete(tweets::delete_tweet))
        .route("/tweets/:tweet_id/update", put(tweets::update_tweet));

    Router::new()
        .route("/health", get(health))
        .merge(user_routes)
        .merge(tweet_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx responses are logged at ERROR
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
