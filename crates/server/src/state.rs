use std::sync::Arc;

use configs::StorageConfig;
use models::{Tweet, UserRegister};
use service::storage::{JsonFileStore, RecordStore};
use service::{ServiceError, TweetService, UserService};
use tracing::info;

/// Shared handler state: one service per collection, both over the same tweets store.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserService>,
    pub tweets: Arc<TweetService>,
}

impl AppState {
    pub fn new(users: Arc<dyn RecordStore<UserRegister>>, tweets: Arc<dyn RecordStore<Tweet>>) -> Self {
        Self {
            users: Arc::new(UserService::new(users, Arc::clone(&tweets))),
            tweets: Arc::new(TweetService::new(tweets)),
        }
    }

    /// Open (or create) both collection files described by `cfg`.
    pub async fn open(cfg: &StorageConfig) -> Result<Self, ServiceError> {
        let timeout = cfg.lock_timeout();
        let users = JsonFileStore::<UserRegister>::open("users", cfg.users_path(), timeout).await?;
        let tweets = JsonFileStore::<Tweet>::open("tweets", cfg.tweets_path(), timeout).await?;
        info!(
            users = %users.path().display(),
            tweets = %tweets.path().display(),
            lock_timeout_ms = cfg.lock_timeout_ms,
            "collections opened"
        );
        Ok(Self::new(users, tweets))
    }
}
