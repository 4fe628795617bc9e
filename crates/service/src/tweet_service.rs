use std::sync::Arc;

use chrono::Utc;
use models::Tweet;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::storage::RecordStore;

/// Posting and CRUD over the tweets collection.
///
/// The embedded author is taken as given: there is no check against the users
/// collection, so a tweet may outlive or predate its author's record.
pub struct TweetService {
    tweets: Arc<dyn RecordStore<Tweet>>,
}

impl TweetService {
    pub fn new(tweets: Arc<dyn RecordStore<Tweet>>) -> Self {
        Self { tweets }
    }

    /// Append a tweet and return it exactly as stored.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use models::{Tweet, User};
    /// use service::{storage::MemoryStore, TweetService};
    /// let svc = TweetService::new(Arc::new(MemoryStore::<Tweet>::new("tweets")));
    /// let by = User { user_id: uuid::Uuid::new_v4(), email: "a@x.com".into(), first_name: "A".into(), last_name: "B".into(), birth_date: None };
    /// let tweet = Tweet { tweet_id: uuid::Uuid::new_v4(), content: "hello".into(), created_at: chrono::Utc::now(), updated_at: None, by };
    /// let posted = tokio_test::block_on(svc.post(tweet.clone())).unwrap();
    /// assert_eq!(posted, tweet);
    /// assert_eq!(tokio_test::block_on(svc.list_all()).unwrap().len(), 1);
    /// ```
    #[instrument(skip(self, tweet), fields(tweet_id = %tweet.tweet_id, by = %tweet.by.user_id))]
    pub async fn post(&self, tweet: Tweet) -> Result<Tweet, ServiceError> {
        tweet.validate()?;
        let id = tweet.tweet_id;
        let posted = self
            .tweets
            .append_unless(tweet, &|t: &Tweet| t.tweet_id == id)
            .await
            .map_err(|e| match e {
                ServiceError::Conflict(_) => ServiceError::Conflict(format!("tweet {id} already exists")),
                other => other,
            })?;
        info!("tweet_posted");
        Ok(posted)
    }

    pub async fn list_all(&self) -> Result<Vec<Tweet>, ServiceError> {
        self.tweets.load_all().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Tweet, ServiceError> {
        self.tweets
            .find_one(&|t: &Tweet| t.tweet_id == id)
            .await?
            .ok_or_else(|| ServiceError::not_found("tweet"))
    }

    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: Uuid) -> Result<Tweet, ServiceError> {
        let removed = self
            .tweets
            .remove_one(&|t: &Tweet| t.tweet_id == id)
            .await?
            .ok_or_else(|| ServiceError::not_found("tweet"))?;
        info!("tweet_deleted");
        Ok(removed)
    }

    /// Full-record replace keyed on `id`. The stored tweet keeps `id` and gets
    /// `updated_at` set to now; every other field comes from `data`.
    #[instrument(skip(self, data))]
    pub async fn update_by_id(&self, id: Uuid, mut data: Tweet) -> Result<Tweet, ServiceError> {
        data.tweet_id = id;
        data.updated_at = Some(Utc::now());
        data.validate()?;
        let updated = self
            .tweets
            .replace(&|t: &Tweet| t.tweet_id == id, data, &|_: &Tweet| false)
            .await?
            .ok_or_else(|| ServiceError::not_found("tweet"))?;
        info!("tweet_updated");
        Ok(updated)
    }
}
