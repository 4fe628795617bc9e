use std::sync::Arc;

use models::{Tweet, User, UserRegister};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::storage::RecordStore;

/// User registration, login and CRUD over the users collection.
///
/// Records are stored with their password in plaintext; every value handed
/// back to callers is the public [`User`] view.
pub struct UserService {
    users: Arc<dyn RecordStore<UserRegister>>,
    tweets: Arc<dyn RecordStore<Tweet>>,
}

impl UserService {
    /// `tweets` is only read, to build the feed returned on login.
    pub fn new(users: Arc<dyn RecordStore<UserRegister>>, tweets: Arc<dyn RecordStore<Tweet>>) -> Self {
        Self { users, tweets }
    }

    /// Register a user. The caller supplies `user_id`; both the id and the
    /// email (exact, case-sensitive) must be unused.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use models::{Tweet, User, UserRegister};
    /// use service::{storage::MemoryStore, UserService};
    /// let svc = UserService::new(
    ///     Arc::new(MemoryStore::<UserRegister>::new("users")),
    ///     Arc::new(MemoryStore::<Tweet>::new("tweets")),
    /// );
    /// let candidate = UserRegister {
    ///     user: User { user_id: uuid::Uuid::new_v4(), email: "a@x.com".into(), first_name: "A".into(), last_name: "B".into(), birth_date: None },
    ///     password: "secret12".into(),
    /// };
    /// let user = tokio_test::block_on(svc.register(candidate)).unwrap();
    /// assert_eq!(user.email, "a@x.com");
    /// ```
    #[instrument(skip(self, candidate), fields(user_id = %candidate.user.user_id, email = %candidate.user.email))]
    pub async fn register(&self, candidate: UserRegister) -> Result<User, ServiceError> {
        candidate.validate()?;
        let email = candidate.user.email.clone();
        let id = candidate.user.user_id;
        let stored = self
            .users
            .append_unless(candidate, &|u: &UserRegister| u.user.email == email || u.user.user_id == id)
            .await
            .map_err(|e| match e {
                ServiceError::Conflict(_) => {
                    ServiceError::Conflict(format!("a user with email {email} or id {id} already exists"))
                }
                other => other,
            })?;
        info!("user_registered");
        Ok(stored.into_public())
    }

    /// Check credentials and return the full tweet feed, unfiltered.
    ///
    /// Unknown email and wrong password fail the same way.
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Vec<Tweet>, ServiceError> {
        let found = self.users.find_one(&|u: &UserRegister| u.user.email == email).await?;
        match found {
            Some(u) if u.password == password => {
                info!(user_id = %u.user.user_id, "user_logged_in");
                self.tweets.load_all().await
            }
            _ => {
                warn!("login rejected");
                Err(ServiceError::Authentication)
            }
        }
    }

    pub async fn list_all(&self) -> Result<Vec<User>, ServiceError> {
        let users = self.users.load_all().await?;
        Ok(users.into_iter().map(UserRegister::into_public).collect())
    }

    pub async fn get_by_email(&self, email: &str) -> Result<User, ServiceError> {
        self.users
            .find_one(&|u: &UserRegister| u.user.email == email)
            .await?
            .map(UserRegister::into_public)
            .ok_or_else(|| ServiceError::not_found("user"))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<User, ServiceError> {
        self.users
            .find_one(&|u: &UserRegister| u.user.user_id == id)
            .await?
            .map(UserRegister::into_public)
            .ok_or_else(|| ServiceError::not_found("user"))
    }

    /// Remove a user and return what was removed. Tweets keep their author snapshot.
    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: Uuid) -> Result<User, ServiceError> {
        let removed = self
            .users
            .remove_one(&|u: &UserRegister| u.user.user_id == id)
            .await?
            .ok_or_else(|| ServiceError::not_found("user"))?;
        info!("user_deleted");
        Ok(removed.into_public())
    }

    /// Full-record replace. `data.user.user_id` is overwritten with `id`; fields
    /// absent from `data` are not carried over from the old record.
    #[instrument(skip(self, data), fields(email = %data.user.email))]
    pub async fn update_by_id(&self, id: Uuid, mut data: UserRegister) -> Result<User, ServiceError> {
        data.user.user_id = id;
        data.validate()?;
        let email = data.user.email.clone();
        let updated = self
            .users
            .replace(
                &|u: &UserRegister| u.user.user_id == id,
                data,
                &|u: &UserRegister| u.user.email == email,
            )
            .await
            .map_err(|e| match e {
                ServiceError::Conflict(_) => ServiceError::Conflict(format!("email {email} is taken by another user")),
                other => other,
            })?
            .ok_or_else(|| ServiceError::not_found("user"))?;
        info!("user_updated");
        Ok(updated.into_public())
    }
}
