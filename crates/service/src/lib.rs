//! Service layer: whole-collection JSON persistence plus the user and tweet
//! operations built on top of it.
//! - `storage` owns the collection files and their locks.
//! - `user_service` / `tweet_service` hold the domain rules and never touch the filesystem directly.

pub mod errors;
pub mod storage;
pub mod tweet_service;
pub mod user_service;
#[cfg(test)]
pub mod test_support;

pub use errors::ServiceError;
pub use tweet_service::TweetService;
pub use user_service::UserService;
