#![cfg(test)]
use std::path::PathBuf;

use chrono::NaiveDate;
use models::{Tweet, User, UserRegister};
use uuid::Uuid;

/// Fresh collection path under the system temp dir; the file itself is not created.
pub fn temp_collection(prefix: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("chirp_{}", Uuid::new_v4()))
        .join(format!("{prefix}.json"))
}

pub async fn cleanup(path: &std::path::Path) {
    if let Some(dir) = path.parent() {
        let _ = tokio::fs::remove_dir_all(dir).await;
    }
}

pub fn user(email: &str) -> UserRegister {
    UserRegister {
        user: User {
            user_id: Uuid::new_v4(),
            email: email.into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            birth_date: NaiveDate::from_ymd_opt(1815, 12, 10),
        },
        password: "secret12".into(),
    }
}

pub fn tweet(by: &User, content: &str) -> Tweet {
    Tweet {
        tweet_id: Uuid::new_v4(),
        content: content.into(),
        created_at: chrono::Utc::now(),
        updated_at: None,
        by: by.clone(),
    }
}
