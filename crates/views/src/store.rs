use async_trait::async_trait;

use crate::error::StoreError;
use crate::records::{PostRecord, UserRecord};

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn get_user_posts(&self, user_id: &str) -> Result<Vec<PostRecord>, StoreError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_user(&self, user_id: &str) -> Result<Option<UserRecord>, StoreError>;
}

#[async_trait]
pub trait PostDeleter: Send + Sync {
    async fn delete_post(&self, author_id: &str, post_id: &str) -> Result<(), StoreError>;
}
