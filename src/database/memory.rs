use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{Result, Store};
use crate::{
    schema::{Post, User},
    types::id::{
        marker::{PostMarker, UserMarker},
        Id,
    },
};

/// [`Store`] kept in process memory. Used when no database is
/// configured and by the tests. Everything is lost on shutdown.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    users: Arc<RwLock<HashMap<Id<UserMarker>, User>>>,
    posts: Arc<RwLock<HashMap<Id<PostMarker>, Post>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Users are owned by the account service, this is how they
    /// get here without a database.
    pub async fn insert_user(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_user(&self, id: Id<UserMarker>) -> Result<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_post(&self, id: Id<PostMarker>) -> Result<Option<Post>> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn list_posts(&self) -> Result<Vec<Post>> {
        let mut posts = self.posts.read().await.values().cloned().collect::<Vec<_>>();
        posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
        Ok(posts)
    }

    async fn save_post(&self, post: &Post) -> Result<()> {
        self.posts.write().await.insert(post.id, post.clone());
        Ok(())
    }

    async fn delete_post(&self, id: Id<PostMarker>) -> Result<bool> {
        Ok(self.posts.write().await.remove(&id).is_some())
    }
}
