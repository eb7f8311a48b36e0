use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    schema::{Post, User},
    types::id::{
        marker::{PostMarker, UserMarker},
        Id,
    },
};

mod error;
mod memory;
mod pool;
mod postgres;

pub use error::*;
pub use memory::MemoryStore;
pub use pool::{Connection, Pool, PoolConnection};
pub use postgres::PgStore;

/// Document operations every post route is built from.
///
/// A post is always read and written as a whole; there are no
/// transactions spanning more than one document.
#[async_trait]
pub trait Store: Debug + Send + Sync {
    async fn find_user(&self, id: Id<UserMarker>) -> Result<Option<User>>;

    async fn find_post(&self, id: Id<PostMarker>) -> Result<Option<Post>>;

    /// Newest first, ties broken by the highest id.
    async fn list_posts(&self) -> Result<Vec<Post>>;

    /// Inserts the post or replaces the stored one with the same id.
    async fn save_post(&self, post: &Post) -> Result<()>;

    /// Returns `false` if there was no post to delete.
    async fn delete_post(&self, id: Id<PostMarker>) -> Result<bool>;
}
