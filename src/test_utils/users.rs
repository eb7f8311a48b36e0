use chrono::Utc;

use crate::{
    database::MemoryStore,
    http::Actor,
    schema::User,
    types::id::Id,
};

/// Seeds a user the way the account service would have created it.
pub async fn create(store: &MemoryStore, name: &str) -> User {
    let user = User {
        id: Id::generate(),
        name: name.to_string(),
        avatar: format!("//www.gravatar.com/avatar/{name}?s=200&r=pg&d=mm"),
        created_at: Utc::now(),
    };
    store.insert_user(user.clone()).await;
    user
}

#[must_use]
pub fn actor(user: &User) -> Actor {
    Actor { user_id: user.id }
}
