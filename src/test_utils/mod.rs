use std::fmt::Debug;
use std::net::{IpAddr, Ipv4Addr};
use std::num::NonZeroU64;
use std::sync::Arc;

use crate::{
    config,
    database::MemoryStore,
    http::{self, Jwt},
    types::id::{marker::UserMarker, Id},
    App,
};

pub mod users;

pub const JWT_SECRET: &str = "agora test secret key";

/// Builds an [`App`] over a fresh [`MemoryStore`]. The store is
/// returned as well so tests can seed users into it.
pub fn build_test_app() -> (App, MemoryStore) {
    let config = config::Server {
        ip: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        workers: None,
        auth: config::Auth {
            jwt_secret: JWT_SECRET.into(),
            token_ttl_secs: NonZeroU64::MIN.saturating_add(3599),
        },
        db: None,
        logging: config::Logging::default(),
    };

    let store = MemoryStore::new();
    let app = App::with_store(config, Arc::new(store.clone()));
    (app, store)
}

#[allow(clippy::unwrap_used)]
pub fn token_for(app: &App, user_id: Id<UserMarker>) -> String {
    Jwt::encode(user_id, &app.config.auth).unwrap()
}

pub trait TestResultExt {
    /// Serializes the client facing part of an error into
    /// [`serde_json::Value`].
    ///
    /// ## Panics
    /// It will panic if the result is [`Ok`].
    fn expect_error_json(self) -> serde_json::Value;
}

#[allow(clippy::unwrap_used)]
impl<T: Debug> TestResultExt for std::result::Result<T, http::Error> {
    fn expect_error_json(self) -> serde_json::Value {
        match self {
            Ok(okay) => panic!("unexpected value Ok({okay:?}), expected error"),
            Err(error) => serde_json::to_value(error.as_type()).unwrap(),
        }
    }
}
