use error_stack::{Report, Result, ResultExt};
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::num::NonZeroUsize;
use validator::Validate;

use super::ParseError;
use crate::util::{figment::FigmentErrorAttachable, validator::IntoValidatorReport};

#[derive(Debug, Deserialize, Validate)]
pub struct Server {
    /// **Environment variables**:
    /// - `AGORA_IP`
    #[serde(default = "Server::default_ip")]
    pub ip: IpAddr,
    /// **Environment variables**:
    /// - `AGORA_PORT` or `PORT`
    #[serde(default = "Server::default_port")]
    pub port: u16,
    /// Amount of HTTP workers and tokio worker threads. It defaults
    /// to the number of available CPU cores.
    ///
    /// **Environment variables**:
    /// - `AGORA_WORKERS`
    #[serde(default)]
    pub workers: Option<NonZeroUsize>,
    #[validate(nested)]
    pub auth: super::Auth,
    #[validate(nested)]
    pub db: Option<super::Database>,
    #[serde(default)]
    pub logging: super::Logging,
}

impl Server {
    const DEFAULT_CONFIG_FILE: &'static str = "agora.toml";
    const DEFAULT_PORT: u16 = 5000;

    fn default_ip() -> IpAddr {
        IpAddr::V4(Ipv4Addr::LOCALHOST)
    }

    const fn default_port() -> u16 {
        Self::DEFAULT_PORT
    }

    pub fn load() -> Result<Self, ParseError> {
        dotenvy::dotenv().ok();

        let config = Self::figment()
            .extract::<Self>()
            .map_err(|e| Report::new(ParseError).attach_figment_error(e))?;

        config
            .validate()
            .into_validator_report()
            .change_context(ParseError)?;

        Ok(config)
    }
}

impl Server {
    /// Creates a default [`Figment`] object to load server
    /// configuration. This function is there for implementing
    /// [`Server::load`] and testing.
    ///
    /// [`Figment`]: figment::Figment
    pub(crate) fn figment() -> figment::Figment {
        use figment::{
            providers::{Env, Format, Toml},
            Figment,
        };

        Figment::new()
            .merge(Toml::file(Self::DEFAULT_CONFIG_FILE))
            // Environment variable aliases, the prefixed ones take
            // precedence over them.
            .merge(
                Env::raw()
                    .only(&["DATABASE_URL", "JWT_SECRET", "PORT", "RUST_LOG"])
                    .map(|v| match v.as_str().to_ascii_uppercase().as_str() {
                        "DATABASE_URL" => "db.primary.url".into(),
                        "JWT_SECRET" => "auth.jwt_secret".into(),
                        "RUST_LOG" => "logging.targets".into(),
                        _ => v.as_str().to_ascii_lowercase().into(),
                    }),
            )
            // One big con about figment (env provider to be specific) especially
            // these fields with underscore in it.
            .merge(Env::prefixed("AGORA_").map(|v| {
                match v.as_str().to_ascii_uppercase().as_str() {
                    "AUTH_JWT_SECRET" => "auth.jwt_secret".into(),
                    "AUTH_TOKEN_TTL_SECS" => "auth.token_ttl_secs".into(),

                    "DB_PRIMARY_MIN_IDLE" => "db.primary.min_idle".into(),
                    "DB_PRIMARY_POOL_SIZE" => "db.primary.pool_size".into(),

                    "DB_REPLICA_MIN_IDLE" => "db.replica.min_idle".into(),
                    "DB_REPLICA_POOL_SIZE" => "db.replica.pool_size".into(),

                    "DB_ENFORCE_TLS" => "db.enforce_tls".into(),
                    "DB_TIMEOUT_SECS" => "db.timeout_secs".into(),

                    _ => v.as_str().replace('_', ".").into(),
                }
            }))
    }
}
