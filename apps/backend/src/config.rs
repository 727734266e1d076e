//! Environment configuration.
//!
//! Database settings come from `DATABASE_URL` when present, otherwise from
//! discrete variables. Managed hosting (Railway) exposes `PG*` names; local
//! setups usually use `DB_*`. On managed hosting a missing host, user or
//! database name is fatal rather than silently falling back to localhost.

use std::path::PathBuf;

use sqlx::postgres::PgConnectOptions;
use thiserror::Error;

const DEFAULT_PG_PORT: u16 = 5432;
const DEFAULT_LOCAL_USER: &str = "postgres";
const DEFAULT_LOCAL_DATABASE: &str = "phrase_checkin";
const DEFAULT_UPLOAD_DIR: &str = "data/uploads";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "database variables are missing on Railway: {}. \
         Open the Postgres service -> Variables and make them available to this service.",
        .0.join(", ")
    )]
    MissingOnManagedHost(Vec<String>),

    #[error("database host is {0} on Railway; use the PGHOST provided by the Postgres service")]
    LocalhostOnManagedHost(String),

    #[error("invalid port '{0}'")]
    InvalidPort(String),
}

/// Where the database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseConfig {
    Url(String),
    Parts {
        host: String,
        port: u16,
        user: String,
        password: String,
        database: String,
    },
}

impl DatabaseConfig {
    /// Resolve from an environment lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let either = |primary: &str, fallback: &str| get(primary).or_else(|| get(fallback));

        if let Some(url) = get("DATABASE_URL") {
            return Ok(Self::Url(url));
        }

        let host = either("PGHOST", "DB_HOST");
        let port = either("PGPORT", "DB_PORT");
        let user = either("PGUSER", "DB_USER");
        let password = either("PGPASSWORD", "DB_PASSWORD");
        let database = either("PGDATABASE", "DB_NAME");

        let managed = get("RAILWAY_ENVIRONMENT").is_some() || get("RAILWAY_PROJECT_ID").is_some();
        if managed {
            let missing: Vec<String> = [
                ("PGHOST/DB_HOST", &host),
                ("PGUSER/DB_USER", &user),
                ("PGDATABASE/DB_NAME", &database),
            ]
            .iter()
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| name.to_string())
            .collect();
            if !missing.is_empty() {
                return Err(ConfigError::MissingOnManagedHost(missing));
            }
            if let Some(h) = host.as_deref() {
                if h == "localhost" || h == "127.0.0.1" {
                    return Err(ConfigError::LocalhostOnManagedHost(h.to_string()));
                }
            }
        }

        let port = match port {
            Some(p) => p.parse::<u16>().map_err(|_| ConfigError::InvalidPort(p))?,
            None => DEFAULT_PG_PORT,
        };

        Ok(Self::Parts {
            host: host.unwrap_or_else(|| "localhost".to_string()),
            port,
            user: user.unwrap_or_else(|| DEFAULT_LOCAL_USER.to_string()),
            password: password.unwrap_or_default(),
            database: database.unwrap_or_else(|| DEFAULT_LOCAL_DATABASE.to_string()),
        })
    }

    /// Connection options for sqlx.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        match self {
            Self::Url(url) => url.parse(),
            Self::Parts {
                host,
                port,
                user,
                password,
                database,
            } => Ok(PgConnectOptions::new()
                .host(host)
                .port(*port)
                .username(user)
                .password(password)
                .database(database)),
        }
    }

    /// Human-readable target for logs (never includes the password).
    pub fn describe(&self) -> String {
        match self {
            Self::Url(_) => "DATABASE_URL".to_string(),
            Self::Parts {
                host,
                port,
                database,
                ..
            } => format!("{}:{}/{}", host, port, database),
        }
    }
}

/// Full service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub bind_addr: String,
    pub upload_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database = DatabaseConfig::from_lookup(&lookup)?;
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("PORT").unwrap_or_else(|| "3000".to_string());
        let upload_dir = lookup("UPLOAD_DIR")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_UPLOAD_DIR.to_string());

        Ok(Self {
            database,
            bind_addr: format!("{}:{}", host, port),
            upload_dir: PathBuf::from(upload_dir),
        })
    }
}
