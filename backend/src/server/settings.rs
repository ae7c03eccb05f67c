//! Server settings loaded via OrthoConfig.
//!
//! Values come from `BOOKS_*` environment variables and matching CLI flags.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_APP_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// A database field is required because the in-memory store is off.
    #[error("missing database setting {field}; set BOOKS_{env} or enable in_memory")]
    MissingDatabaseField {
        /// Setting name.
        field: &'static str,
        /// Environment variable suffix.
        env: &'static str,
    },

    /// `app_address` is not a socket address.
    #[error("invalid app_address {value:?}: {message}")]
    InvalidAddress {
        /// Offending value.
        value: String,
        /// Parser message.
        message: String,
    },

    /// The database fields do not form a valid connection URL.
    #[error("invalid database settings: {message}")]
    InvalidDatabaseUrl {
        /// What could not be applied.
        message: String,
    },
}

/// Storage backend selected by the settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageSettings {
    /// Process-local store; nothing survives a restart.
    InMemory,
    /// PostgreSQL through a connection pool.
    Postgres {
        /// Connection URL including credentials.
        database_url: String,
        /// Maximum pooled connections.
        pool_max_size: u32,
    },
}

/// Configuration values for the books server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BOOKS")]
pub struct BooksSettings {
    /// Serve from the in-memory store instead of PostgreSQL.
    #[ortho_config(default = false)]
    pub in_memory: bool,
    /// Database host.
    pub db_host: Option<String>,
    /// Database port; defaults to 5432.
    pub db_port: Option<u16>,
    /// Database user.
    pub db_user: Option<String>,
    /// Database password.
    pub db_pass: Option<String>,
    /// Database name.
    pub db_name: Option<String>,
    /// Listen address; defaults to `0.0.0.0:8080`.
    pub app_address: Option<String>,
    /// Maximum pooled database connections; defaults to 10.
    pub pool_max_size: Option<u32>,
}

fn required<'a>(
    value: Option<&'a str>,
    field: &'static str,
    env: &'static str,
) -> Result<&'a str, SettingsError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(SettingsError::MissingDatabaseField { field, env })
}

fn invalid_url(message: &str) -> SettingsError {
    SettingsError::InvalidDatabaseUrl {
        message: message.to_owned(),
    }
}

impl BooksSettings {
    /// Socket address the HTTP server binds to.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidAddress`] when `app_address` does not
    /// parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.app_address.as_deref().unwrap_or(DEFAULT_APP_ADDRESS);
        raw.parse().map_err(|err: std::net::AddrParseError| {
            SettingsError::InvalidAddress {
                value: raw.to_owned(),
                message: err.to_string(),
            }
        })
    }

    /// PostgreSQL connection URL assembled from the `db_*` fields.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingDatabaseField`] when host, user or
    /// database name is unset, and [`SettingsError::InvalidDatabaseUrl`] when
    /// the values cannot be placed in a URL.
    pub fn database_url(&self) -> Result<String, SettingsError> {
        let host = required(self.db_host.as_deref(), "db_host", "DB_HOST")?;
        let user = required(self.db_user.as_deref(), "db_user", "DB_USER")?;
        let name = required(self.db_name.as_deref(), "db_name", "DB_NAME")?;

        let mut url =
            Url::parse("postgres://localhost").map_err(|err| invalid_url(&err.to_string()))?;
        url.set_host(Some(host))
            .map_err(|err| invalid_url(&format!("db_host: {err}")))?;
        url.set_port(Some(self.db_port.unwrap_or(DEFAULT_DB_PORT)))
            .map_err(|()| invalid_url("db_port"))?;
        url.set_username(user)
            .map_err(|()| invalid_url("db_user"))?;
        if let Some(pass) = self.db_pass.as_deref().filter(|p| !p.is_empty()) {
            url.set_password(Some(pass))
                .map_err(|()| invalid_url("db_pass"))?;
        }
        url.set_path(&format!("/{name}"));
        Ok(url.into())
    }

    /// Storage backend to build at startup.
    ///
    /// # Errors
    ///
    /// Propagates [`BooksSettings::database_url`] failures when the
    /// in-memory store is disabled.
    pub fn storage(&self) -> Result<StorageSettings, SettingsError> {
        if self.in_memory {
            return Ok(StorageSettings::InMemory);
        }
        Ok(StorageSettings::Postgres {
            database_url: self.database_url()?,
            pool_max_size: self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE),
        })
    }
}
