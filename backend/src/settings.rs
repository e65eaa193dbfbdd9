//! Service configuration loaded via OrthoConfig.
//!
//! Values layer defaults, an optional config file, `USERS_API_*`
//! environment variables and command-line flags, in increasing precedence.
//! The unprefixed `MONGO_URI` and `PORT` variables are honoured as a
//! fallback when the prefixed settings are absent.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::outbound::persistence::MongoStoreConfig;

const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017";
const DEFAULT_COLLECTION: &str = "users";
const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 5000;

/// Unprefixed variable consulted when `mongo_uri` is unset.
pub const LEGACY_MONGO_URI_VAR: &str = "MONGO_URI";
/// Unprefixed variable consulted when `port` is unset.
pub const LEGACY_PORT_VAR: &str = "PORT";

/// Backing store selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreKind {
    /// MongoDB collection named by the connection settings.
    #[default]
    Mongo,
    /// Empty in-process store; useful for smoke tests without a database.
    Memory,
}

/// Raised when a setting holds a value outside its domain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// `store` is neither `mongo` nor `memory`.
    #[error("unknown store kind: {0} (expected `mongo` or `memory`)")]
    UnknownStore(String),
    /// `host` is not an IP address.
    #[error("invalid host address: {0}")]
    InvalidHost(String),
    /// `PORT` is not a valid TCP port.
    #[error("invalid port: {0}")]
    InvalidPort(String),
}

impl FromStr for StoreKind {
    type Err = SettingsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(Self::Mongo),
            "memory" => Ok(Self::Memory),
            _ => Err(SettingsError::UnknownStore(value.to_owned())),
        }
    }
}

/// Process settings for the users service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USERS_API")]
pub struct AppSettings {
    /// MongoDB connection string.
    pub mongo_uri: Option<String>,
    /// Database holding the users collection; defaults to the one named in
    /// the connection string.
    pub database: Option<String>,
    /// Collection holding user documents.
    pub collection: Option<String>,
    /// Address to bind the HTTP listener to.
    pub host: Option<String>,
    /// Port to bind the HTTP listener to.
    pub port: Option<u16>,
    /// `mongo` or `memory`.
    pub store: Option<String>,
    /// Serve Swagger UI and the OpenAPI document; on unless set to false.
    pub swagger: Option<bool>,
}

impl AppSettings {
    /// Connection string, falling back to a local server.
    pub fn mongo_uri(&self) -> &str {
        self.mongo_uri.as_deref().unwrap_or(DEFAULT_MONGO_URI)
    }

    /// Explicit database name, if configured.
    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    /// Collection name, falling back to `users`.
    pub fn collection(&self) -> &str {
        self.collection.as_deref().unwrap_or(DEFAULT_COLLECTION)
    }

    /// Coordinates for the MongoDB adapter.
    pub fn mongo_store(&self) -> MongoStoreConfig {
        let mut config = MongoStoreConfig::new(self.mongo_uri(), self.collection());
        if let Some(name) = self.database() {
            config = config.with_database(name);
        }
        config
    }

    /// Whether Swagger UI is served.
    #[must_use]
    pub const fn swagger(&self) -> bool {
        !matches!(self.swagger, Some(false))
    }

    /// Fill `mongo_uri` and `port` from the unprefixed `MONGO_URI` and
    /// `PORT` variables when neither was configured.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidPort`] when `PORT` is consulted and
    /// does not parse as a TCP port.
    pub fn with_legacy_env(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, SettingsError> {
        if self.mongo_uri.is_none() {
            self.mongo_uri = lookup(LEGACY_MONGO_URI_VAR);
        }
        if self.port.is_none() {
            if let Some(raw) = lookup(LEGACY_PORT_VAR) {
                let port = raw
                    .trim()
                    .parse()
                    .map_err(|_| SettingsError::InvalidPort(raw.clone()))?;
                self.port = Some(port);
            }
        }
        Ok(self)
    }

    /// Selected store.
    ///
    /// # Errors
    /// Returns [`SettingsError::UnknownStore`] for unrecognised names.
    pub fn store_kind(&self) -> Result<StoreKind, SettingsError> {
        self.store
            .as_deref()
            .map_or(Ok(StoreKind::default()), StoreKind::from_str)
    }

    /// Listener address, defaulting to `0.0.0.0:5000`.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidHost`] when `host` is not an IP address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = match self.host.as_deref() {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| SettingsError::InvalidHost(raw.to_owned()))?,
            None => DEFAULT_HOST,
        };
        Ok(SocketAddr::new(host, self.port.unwrap_or(DEFAULT_PORT)))
    }
}
