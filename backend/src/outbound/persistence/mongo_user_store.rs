//! MongoDB-backed `UserStore` adapter.
//!
//! The client is constructed by the host and injected here; the adapter
//! never owns process-wide connection state. Each call issues exactly one
//! driver operation.

use async_trait::async_trait;
use bson::{Document, doc};
use futures_util::TryStreamExt;
use mongodb::error::{Error as MongoError, ErrorKind};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use tracing::{info, warn};

use crate::domain::ports::{UserStore, UserStoreError};
use crate::domain::{GroupCount, UserField, UserRecord};

use super::documents::{decode_group, decode_user, group_pipeline};

/// Database used when neither the settings nor the connection string name one.
pub const DEFAULT_DATABASE: &str = "test";

/// Connection coordinates for the user collection.
///
/// The database is optional: when unset, the one named in the connection
/// string path is used, then [`DEFAULT_DATABASE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoStoreConfig {
    uri: String,
    database: Option<String>,
    collection: String,
}

impl MongoStoreConfig {
    /// Describe where the user documents live.
    pub fn new(uri: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: None,
            collection: collection.into(),
        }
    }

    /// Pin the database instead of taking it from the connection string.
    #[must_use]
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Connection string passed to the driver.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Explicitly configured database, if any.
    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    /// Collection name.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Database to use given the one parsed from the connection string.
    #[must_use]
    pub fn resolve_database<'a>(&'a self, from_uri: Option<&'a str>) -> &'a str {
        self.database().or(from_uri).unwrap_or(DEFAULT_DATABASE)
    }
}

/// Offsets beyond the driver's signed 64-bit range cannot match anything;
/// clamp them so the query still runs and returns no documents.
const fn driver_skip(skip: u64) -> u64 {
    const MAX_SKIP: u64 = i64::MAX.unsigned_abs();
    if skip > MAX_SKIP { MAX_SKIP } else { skip }
}

/// Map driver failures onto port errors.
///
/// Server selection, I/O, and pool errors mean the store is unreachable;
/// everything else is a query failure.
fn map_mongo_error(err: MongoError) -> UserStoreError {
    match err.kind.as_ref() {
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::ConnectionPoolCleared { .. }
        | ErrorKind::DnsResolve { .. } => UserStoreError::connection(err.to_string()),
        _ => UserStoreError::query(err.to_string()),
    }
}

/// `UserStore` reading from a MongoDB collection.
#[derive(Clone, Debug)]
pub struct MongoUserStore {
    collection: Collection<Document>,
}

impl MongoUserStore {
    /// Wrap an already-configured collection handle.
    pub fn new(collection: Collection<Document>) -> Self {
        Self { collection }
    }

    /// Build a client from `config` and bind to its collection.
    ///
    /// The driver connects lazily, so an unreachable server does not fail
    /// here. A ping is attempted and its outcome logged; request handling
    /// reports connectivity problems per call.
    ///
    /// # Errors
    /// Returns [`UserStoreError::Connection`] when the connection string is
    /// malformed or cannot be resolved.
    pub async fn connect(config: &MongoStoreConfig) -> Result<Self, UserStoreError> {
        let options = ClientOptions::parse(config.uri())
            .await
            .map_err(|err| UserStoreError::connection(err.to_string()))?;
        let name = config
            .resolve_database(options.default_database.as_deref())
            .to_owned();
        let client = Client::with_options(options)
            .map_err(|err| UserStoreError::connection(err.to_string()))?;
        let database = client.database(&name);
        match database.run_command(doc! { "ping": 1 }).await {
            Ok(_) => info!(database = %name, "MongoDB connected"),
            Err(error) => warn!(%error, database = %name, "MongoDB connection failed"),
        }
        Ok(Self::new(database.collection(config.collection())))
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn count_all(&self) -> Result<u64, UserStoreError> {
        self.collection
            .count_documents(doc! {})
            .await
            .map_err(map_mongo_error)
    }

    async fn find_page(&self, skip: u64, limit: u32) -> Result<Vec<UserRecord>, UserStoreError> {
        let cursor = self
            .collection
            .find(doc! {})
            .skip(driver_skip(skip))
            .limit(i64::from(limit))
            .await
            .map_err(map_mongo_error)?;
        let documents: Vec<Document> = cursor.try_collect().await.map_err(map_mongo_error)?;
        documents.iter().map(decode_user).collect()
    }

    async fn count_by_field(&self, field: UserField) -> Result<Vec<GroupCount>, UserStoreError> {
        let cursor = self
            .collection
            .aggregate(group_pipeline(field))
            .allow_disk_use(true)
            .await
            .map_err(map_mongo_error)?;
        let documents: Vec<Document> = cursor.try_collect().await.map_err(map_mongo_error)?;
        documents.iter().map(decode_group).collect()
    }
}
