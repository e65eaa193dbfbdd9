//! MongoDB persistence adapter for the user collection.
//!
//! # Architecture
//!
//! - **Thin adapter**: `MongoUserStore` only translates between BSON
//!   documents and domain records. No listing rules live here.
//! - **Internal mapping**: document decoding and the grouping pipeline
//!   (`documents.rs`) are implementation details, never exposed to the
//!   domain layer.
//! - **Injected client**: the host builds the client from
//!   [`MongoStoreConfig`] and hands the adapter to the domain service.
//! - **Typed errors**: driver failures map to `UserStoreError` variants.
//!
//! # Example
//!
//! ```no_run
//! use users_api::outbound::persistence::{MongoStoreConfig, MongoUserStore};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MongoStoreConfig::new("mongodb://localhost:27017/test", "users");
//! let store = MongoUserStore::connect(&config).await?;
//! # let _ = store;
//! # Ok(())
//! # }
//! ```

mod documents;
mod mongo_user_store;

pub use mongo_user_store::{MongoStoreConfig, MongoUserStore};
