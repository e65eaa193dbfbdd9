//! Driven port for reading the user collection.
//!
//! Adapters own connection lifecycle and driver timeouts; the domain only
//! sees the three read operations below.

use async_trait::async_trait;

use crate::domain::{GroupCount, UserField, UserRecord};

use super::define_port_error;

define_port_error! {
    /// Failures raised by user store adapters.
    pub enum UserStoreError {
        /// The store could not be reached.
        Connection => "user store connection failed: {message}",
        /// A query failed during execution.
        Query => "user store query failed: {message}",
        /// A stored document could not be mapped to a user record.
        Decode => "user document could not be decoded: {message}",
    }
}

/// Read access to the persisted user collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Count every record in the collection.
    async fn count_all(&self) -> Result<u64, UserStoreError>;

    /// Fetch up to `limit` records after skipping `skip`, in natural order.
    async fn find_page(&self, skip: u64, limit: u32) -> Result<Vec<UserRecord>, UserStoreError>;

    /// Count records per lowercased string value of `field` across the
    /// whole collection.
    async fn count_by_field(&self, field: UserField) -> Result<Vec<GroupCount>, UserStoreError>;
}
