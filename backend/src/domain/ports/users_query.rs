//! Driving port for the users listing endpoint.
//!
//! Inbound adapters call this port without importing persistence concerns.
//! Production backs it with [`crate::domain::UsersService`]; handler tests
//! can substitute a canned implementation.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Error, UserGroups, UserRecord};

/// Use-case port for listing and grouping users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return one page of users together with the collection total.
    async fn list_users(&self, request: PageRequest) -> Result<Page<UserRecord>, Error>;

    /// Group the whole collection by the field named `field`.
    ///
    /// Unknown field names fail with an invalid request error before the
    /// store is consulted.
    async fn group_users(&self, field: &str) -> Result<UserGroups, Error>;
}
