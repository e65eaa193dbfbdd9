//! Users listing use-case.
//!
//! Decides nothing about transport: it validates the grouping field, issues
//! at most one count and one fetch (or one aggregation) against the
//! [`UserStore`], and maps store failures onto domain errors.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use tracing::{debug, error};

use crate::domain::ports::{UserStore, UserStoreError, UsersQuery};
use crate::domain::{Error, UserField, UserGroups, UserRecord};

/// [`UsersQuery`] implementation backed by a [`UserStore`].
#[derive(Clone)]
pub struct UsersService {
    store: Arc<dyn UserStore>,
}

impl UsersService {
    /// Build the service over an injected store.
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }
}

fn map_store_error(err: UserStoreError) -> Error {
    error!(error = %err, "user store operation failed");
    match err {
        UserStoreError::Connection { message } => Error::service_unavailable(message),
        UserStoreError::Query { message } | UserStoreError::Decode { message } => {
            Error::internal(message)
        }
    }
}

#[async_trait]
impl UsersQuery for UsersService {
    async fn list_users(&self, request: PageRequest) -> Result<Page<UserRecord>, Error> {
        let total = self.store.count_all().await.map_err(map_store_error)?;
        if request.skip() >= total {
            debug!(
                total,
                page = request.page(),
                limit = request.limit(),
                "requested page lies past the last user"
            );
            return Ok(Page::new(total, request, Vec::new()));
        }
        let users = self
            .store
            .find_page(request.skip(), request.limit())
            .await
            .map_err(map_store_error)?;
        debug!(
            total,
            page = request.page(),
            limit = request.limit(),
            returned = users.len(),
            "listed users"
        );
        Ok(Page::new(total, request, users))
    }

    async fn group_users(&self, field: &str) -> Result<UserGroups, Error> {
        let field = field.parse::<UserField>().map_err(|err| {
            debug!(%err, "rejected groupBy field");
            Error::invalid_request(err.to_string())
        })?;
        let groups = self
            .store
            .count_by_field(field)
            .await
            .map_err(map_store_error)?;
        Ok(UserGroups { field, groups })
    }
}
