//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on domain
//! ports, so they stay testable without a database.

use std::sync::Arc;

use crate::domain::ports::UsersQuery;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Read-side user queries.
    pub users: Arc<dyn UsersQuery>,
}

impl HttpState {
    /// Bundle the user query port.
    pub fn new(users: Arc<dyn UsersQuery>) -> Self {
        Self { users }
    }
}
