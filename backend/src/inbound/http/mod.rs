//! HTTP inbound adapter exposing REST endpoints.

use actix_web::{Scope, error::QueryPayloadError, web};

use crate::domain::Error;

pub mod error;
pub mod health;
pub mod state;
pub mod users;

pub use error::ApiResult;

/// Reject undecodable query strings with the standard error body.
fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req| {
        Error::invalid_request(format!("Invalid query string: {err}")).into()
    })
}

/// Routes mounted under `/api`.
///
/// Handlers expect [`state::HttpState`] to be registered as app data.
pub fn api_scope() -> Scope {
    web::scope("/api")
        .app_data(query_config())
        .service(users::list_users)
}
