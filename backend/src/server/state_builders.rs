//! Builders for the user store and HTTP handler state.

use std::io;
use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};

use users_api::domain::UsersService;
use users_api::domain::ports::UserStore;
use users_api::inbound::http::state::HttpState;
use users_api::outbound::memory::InMemoryUserStore;
use users_api::outbound::persistence::MongoUserStore;
use users_api::settings::{AppSettings, StoreKind};

/// Construct the store selected by `settings`.
///
/// # Errors
/// Returns [`io::Error`] when the store kind is unknown or the MongoDB
/// connection string cannot be parsed.
pub async fn build_store(settings: &AppSettings) -> io::Result<Arc<dyn UserStore>> {
    match settings.store_kind().map_err(io::Error::other)? {
        StoreKind::Mongo => {
            let config = settings.mongo_store();
            info!(
                database = ?config.database(),
                collection = config.collection(),
                "using MongoDB user store"
            );
            let store = MongoUserStore::connect(&config)
                .await
                .map_err(io::Error::other)?;
            Ok(Arc::new(store))
        }
        StoreKind::Memory => {
            warn!("using empty in-memory user store");
            Ok(Arc::new(InMemoryUserStore::default()))
        }
    }
}

/// Wrap `store` in the users use-case and bundle it for handlers.
pub fn build_http_state(store: Arc<dyn UserStore>) -> web::Data<HttpState> {
    let users = Arc::new(UsersService::new(store));
    web::Data::new(HttpState::new(users))
}
