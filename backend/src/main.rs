//! Service entry-point: loads settings, connects the store, and serves the
//! users API, health probes and OpenAPI docs.

mod server;

use std::ffi::OsString;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, build_store, create_server, drain, wait_for_shutdown};
use users_api::inbound::http::health::HealthState;
use users_api::settings::AppSettings;

/// Layer `args` over the environment, then apply the unprefixed fallbacks.
fn load_settings<I>(args: I) -> std::io::Result<AppSettings>
where
    I: IntoIterator<Item = OsString>,
{
    AppSettings::load_from_iter(args)
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?
        .with_legacy_env(|name| std::env::var(name).ok())
        .map_err(std::io::Error::other)
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = load_settings(std::env::args_os())?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let store = build_store(&settings).await?;
    let config = ServerConfig::new(bind_addr, store).with_swagger(settings.swagger());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let handle = server.handle();
    actix_web::rt::spawn(async move {
        if wait_for_shutdown().await.is_ok() {
            drain(health_state, handle).await;
        }
    });
    info!(%bind_addr, swagger = settings.swagger(), "users API listening");
    server.await
}
