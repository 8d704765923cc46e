/*
 * Responsibility
 * - Load Config → build dependencies → assemble the Router
 * - Apply middleware (bearer flow, errors, CORS, HTTP plumbing)
 * - Start axum::serve()
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::{self, handlers::health::not_found};
use crate::config::Config;
use crate::middleware;
use crate::repos::{PgUserStore, store::UserStore};
use crate::services::auth::build_auth_service;
use crate::services::clock::SystemClock;
use crate::state::AppState;

fn init_tracing() {
    // RUST_LOG=info,buddy_auth=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // Fail fast outside production.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("failed to connect to the database")?;

    let users: Arc<dyn UserStore> = Arc::new(PgUserStore::new(pool));
    tracing::info!(backend = users.backend_name(), "user store ready");

    let auth = build_auth_service(config, users.clone(), Arc::new(SystemClock))?;

    Ok(AppState::new(auth, users))
}

/// Full router with every layer applied. Tests build it over in-memory state.
pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = api::routes().fallback(not_found);
    let router = middleware::auth::access::apply(router, state.clone()).with_state(state);

    let router = middleware::errors::apply(router, config.app_env);
    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router)
}
