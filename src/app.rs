/*
 * Responsibility
 * - tracing / panic hook 初期化
 * - Config読み込み → store 生成 → Router 組み立て
 * - Middleware の適用 (HTTP/CORS/security headers)
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    api,
    config::{Config, StoreBackend},
    middleware,
    repos::{MemoryPostStore, PgPostStore, PostStore},
    services::id_codec::IdCodec,
    state::AppState,
};

fn init_tracing() {
    // RUST_LOG=info,blog_api=debug,tower_http=debug cargo run
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

        // Development fails fast; production keeps serving.
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
        "starting blog API in {:?} mode on {} ({:?} store)",
        config.app_env,
        config.addr,
        config.store_backend
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub async fn build_state(config: &Config) -> Result<AppState> {
    let posts: Arc<dyn PostStore> = match config.store_backend {
        StoreBackend::Memory => Arc::new(MemoryPostStore::new()),
        StoreBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is required for the postgres store")?;
            Arc::new(PgPostStore::connect(url, config.database_max_connections).await?)
        }
    };

    let id_codec = IdCodec::new(config.sqids_min_length, &config.sqids_alphabet)?;

    Ok(AppState::new(posts, id_codec))
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = api::routes().with_state(state);

    let router = middleware::security_headers::apply(router);
    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router, config)
}
