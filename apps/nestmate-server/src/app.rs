//! Composition root: opens the document store, builds both modules'
//! services over it, wires the cross-module ports and merges the routers.

use std::sync::Arc;

use anyhow::{Context, Result};
use apikit::{JwtKeys, SseBroadcaster};
use axum::{routing::get, Extension, Json, Router};
use docstore::DocStore;
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use directory::config::DirectoryConfig;
use directory::gateways::DirectoryLocalClient;
use directory::infra::storage::DocDirectoryRepository;
use matching::api::rest::dto::MatchEvent;
use matching::api::rest::sse_adapter::SseMatchEventPublisher;
use matching::api::rest::views::MatchPresenter;
use matching::config::MatchingConfig;
use matching::infra::storage::DocMatchingRepository;
use runtime::{AppConfig, CliArgs};

use crate::adapters::{DirectoryLookup, LikesLookup};

/// Auth section of the per-module config bag.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct AuthSection {
    #[serde(default)]
    secret: String,
}

pub async fn build_router(config: &AppConfig, args: &CliArgs) -> Result<Router> {
    // Storage: one JSON document shared by both modules.
    let store = if args.mock {
        tracing::info!("Using in-memory document store (--mock)");
        DocStore::in_memory()
    } else if let Some(path) = config.storage_file() {
        tracing::info!("Opening document store at {}", path.display());
        DocStore::open(&path)
            .await
            .with_context(|| format!("cannot open document store at {}", path.display()))?
    } else {
        tracing::warn!("No storage configured, falling back to in-memory document store");
        DocStore::in_memory()
    };
    let store = Arc::new(store);

    // Per-module config sections.
    let directory_cfg: DirectoryConfig = config.module_config("directory")?;
    let matching_cfg: MatchingConfig = config.module_config("matching")?;
    let auth_cfg: AuthSection = config.module_config("auth")?;

    let secret = if auth_cfg.secret.is_empty() {
        tracing::warn!("auth.secret not configured, using development secret");
        "dev-secret-key".to_string()
    } else {
        auth_cfg.secret
    };
    let keys = Arc::new(JwtKeys::new(secret.as_bytes()));

    // Repositories over the shared store.
    let directory_repo = Arc::new(DocDirectoryRepository::new(store.clone()));
    let matching_repo = Arc::new(DocMatchingRepository::new(store.clone()));

    // Event fan-out: domain port -> SSE broadcaster.
    let events = SseBroadcaster::<MatchEvent>::new(matching_cfg.events_buffer);
    let publisher = Arc::new(SseMatchEventPublisher::new(events.clone()));

    // The engine consumes the directory read-only through its port.
    let matching_service = Arc::new(matching::domain::service::Service::new(
        matching_repo,
        Arc::new(DirectoryLookup::new(directory_repo.clone())),
        publisher,
        matching::domain::service::ServiceConfig {
            policy: matching_cfg.match_policy()?,
        },
    ));

    // The directory consumes the like ledger read-only through its port.
    let directory_service = Arc::new(directory::domain::service::Service::new(
        directory_repo,
        Arc::new(LikesLookup::new(matching_service.clone())),
        directory::domain::service::ServiceConfig {
            max_display_name_length: directory_cfg.max_display_name_length,
            min_password_length: directory_cfg.min_password_length,
        },
    ));

    // Read-side projection for match/message views.
    let presenter = Arc::new(MatchPresenter::new(Arc::new(DirectoryLocalClient::new(
        directory_service.clone(),
    ))));

    let api = directory::api::rest::routes::router(directory_service)
        .merge(matching::api::rest::routes::router(
            matching_service,
            presenter,
            events,
        ))
        .route("/health", get(health));

    Ok(Router::new()
        .nest("/api", api)
        .layer(Extension(keys))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http()))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
