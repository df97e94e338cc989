use std::sync::Arc;

use apikit::SseBroadcaster;
use axum::{
    routing::{get, post},
    Extension, Router,
};

use crate::api::rest::dto::MatchEvent;
use crate::api::rest::handlers;
use crate::api::rest::views::MatchPresenter;
use crate::domain::service::Service;

/// Build the matching router. The server binary layers `JwtKeys` on the
/// merged router so the `AuthUser` extractor works across modules.
pub fn router(
    service: Arc<Service>,
    presenter: Arc<MatchPresenter>,
    events: SseBroadcaster<MatchEvent>,
) -> Router {
    Router::new()
        .route(
            "/listings/{id}/like",
            post(handlers::like_listing).delete(handlers::unlike_listing),
        )
        .route(
            "/listings/buyers/{buyer_id}/like",
            post(handlers::like_buyer),
        )
        .route("/matches", get(handlers::list_matches))
        .route("/matches/events", get(handlers::match_events))
        .route("/matches/{id}", get(handlers::get_match))
        .route(
            "/matches/{id}/messages",
            get(handlers::list_messages).post(handlers::post_message),
        )
        .layer(Extension(service))
        .layer(Extension(presenter))
        .layer(Extension(events))
}
