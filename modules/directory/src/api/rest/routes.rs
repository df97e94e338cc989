use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Extension, Router,
};

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// Build the directory router. The server binary layers `JwtKeys` on the
/// merged router so the `AuthUser` extractor works across modules.
pub fn router(service: Arc<Service>) -> Router {
    Router::new()
        .route("/auth/register", post(handlers::register))
        .route("/auth/login", post(handlers::login))
        .route("/auth/me", get(handlers::me))
        .route("/auth/preferences", put(handlers::update_preferences))
        .route("/listings", post(handlers::create_listing))
        .route("/listings/browse", get(handlers::browse))
        .route("/listings/buyers", get(handlers::browse_buyers))
        .route("/listings/my-listings", get(handlers::my_listings))
        .route("/listings/likes/saved", get(handlers::saved_listings))
        .route(
            "/listings/{id}",
            get(handlers::get_listing)
                .put(handlers::update_listing)
                .delete(handlers::delete_listing),
        )
        .layer(Extension(service))
}
