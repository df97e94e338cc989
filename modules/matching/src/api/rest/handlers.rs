use std::sync::Arc;

use apikit::auth::AuthUser;
use apikit::problem::ProblemResponse;
use apikit::SseBroadcaster;
use axum::{
    extract::Path,
    http::{StatusCode, Uri},
    response::IntoResponse,
    response::Json,
    Extension,
};
use tracing::{error, info};
use uuid::Uuid;

use crate::api::rest::dto::{
    BuyerLikeResponse, LikeResponse, MatchEvent, MatchResponse, MatchesResponse, MessageResponse,
    MessagesResponse, PostMessageReq, UnlikeResponse,
};
use crate::api::rest::error::map_domain_error;
use crate::api::rest::views::MatchPresenter;
use crate::contract::model::LikeTarget;
use crate::domain::service::Service;

/// Like a listing. Idempotent on duplicate likes; returns the match when
/// this like confirmed mutuality.
pub async fn like_listing(
    auth: AuthUser,
    Extension(svc): Extension<Arc<Service>>,
    Extension(presenter): Extension<Arc<MatchPresenter>>,
    Path(id): Path<Uuid>,
    uri: Uri,
) -> Result<Json<LikeResponse>, ProblemResponse> {
    match svc.like(auth.id, LikeTarget::Listing(id)).await {
        Ok(result) => {
            let match_view = match &result.matched {
                Some(m) => Some(presenter.present_match(m).await),
                None => None,
            };
            Ok(Json(LikeResponse {
                like: result.like.into(),
                matched: match_view.is_some(),
                match_view,
            }))
        }
        Err(e) => {
            error!("Failed to like listing {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Unlike a listing. Never retracts an existing match.
pub async fn unlike_listing(
    auth: AuthUser,
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
    uri: Uri,
) -> Result<Json<UnlikeResponse>, ProblemResponse> {
    match svc.unlike(auth.id, LikeTarget::Listing(id)).await {
        Ok(removed) => Ok(Json(UnlikeResponse { removed })),
        Err(e) => {
            error!("Failed to unlike listing {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Like a buyer through the synthetic `buyer-<id>` target.
pub async fn like_buyer(
    auth: AuthUser,
    Extension(svc): Extension<Arc<Service>>,
    Extension(presenter): Extension<Arc<MatchPresenter>>,
    Path(buyer_id): Path<Uuid>,
    uri: Uri,
) -> Result<Json<BuyerLikeResponse>, ProblemResponse> {
    match svc.like(auth.id, LikeTarget::Buyer(buyer_id)).await {
        Ok(result) => {
            let match_view = match &result.matched {
                Some(m) => Some(presenter.present_match(m).await),
                None => None,
            };
            Ok(Json(BuyerLikeResponse {
                matched: match_view.is_some(),
                match_view,
            }))
        }
        Err(e) => {
            error!("Failed to like buyer {}: {}", buyer_id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// The caller's matches, most recent conversation activity first.
pub async fn list_matches(
    auth: AuthUser,
    Extension(svc): Extension<Arc<Service>>,
    Extension(presenter): Extension<Arc<MatchPresenter>>,
    uri: Uri,
) -> Result<Json<MatchesResponse>, ProblemResponse> {
    match svc.matches_for(auth.id).await {
        Ok(matches) => {
            let mut out = Vec::with_capacity(matches.len());
            for m in &matches {
                out.push(presenter.present_match(m).await);
            }
            Ok(Json(MatchesResponse { matches: out }))
        }
        Err(e) => {
            error!("Failed to list matches: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn get_match(
    auth: AuthUser,
    Extension(svc): Extension<Arc<Service>>,
    Extension(presenter): Extension<Arc<MatchPresenter>>,
    Path(id): Path<Uuid>,
    uri: Uri,
) -> Result<Json<MatchResponse>, ProblemResponse> {
    match svc.get_match(id, auth.id).await {
        Ok(m) => Ok(Json(MatchResponse {
            match_view: presenter.present_match(&m).await,
        })),
        Err(e) => Err(map_domain_error(&e, uri.path())),
    }
}

pub async fn list_messages(
    auth: AuthUser,
    Extension(svc): Extension<Arc<Service>>,
    Extension(presenter): Extension<Arc<MatchPresenter>>,
    Path(id): Path<Uuid>,
    uri: Uri,
) -> Result<Json<MessagesResponse>, ProblemResponse> {
    match svc.list_messages(id, auth.id).await {
        Ok(messages) => {
            let mut out = Vec::with_capacity(messages.len());
            for message in &messages {
                out.push(presenter.present_message(message).await);
            }
            Ok(Json(MessagesResponse { messages: out }))
        }
        Err(e) => Err(map_domain_error(&e, uri.path())),
    }
}

pub async fn post_message(
    auth: AuthUser,
    Extension(svc): Extension<Arc<Service>>,
    Extension(presenter): Extension<Arc<MatchPresenter>>,
    Path(id): Path<Uuid>,
    uri: Uri,
    Json(req): Json<PostMessageReq>,
) -> Result<(StatusCode, Json<MessageResponse>), ProblemResponse> {
    match svc.post_message(id, auth.id, &req.content).await {
        Ok(message) => Ok((
            StatusCode::CREATED,
            Json(MessageResponse {
                message: presenter.present_message(&message).await,
            }),
        )),
        Err(e) => {
            error!("Failed to post message to match {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// SSE endpoint returning a live stream of `MatchEvent`.
pub async fn match_events(
    _auth: AuthUser,
    Extension(sse): Extension<SseBroadcaster<MatchEvent>>,
) -> impl IntoResponse {
    info!("New SSE connection for match events");
    sse.sse_response_named("match_events")
}
