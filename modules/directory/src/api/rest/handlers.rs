use std::sync::Arc;

use apikit::auth::{AuthUser, JwtKeys};
use apikit::problem::{self, ProblemResponse};
use axum::{
    extract::{Path, Query},
    http::{StatusCode, Uri},
    response::Json,
    Extension,
};
use tracing::{error, info};
use uuid::Uuid;

use crate::api::rest::dto::{
    AuthResponse, BrowseQuery, BuyersResponse, CreateListingReq, ListingDto, ListingResponse,
    ListingsResponse, LoginReq, RegisterReq, UpdateListingReq, UpdatePreferencesReq, UserDto,
    UserResponse,
};
use crate::api::rest::error::map_domain_error;
use crate::contract::model::{BrowseKind, Listing, NewUser, Role, UserPatch};
use crate::domain::service::Service;

/// Resolve the owner for display; a vanished owner leaves the listing bare.
async fn populate(svc: &Service, listing: Listing) -> ListingDto {
    let owner = svc.get_user(listing.owner_id).await.ok();
    let dto = ListingDto::from(listing);
    match owner {
        Some(user) => dto.with_owner(&user),
        None => dto,
    }
}

pub async fn register(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Extension(keys): Extension<Arc<JwtKeys>>,
    Json(req): Json<RegisterReq>,
) -> Result<(StatusCode, Json<AuthResponse>), ProblemResponse> {
    info!("Registering user with email: {}", req.email);

    let role = match req.role.as_deref() {
        None => Role::Both,
        Some(s) => Role::parse(s)
            .ok_or_else(|| problem::bad_request(format!("unknown role '{s}'")))?,
    };

    let new_user = NewUser {
        email: req.email,
        password: req.password,
        display_name: req.name,
        role,
    };

    match svc.register(new_user).await {
        Ok(user) => {
            let token = keys
                .sign(user.id, &user.email)
                .map_err(|e| problem::internal_error(e.to_string()))?;
            Ok((
                StatusCode::CREATED,
                Json(AuthResponse {
                    token,
                    user: UserDto::from(user),
                }),
            ))
        }
        Err(e) => {
            error!("Failed to register user: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn login(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Extension(keys): Extension<Arc<JwtKeys>>,
    Json(req): Json<LoginReq>,
) -> Result<Json<AuthResponse>, ProblemResponse> {
    match svc.authenticate(&req.email, &req.password).await {
        Ok(user) => {
            let token = keys
                .sign(user.id, &user.email)
                .map_err(|e| problem::internal_error(e.to_string()))?;
            Ok(Json(AuthResponse {
                token,
                user: UserDto::from(user),
            }))
        }
        Err(e) => Err(map_domain_error(&e, uri.path())),
    }
}

pub async fn me(
    auth: AuthUser,
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
) -> Result<Json<UserResponse>, ProblemResponse> {
    match svc.get_user(auth.id).await {
        Ok(user) => Ok(Json(UserResponse {
            user: UserDto::from(user),
        })),
        Err(e) => Err(map_domain_error(&e, uri.path())),
    }
}

pub async fn update_preferences(
    auth: AuthUser,
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    Json(req): Json<UpdatePreferencesReq>,
) -> Result<Json<UserResponse>, ProblemResponse> {
    // Merge over the caller's current preferences, field by field.
    let current = svc
        .get_user(auth.id)
        .await
        .map_err(|e| map_domain_error(&e, uri.path()))?;

    let mut preferences = current.preferences;
    if let Some(range) = req.price_range {
        preferences.price_min = range.min;
        preferences.price_max = range.max;
    }
    if let Some(num) = req.num_roommates {
        preferences.num_roommates = num;
    }
    if let Some(genders) = req.preferred_genders {
        preferences.preferred_genders = genders;
    }
    if let Some(locations) = req.preferred_locations {
        preferences.preferred_neighborhoods = locations;
    }

    let patch = UserPatch {
        preferences: Some(preferences),
        ..UserPatch::default()
    };

    match svc.update_user(auth.id, patch).await {
        Ok(user) => Ok(Json(UserResponse {
            user: UserDto::from(user),
        })),
        Err(e) => {
            error!("Failed to update preferences: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn browse(
    auth: AuthUser,
    Extension(svc): Extension<Arc<Service>>,
    Query(query): Query<BrowseQuery>,
    uri: Uri,
) -> Result<Json<ListingsResponse>, ProblemResponse> {
    let kind = query.kind.as_deref().and_then(BrowseKind::parse);

    match svc.browse(auth.id, kind).await {
        Ok(listings) => {
            let mut out = Vec::with_capacity(listings.len());
            for listing in listings {
                out.push(populate(&svc, listing).await);
            }
            Ok(Json(ListingsResponse { listings: out }))
        }
        Err(e) => {
            error!("Failed to browse listings: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn browse_buyers(
    auth: AuthUser,
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
) -> Result<Json<BuyersResponse>, ProblemResponse> {
    match svc.browse_buyers(auth.id).await {
        Ok(buyers) => Ok(Json(BuyersResponse {
            buyers: buyers.into_iter().map(UserDto::from).collect(),
        })),
        Err(e) => Err(map_domain_error(&e, uri.path())),
    }
}

pub async fn my_listings(
    auth: AuthUser,
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
) -> Result<Json<ListingsResponse>, ProblemResponse> {
    match svc.my_listings(auth.id).await {
        Ok(listings) => Ok(Json(ListingsResponse {
            listings: listings.into_iter().map(ListingDto::from).collect(),
        })),
        Err(e) => Err(map_domain_error(&e, uri.path())),
    }
}

pub async fn saved_listings(
    auth: AuthUser,
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
) -> Result<Json<ListingsResponse>, ProblemResponse> {
    match svc.saved_listings(auth.id).await {
        Ok(listings) => {
            let mut out = Vec::with_capacity(listings.len());
            for listing in listings {
                out.push(populate(&svc, listing).await);
            }
            Ok(Json(ListingsResponse { listings: out }))
        }
        Err(e) => Err(map_domain_error(&e, uri.path())),
    }
}

pub async fn create_listing(
    auth: AuthUser,
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    Json(req): Json<CreateListingReq>,
) -> Result<(StatusCode, Json<ListingResponse>), ProblemResponse> {
    info!("Creating listing for owner {}", auth.id);

    match svc.create_listing(auth.id, req.into()).await {
        Ok(listing) => {
            let listing = populate(&svc, listing).await;
            Ok((StatusCode::CREATED, Json(ListingResponse { listing })))
        }
        Err(e) => {
            error!("Failed to create listing: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn get_listing(
    _auth: AuthUser,
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
    uri: Uri,
) -> Result<Json<ListingResponse>, ProblemResponse> {
    match svc.get_listing(id).await {
        Ok(listing) => Ok(Json(ListingResponse {
            listing: populate(&svc, listing).await,
        })),
        Err(e) => Err(map_domain_error(&e, uri.path())),
    }
}

pub async fn update_listing(
    auth: AuthUser,
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
    uri: Uri,
    Json(req): Json<UpdateListingReq>,
) -> Result<Json<ListingResponse>, ProblemResponse> {
    match svc.update_listing(auth.id, id, req.into()).await {
        Ok(listing) => Ok(Json(ListingResponse {
            listing: populate(&svc, listing).await,
        })),
        Err(e) => {
            error!("Failed to update listing {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn delete_listing(
    auth: AuthUser,
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
    uri: Uri,
) -> Result<StatusCode, ProblemResponse> {
    match svc.delete_listing(auth.id, id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            error!("Failed to delete listing {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}
