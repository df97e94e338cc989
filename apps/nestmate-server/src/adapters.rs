//! Cross-module adapters. Each module declares the port it needs; the
//! server wires it over the other module's read side, keeping the crate
//! graph acyclic.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use directory::contract::model::Role;
use directory::domain::ports::{InterestReader, LikedListing};
use directory::domain::repo::DirectoryRepository;
use matching::domain::ports::{DirectoryPort, ListingBrief};

/// `matching::DirectoryPort` over the directory repository (read-only).
pub struct DirectoryLookup {
    repo: Arc<dyn DirectoryRepository>,
}

impl DirectoryLookup {
    pub fn new(repo: Arc<dyn DirectoryRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl DirectoryPort for DirectoryLookup {
    async fn find_listing(&self, id: Uuid) -> anyhow::Result<Option<ListingBrief>> {
        Ok(self.repo.find_listing(id).await?.map(|l| ListingBrief {
            id: l.id,
            owner_id: l.owner_id,
            is_active: l.is_active,
            created_at: l.created_at,
        }))
    }

    async fn is_buyer(&self, user: Uuid) -> anyhow::Result<bool> {
        Ok(self
            .repo
            .find_user_by_id(user)
            .await?
            .is_some_and(|u| u.role == Role::Buyer))
    }

    async fn active_listings_of(&self, owner: Uuid) -> anyhow::Result<Vec<ListingBrief>> {
        Ok(self
            .repo
            .listings_by_owner(owner)
            .await?
            .into_iter()
            .filter(|l| l.is_active)
            .map(|l| ListingBrief {
                id: l.id,
                owner_id: l.owner_id,
                is_active: l.is_active,
                created_at: l.created_at,
            })
            .collect())
    }
}

/// `directory::InterestReader` over the matching service (read-only).
pub struct LikesLookup {
    matching: Arc<matching::domain::service::Service>,
}

impl LikesLookup {
    pub fn new(matching: Arc<matching::domain::service::Service>) -> Self {
        Self { matching }
    }
}

#[async_trait]
impl InterestReader for LikesLookup {
    async fn liked_listings(&self, actor: Uuid) -> anyhow::Result<Vec<LikedListing>> {
        let likes = self.matching.likes_by_actor(actor).await?;
        Ok(likes
            .into_iter()
            .filter_map(|like| {
                // synthetic buyer targets are not listings
                like.target.listing_id().map(|listing_id| LikedListing {
                    listing_id,
                    liked_at: like.created_at,
                })
            })
            .collect())
    }
}
