use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A listing the actor has expressed interest in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikedListing {
    pub listing_id: Uuid,
    pub liked_at: DateTime<Utc>,
}

/// Input port: read-only view of the like ledger, used to exclude
/// already-liked listings from browsing and to build the saved list.
/// Wired by the server binary over the matching module.
#[async_trait]
pub trait InterestReader: Send + Sync {
    async fn liked_listings(&self, actor: Uuid) -> anyhow::Result<Vec<LikedListing>>;
}
