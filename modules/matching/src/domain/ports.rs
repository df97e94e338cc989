use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Listing facts the engine needs from the directory: ownership, liveness
/// and a stable creation order for the reciprocity scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingBrief {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Input port: the read-only slice of the directory the engine consumes.
/// Wired by the server binary over the directory module.
#[async_trait]
pub trait DirectoryPort: Send + Sync {
    async fn find_listing(&self, id: Uuid) -> anyhow::Result<Option<ListingBrief>>;
    /// Whether the user exists and participates as a pure buyer.
    async fn is_buyer(&self, user: Uuid) -> anyhow::Result<bool>;
    async fn active_listings_of(&self, owner: Uuid) -> anyhow::Result<Vec<ListingBrief>>;
}

/// Output port: publish domain events (no knowledge of transport).
pub trait EventPublisher<E>: Send + Sync + 'static {
    fn publish(&self, event: &E);
}
