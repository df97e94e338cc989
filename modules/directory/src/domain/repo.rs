use crate::contract::model::{Listing, User};
use async_trait::async_trait;
use uuid::Uuid;

/// Port for the domain layer: persistence operations the domain needs.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    // --- users ---

    /// Load a user by id.
    async fn find_user_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    /// Load a user together with the stored password hash, for login.
    async fn find_credentials(&self, email: &str) -> anyhow::Result<Option<(User, String)>>;
    /// Check uniqueness by email.
    async fn email_exists(&self, email: &str) -> anyhow::Result<bool>;
    /// Insert a fully-formed domain user.
    ///
    /// Service computes id/timestamps/validation and hashes the password;
    /// repo persists.
    async fn insert_user(&self, user: User, password_hash: String) -> anyhow::Result<()>;
    /// Update an existing user (by primary key in `user.id`). The stored
    /// password hash is left untouched.
    async fn update_user(&self, user: User) -> anyhow::Result<()>;
    /// All users, unordered.
    async fn list_users(&self) -> anyhow::Result<Vec<User>>;

    // --- listings ---

    /// Load a listing by id.
    async fn find_listing(&self, id: Uuid) -> anyhow::Result<Option<Listing>>;
    /// Insert a fully-formed listing.
    async fn insert_listing(&self, listing: Listing) -> anyhow::Result<()>;
    /// Update an existing listing (by primary key in `listing.id`).
    async fn update_listing(&self, listing: Listing) -> anyhow::Result<()>;
    /// Delete by id. Returns true if a row was deleted.
    async fn delete_listing(&self, id: Uuid) -> anyhow::Result<bool>;
    /// All listings of one owner, unordered.
    async fn listings_by_owner(&self, owner: Uuid) -> anyhow::Result<Vec<Listing>>;
    /// All active listings, unordered.
    async fn active_listings(&self) -> anyhow::Result<Vec<Listing>>;
}
