use async_trait::async_trait;
use uuid::Uuid;

use crate::contract::error::DirectoryError;
use crate::contract::model::{Listing, User};

/// Read-side API other modules use to resolve identifiers into display
/// data (match views embed owner and listing info).
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    async fn get_user(&self, id: Uuid) -> Result<User, DirectoryError>;
    async fn get_listing(&self, id: Uuid) -> Result<Listing, DirectoryError>;
}
