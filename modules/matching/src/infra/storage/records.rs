//! Storage-level records. Field names follow the reference document layout
//! (camelCase, `userId`/`listingId`); like and match targets are stored in
//! their string form, `buyer-<uuid>` for synthetic buyer targets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredLike {
    pub id: Uuid,
    pub user_id: Uuid,
    pub listing_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredMatch {
    pub id: Uuid,
    /// Exactly two user ids, kept sorted.
    pub users: Vec<Uuid>,
    pub listing_id: String,
    pub matched_at: DateTime<Utc>,
    pub last_message_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredMessage {
    pub id: Uuid,
    pub match_id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
}
