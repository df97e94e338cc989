use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::contract::model::LikeTarget;

/// Transport-agnostic domain event. Fan-out is best-effort; emitting one
/// never affects the write it describes.
#[derive(Debug, Clone)]
pub enum MatchingDomainEvent {
    MatchCreated {
        match_id: Uuid,
        users: [Uuid; 2],
        listing: LikeTarget,
        at: DateTime<Utc>,
    },
    MessageCreated {
        match_id: Uuid,
        message_id: Uuid,
        sender_id: Uuid,
        at: DateTime<Utc>,
    },
}
