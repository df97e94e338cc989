use thiserror::Error;
use uuid::Uuid;

use crate::contract::model::LikeTarget;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Cannot like your own listing or profile")]
    SelfLike,

    #[error("Target not found or inactive: {target}")]
    TargetNotFound { target: LikeTarget },

    #[error("Match not found: {id}")]
    MatchNotFound { id: Uuid },

    #[error("User {user} is not a participant of match {match_id}")]
    NotAuthorized { user: Uuid, match_id: Uuid },

    #[error("Message content cannot be empty")]
    EmptyContent,

    #[error("A match requires two distinct users")]
    IdenticalUsers,

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn self_like() -> Self {
        Self::SelfLike
    }

    pub fn target_not_found(target: LikeTarget) -> Self {
        Self::TargetNotFound { target }
    }

    pub fn match_not_found(id: Uuid) -> Self {
        Self::MatchNotFound { id }
    }

    pub fn not_authorized(user: Uuid, match_id: Uuid) -> Self {
        Self::NotAuthorized { user, match_id }
    }

    pub fn empty_content() -> Self {
        Self::EmptyContent
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}
