use thiserror::Error;
use uuid::Uuid;

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone)]
pub enum DirectoryError {
    #[error("User not found: {id}")]
    UserNotFound { id: Uuid },

    #[error("Listing not found: {id}")]
    ListingNotFound { id: Uuid },

    #[error("User with email '{email}' already exists")]
    Conflict { email: String },

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Not the owner of listing {listing}")]
    NotOwner { listing: Uuid },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error")]
    Internal,
}

impl DirectoryError {
    pub fn user_not_found(id: Uuid) -> Self {
        Self::UserNotFound { id }
    }

    pub fn listing_not_found(id: Uuid) -> Self {
        Self::ListingNotFound { id }
    }

    pub fn conflict(email: String) -> Self {
        Self::Conflict { email }
    }

    pub fn not_owner(listing: Uuid) -> Self {
        Self::NotOwner { listing }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}
