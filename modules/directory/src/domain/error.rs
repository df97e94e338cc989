use thiserror::Error;
use uuid::Uuid;

use crate::contract::error::DirectoryError;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("User not found: {id}")]
    UserNotFound { id: Uuid },

    #[error("Listing not found: {id}")]
    ListingNotFound { id: Uuid },

    #[error("User with email '{email}' already exists")]
    EmailAlreadyExists { email: String },

    #[error("Invalid email format: '{email}'")]
    InvalidEmail { email: String },

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Display name cannot be empty")]
    EmptyDisplayName,

    #[error("Display name too long: {len} characters (max: {max})")]
    DisplayNameTooLong { len: usize, max: usize },

    #[error("Password too short (min: {min} characters)")]
    PasswordTooShort { min: usize },

    #[error("User {user} does not own listing {listing}")]
    NotOwner { user: Uuid, listing: Uuid },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn user_not_found(id: Uuid) -> Self {
        Self::UserNotFound { id }
    }

    pub fn listing_not_found(id: Uuid) -> Self {
        Self::ListingNotFound { id }
    }

    pub fn email_already_exists(email: String) -> Self {
        Self::EmailAlreadyExists { email }
    }

    pub fn invalid_email(email: String) -> Self {
        Self::InvalidEmail { email }
    }

    pub fn empty_display_name() -> Self {
        Self::EmptyDisplayName
    }

    pub fn display_name_too_long(len: usize, max: usize) -> Self {
        Self::DisplayNameTooLong { len, max }
    }

    pub fn password_too_short(min: usize) -> Self {
        Self::PasswordTooShort { min }
    }

    pub fn not_owner(user: Uuid, listing: Uuid) -> Self {
        Self::NotOwner { user, listing }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

impl From<DomainError> for DirectoryError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::UserNotFound { id } => DirectoryError::UserNotFound { id },
            DomainError::ListingNotFound { id } => DirectoryError::ListingNotFound { id },
            DomainError::EmailAlreadyExists { email } => DirectoryError::Conflict { email },
            DomainError::InvalidCredentials => DirectoryError::InvalidCredentials,
            DomainError::NotOwner { listing, .. } => DirectoryError::NotOwner { listing },
            DomainError::Storage { .. } => DirectoryError::Internal,
            other => DirectoryError::Validation {
                message: other.to_string(),
            },
        }
    }
}
