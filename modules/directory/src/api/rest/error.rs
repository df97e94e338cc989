use apikit::problem::{from_parts, ProblemResponse};
use axum::http::StatusCode;

use crate::domain::error::DomainError;

/// Map domain error to RFC9457 ProblemResponse
pub fn map_domain_error(e: &DomainError, instance: &str) -> ProblemResponse {
    match e {
        DomainError::UserNotFound { id } => from_parts(
            StatusCode::NOT_FOUND,
            "DIRECTORY_USER_NOT_FOUND",
            "User not found",
            format!("User with id {} was not found", id),
            instance,
        ),
        DomainError::ListingNotFound { id } => from_parts(
            StatusCode::NOT_FOUND,
            "DIRECTORY_LISTING_NOT_FOUND",
            "Listing not found",
            format!("Listing with id {} was not found", id),
            instance,
        ),
        DomainError::EmailAlreadyExists { email } => from_parts(
            StatusCode::CONFLICT,
            "DIRECTORY_EMAIL_CONFLICT",
            "Email already exists",
            format!("Email '{}' is already in use", email),
            instance,
        ),
        DomainError::InvalidCredentials => from_parts(
            StatusCode::UNAUTHORIZED,
            "DIRECTORY_INVALID_CREDENTIALS",
            "Invalid credentials",
            "Invalid email or password",
            instance,
        ),
        DomainError::NotOwner { listing, .. } => from_parts(
            StatusCode::FORBIDDEN,
            "DIRECTORY_NOT_OWNER",
            "Not authorized",
            format!("Caller does not own listing {}", listing),
            instance,
        ),
        DomainError::InvalidEmail { email } => from_parts(
            StatusCode::BAD_REQUEST,
            "DIRECTORY_INVALID_EMAIL",
            "Invalid email",
            format!("Email '{}' is invalid", email),
            instance,
        ),
        DomainError::EmptyDisplayName
        | DomainError::DisplayNameTooLong { .. }
        | DomainError::PasswordTooShort { .. }
        | DomainError::Validation { .. } => from_parts(
            StatusCode::BAD_REQUEST,
            "DIRECTORY_VALIDATION",
            "Validation error",
            format!("{}", e),
            instance,
        ),
        DomainError::Storage { .. } => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = ?e, "Storage error occurred");
            from_parts(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_STORAGE",
                "Internal error",
                "An internal storage error occurred",
                instance,
            )
        }
    }
}
