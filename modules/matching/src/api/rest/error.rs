use apikit::problem::{from_parts, ProblemResponse};
use axum::http::StatusCode;

use crate::domain::error::DomainError;

/// Map domain error to RFC9457 ProblemResponse
pub fn map_domain_error(e: &DomainError, instance: &str) -> ProblemResponse {
    match e {
        DomainError::SelfLike => from_parts(
            StatusCode::BAD_REQUEST,
            "MATCHING_SELF_LIKE",
            "Invalid like",
            "Cannot like your own listing or profile",
            instance,
        ),
        DomainError::TargetNotFound { target } => from_parts(
            StatusCode::NOT_FOUND,
            "MATCHING_TARGET_NOT_FOUND",
            "Target not found",
            format!("Like target {} was not found or is inactive", target),
            instance,
        ),
        DomainError::MatchNotFound { id } => from_parts(
            StatusCode::NOT_FOUND,
            "MATCHING_MATCH_NOT_FOUND",
            "Match not found",
            format!("Match with id {} was not found", id),
            instance,
        ),
        DomainError::NotAuthorized { match_id, .. } => from_parts(
            StatusCode::FORBIDDEN,
            "MATCHING_NOT_AUTHORIZED",
            "Not authorized",
            format!("Caller is not a participant of match {}", match_id),
            instance,
        ),
        DomainError::EmptyContent => from_parts(
            StatusCode::BAD_REQUEST,
            "MATCHING_EMPTY_CONTENT",
            "Validation error",
            "Message content cannot be empty",
            instance,
        ),
        DomainError::IdenticalUsers => from_parts(
            StatusCode::BAD_REQUEST,
            "MATCHING_VALIDATION",
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
