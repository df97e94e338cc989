//! Shared HTTP plumbing for the REST modules: RFC 9457 problem responses,
//! a typed SSE broadcaster and bearer-token authentication.

pub mod auth;
pub mod problem;
pub mod sse;

pub use auth::{AuthUser, Claims, JwtKeys};
pub use problem::{Problem, ProblemResponse};
pub use sse::SseBroadcaster;
