//! Domain error types.
//!
//! These errors represent malformed input rejected while building domain
//! values. They are distinct from provider and optimizer errors.

use super::{TimeError, UnknownTravelMode};

/// Domain-level validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error(transparent)]
    TravelMode(#[from] UnknownTravelMode),

    #[error(transparent)]
    Time(#[from] TimeError),
}
