//! Error types for the evictkit library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when cache configuration parameters are invalid
//!   (e.g. min capacity above max, growth factor below 1).
//! - [`PolicyError`]: Returned when the composed policies disagree at runtime:
//!   the eviction policy selected a victim that storage does not know. A
//!   conforming policy composition never produces this error.
//!
//! Key lookup misses are not errors: [`PolicyCache::get`](crate::cache::PolicyCache::get)
//! returns `Option`, and an empty eviction policy reports "no candidate" as
//! `None` from `select_victim`.
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::capacity::DynamicCapacity;
//! use evictkit::error::ConfigError;
//!
//! // Fallible constructor for user-configurable parameters
//! let policy: Result<DynamicCapacity, ConfigError> =
//!     DynamicCapacity::try_new(100, 10, 1000, 1.5, 0.75, 100);
//! assert!(policy.is_ok());
//!
//! // Invalid bounds are caught without panicking
//! let bad = DynamicCapacity::try_new(100, 500, 50, 1.5, 0.75, 100);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`DynamicCapacity::try_new`](crate::capacity::DynamicCapacity::try_new) and
/// [`SoftCapacity::try_with_tolerance`](crate::capacity::SoftCapacity::try_with_tolerance).
/// Carries a human-readable description of which parameter failed validation.
///
/// # Example
///
/// ```
/// use evictkit::capacity::SoftCapacity;
///
/// let err = SoftCapacity::try_with_tolerance(100, 2.0).unwrap_err();
/// assert!(err.to_string().contains("tolerance"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// PolicyError
// ---------------------------------------------------------------------------

/// Error returned when the eviction policy and storage fall out of agreement.
///
/// Produced by [`PolicyCache::insert`](crate::cache::PolicyCache::insert) and
/// [`PolicyCache::set_capacity`](crate::cache::PolicyCache::set_capacity) when
/// the eviction loop selects a victim key that storage does not contain. This
/// indicates a bug in a policy implementation; the operation is aborted and
/// the cache remains self-consistent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyError(String);

impl PolicyError {
    /// Creates a new `PolicyError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for PolicyError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
