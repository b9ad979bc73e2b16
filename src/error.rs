//! Error types for portfolio_plus
//!
//! This module defines domain-specific error types that provide clear,
//! actionable error messages. Scrape and storage failures are absorbed
//! (logged) at the call site so the host page keeps working; validation
//! failures are shown to the user.

use thiserror::Error;

/// Validation errors for user-entered target allocations.
///
/// These errors are shown directly to users and should be clear and actionable.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Target allocation is not a number: {0}")]
    NotANumber(String),

    #[error("Target allocation must be between 0 and 100, got {0}")]
    OutOfRange(f64),
}

/// Failures while reading values out of the host page's DOM.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Combined total value not found on the page")]
    MissingTotal,

    #[error("Could not parse money text: {0:?}")]
    UnparseableMoney(String),

    #[error("Combined total is not positive: {0}")]
    NonPositiveTotal(f64),
}

/// Failures at the persistence seam.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Db(#[from] sled::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
