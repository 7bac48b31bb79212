//! Error model for remote calls and the submission workflow.

use thiserror::Error;

use potrack_core::DomainError;

/// A failed call to the back-office API.
///
/// These are never retried here; callers decide whether a partial submission
/// needs manual follow-up (see `SubmissionReport`).
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("API error ({0}): {1}")]
    Api(u16, String),
    #[error("parse error: {0}")]
    Parse(String),
}

/// Why `submit_invoice` returned without a created invoice.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Pre-flight validation failed; nothing was sent to the backend.
    #[error(transparent)]
    Validation(#[from] DomainError),

    /// The invoice-creation call itself failed; no notification or purchase
    /// order patch was attempted.
    #[error("invoice creation failed: {0}")]
    InvoiceCreate(#[source] ApiError),
}
