//! Invoice submission and purchase order reconciliation over the back-office
//! REST API.
//!
//! The entry point is [`ReconciliationWorkflow::submit_invoice`]: validate a
//! draft against the PO's remaining balance, persist the invoice (multipart,
//! with an optional attached file), then concurrently emit an audit
//! notification and patch the PO's derived financial state. The three remote
//! writes are independent — there is no cross-service atomicity — so the
//! returned [`SubmissionReport`] records a per-step outcome instead of
//! pretending the submission either fully happened or didn't.

pub mod api;
pub mod config;
pub mod error;
pub mod workflow;

pub use api::{BackOffice, HttpBackOffice};
pub use config::ApiConfig;
pub use error::{ApiError, SubmitError};
pub use workflow::{ReconciliationWorkflow, SkipReason, StepOutcome, SubmissionReport};
