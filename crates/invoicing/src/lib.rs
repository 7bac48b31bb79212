//! Invoicing domain module.
//!
//! This crate contains the invoice read model, the draft a user fills in when
//! billing against a purchase order, file attachments, and the audit
//! notification emitted on creation. Pure data and deterministic logic only —
//! no IO, no HTTP, no storage.

pub mod invoice;
pub mod notification;

pub use invoice::{Attachment, Invoice, InvoiceDraft, InvoiceStatus, NewInvoice};
pub use notification::Notification;
