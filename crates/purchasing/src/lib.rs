//! Purchasing domain module (Purchase Orders).
//!
//! This crate contains the purchase order read model and the financial
//! derivation applied when an invoice against a PO is paid, implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage).

pub mod order;

pub use order::{BillingMode, PoPatch, PoStatus, PurchaseOrder};
