//! `potrack-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod actor;
pub mod error;
pub mod id;

pub use actor::Actor;
pub use error::{DomainError, DomainResult};
pub use id::{InvoiceId, PoId};
