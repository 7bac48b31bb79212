use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use potrack_core::Actor;

/// Audit notification recorded when an invoice is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub message: String,
    pub user_role: String,
}

impl Notification {
    /// Notification for a freshly created invoice.
    ///
    /// The date is rendered day-first (en-GB), as the audit trail has always
    /// shown it.
    pub fn invoice_created(invoice_number: &str, actor: &Actor, on: DateTime<Utc>) -> Self {
        Self {
            message: format!(
                "New Invoice {} created by {} on {}",
                invoice_number,
                actor.username,
                on.format("%d/%m/%Y"),
            ),
            user_role: actor.role.clone(),
        }
    }
}
