use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use potrack_core::InvoiceId;
use potrack_purchasing::PurchaseOrder;

/// Payment status of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Unpaid,
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            InvoiceStatus::Unpaid => "Unpaid",
            InvoiceStatus::Paid => "Paid",
        }
    }
}

/// Invoice read model, as served by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: InvoiceId,
    /// User-supplied reference, expected unique per PO (not enforced here).
    pub invoice_number: String,
    /// Denormalized reference to `PurchaseOrder::po_number`, not its id.
    pub purchase_order_ref: String,
    pub amount: Decimal,
    pub date_billed: NaiveDate,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
    pub created_at: DateTime<Utc>,
}

/// The invoice fields a user fills in before submission.
///
/// `purchase_order_ref` is pinned to the selected PO at construction
/// ([`InvoiceDraft::for_po`]) and not otherwise editable, matching the locked
/// reference field of the original entry form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDraft {
    pub purchase_order_ref: String,
    pub invoice_number: String,
    pub amount: Decimal,
    pub date_billed: NaiveDate,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
}

impl InvoiceDraft {
    /// Start a draft billed against the given purchase order.
    pub fn for_po(
        po: &PurchaseOrder,
        invoice_number: impl Into<String>,
        amount: Decimal,
        date_billed: NaiveDate,
        due_date: NaiveDate,
        status: InvoiceStatus,
    ) -> Self {
        Self {
            purchase_order_ref: po.po_number.clone(),
            invoice_number: invoice_number.into(),
            amount,
            date_billed,
            due_date,
            status,
        }
    }

    /// Stamp the draft with its submission time, producing the payload sent to
    /// the invoice-creation endpoint.
    pub fn stamped(self, created_at: DateTime<Utc>) -> NewInvoice {
        NewInvoice {
            purchase_order_ref: self.purchase_order_ref,
            invoice_number: self.invoice_number,
            amount: self.amount,
            date_billed: self.date_billed,
            due_date: self.due_date,
            status: self.status,
            created_at,
        }
    }
}

/// A draft stamped with its submission time, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvoice {
    pub purchase_order_ref: String,
    pub invoice_number: String,
    pub amount: Decimal,
    pub date_billed: NaiveDate,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
    pub created_at: DateTime<Utc>,
}

/// A file attached to an invoice. Stored opaquely by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use potrack_core::PoId;
    use potrack_purchasing::{BillingMode, PoStatus};
    use rust_decimal_macros::dec;

    fn test_po() -> PurchaseOrder {
        PurchaseOrder {
            id: PoId::new("po-9"),
            po_number: "PO-2024-009".to_string(),
            client_name: "Globex".to_string(),
            billing: BillingMode::TimeAndSpend,
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 2, 28).unwrap(),
            milestone: dec!(0),
            total_value: dec!(5000),
            bal_value: dec!(5000),
            status: PoStatus::Open,
        }
    }

    #[test]
    fn draft_is_pinned_to_the_selected_po() {
        let draft = InvoiceDraft::for_po(
            &test_po(),
            "INV-001",
            dec!(1200),
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            InvoiceStatus::Unpaid,
        );

        assert_eq!(draft.purchase_order_ref, "PO-2024-009");
        assert_eq!(draft.invoice_number, "INV-001");
    }

    #[test]
    fn stamping_preserves_the_draft_fields() {
        let draft = InvoiceDraft::for_po(
            &test_po(),
            "INV-002",
            dec!(300),
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            InvoiceStatus::Paid,
        );

        let created_at = Utc::now();
        let invoice = draft.clone().stamped(created_at);
        assert_eq!(invoice.invoice_number, draft.invoice_number);
        assert_eq!(invoice.amount, draft.amount);
        assert_eq!(invoice.status, draft.status);
        assert_eq!(invoice.created_at, created_at);
    }

    #[test]
    fn invoice_wire_format_uses_camel_case() {
        let invoice = Invoice {
            id: InvoiceId::new("inv-1"),
            invoice_number: "INV-003".to_string(),
            purchase_order_ref: "PO-2024-009".to_string(),
            amount: dec!(300),
            date_billed: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            status: InvoiceStatus::Unpaid,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&invoice).unwrap();
        assert_eq!(json["invoiceNumber"], "INV-003");
        assert_eq!(json["purchaseOrderRef"], "PO-2024-009");
        assert_eq!(json["status"], "Unpaid");
        assert_eq!(json["dateBilled"], "2024-04-01");
    }
}
