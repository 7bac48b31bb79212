//! The invoice-creation-and-PO-reconciliation workflow.

use chrono::Utc;
use uuid::Uuid;

use potrack_core::{Actor, DomainError};
use potrack_invoicing::{Attachment, Invoice, InvoiceDraft, InvoiceStatus, Notification};
use potrack_purchasing::PurchaseOrder;

use crate::api::BackOffice;
use crate::error::{ApiError, SubmitError};

/// Outcome of one follow-up step of a submission.
#[derive(Debug, Clone)]
pub enum StepOutcome<T> {
    Completed(T),
    Failed(ApiError),
    Skipped(SkipReason),
}

impl<T> StepOutcome<T> {
    pub fn is_completed(&self) -> bool {
        matches!(self, StepOutcome::Completed(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, StepOutcome::Failed(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, StepOutcome::Skipped(_))
    }

    pub fn completed(&self) -> Option<&T> {
        match self {
            StepOutcome::Completed(value) => Some(value),
            _ => None,
        }
    }
}

/// Why a follow-up step was not attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Only paid invoices move the purchase order's balance.
    InvoiceNotPaid,
    /// The amount cannot be reconciled against the purchase order.
    InvalidAmount,
}

/// What happened to one invoice submission, step by step.
///
/// The invoice itself is always present — a failed creation surfaces as
/// [`SubmitError`] instead — but the notification and the purchase order
/// patch are independent remote writes that may have failed or been skipped.
/// Nothing is rolled back or retried; callers inspect the outcomes.
#[derive(Debug)]
pub struct SubmissionReport {
    /// Correlates the log lines of this submission.
    pub submission_id: Uuid,
    /// The invoice as persisted by the backend.
    pub invoice: Invoice,
    pub notification: StepOutcome<Notification>,
    pub po_patch: StepOutcome<PurchaseOrder>,
}

/// Coordinates invoice creation, audit notification, and purchase order
/// reconciliation against the back-office API.
#[derive(Debug, Clone)]
pub struct ReconciliationWorkflow<B> {
    api: B,
}

impl<B: BackOffice> ReconciliationWorkflow<B> {
    pub fn new(api: B) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &B {
        &self.api
    }

    /// Submit a drafted invoice billed against `selected_po`.
    ///
    /// Validation happens before any network call: an amount above the PO's
    /// remaining balance is rejected outright. On success the draft is
    /// stamped with the submission time and persisted; the audit notification
    /// and (for paid invoices) the derived PO patch are then issued
    /// concurrently, their completion order unspecified relative to each
    /// other. If invoice creation fails, neither follow-up is attempted.
    pub async fn submit_invoice(
        &self,
        draft: InvoiceDraft,
        attachment: Option<&Attachment>,
        selected_po: &PurchaseOrder,
        actor: &Actor,
    ) -> Result<SubmissionReport, SubmitError> {
        if draft.amount > selected_po.bal_value {
            return Err(DomainError::validation(
                "amount cannot exceed the balance value of the selected purchase order",
            )
            .into());
        }

        let submission_id = Uuid::now_v7();
        let invoice = draft.stamped(Utc::now());

        tracing::info!(
            %submission_id,
            invoice_number = %invoice.invoice_number,
            po_number = %selected_po.po_number,
            amount = %invoice.amount,
            "submitting invoice"
        );

        let created = self
            .api
            .create_invoice(&invoice, attachment)
            .await
            .map_err(|err| {
                tracing::error!(%submission_id, %err, "error creating invoice");
                SubmitError::InvoiceCreate(err)
            })?;

        let notification =
            Notification::invoice_created(&invoice.invoice_number, actor, invoice.created_at);

        let notify = async {
            match self.api.create_notification(&notification).await {
                Ok(ack) => {
                    tracing::info!(%submission_id, "notification created");
                    StepOutcome::Completed(ack)
                }
                Err(err) => {
                    tracing::error!(%submission_id, %err, "error creating notification");
                    StepOutcome::Failed(err)
                }
            }
        };

        let reconcile = async {
            if invoice.status != InvoiceStatus::Paid {
                return StepOutcome::Skipped(SkipReason::InvoiceNotPaid);
            }
            let patch = match selected_po.apply_payment(invoice.amount) {
                Ok(patch) => patch,
                Err(err) => {
                    tracing::warn!(%submission_id, %err, "skipping purchase order patch");
                    return StepOutcome::Skipped(SkipReason::InvalidAmount);
                }
            };
            match self.api.patch_purchase_order(&selected_po.id, &patch).await {
                Ok(updated) => {
                    tracing::info!(
                        %submission_id,
                        bal_value = %patch.bal_value,
                        completed = patch.completes_po(),
                        "purchase order updated"
                    );
                    StepOutcome::Completed(updated)
                }
                Err(err) => {
                    tracing::error!(%submission_id, %err, "error updating purchase order");
                    StepOutcome::Failed(err)
                }
            }
        };

        let (notification, po_patch) = tokio::join!(notify, reconcile);

        Ok(SubmissionReport {
            submission_id,
            invoice: created,
            notification,
            po_patch,
        })
    }
}
