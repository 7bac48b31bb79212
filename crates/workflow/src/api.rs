//! Back-office REST API client.
//!
//! [`BackOffice`] is the seam between the workflow and the network: the
//! workflow is written against the trait, `HttpBackOffice` is the production
//! implementation, and tests substitute an in-memory recording fake.
//!
//! The backend owns all persistence; requests carry no auth header.

use async_trait::async_trait;
use chrono::SecondsFormat;
use reqwest::multipart;

use potrack_core::PoId;
use potrack_invoicing::{Attachment, Invoice, NewInvoice, Notification};
use potrack_purchasing::{PoPatch, PurchaseOrder};

use crate::config::ApiConfig;
use crate::error::ApiError;

/// The consumed back-office endpoints.
#[async_trait]
pub trait BackOffice: Send + Sync {
    /// GET `/api/invoices/all`.
    async fn list_invoices(&self) -> Result<Vec<Invoice>, ApiError>;

    /// POST `/api/invoices/create` (multipart, optional file part).
    async fn create_invoice(
        &self,
        invoice: &NewInvoice,
        attachment: Option<&Attachment>,
    ) -> Result<Invoice, ApiError>;

    /// PUT `/api/po/update/{id}` — full replace.
    async fn replace_purchase_order(
        &self,
        po: &PurchaseOrder,
    ) -> Result<PurchaseOrder, ApiError>;

    /// PATCH `/api/po/update/{id}` — partial update.
    async fn patch_purchase_order(
        &self,
        id: &PoId,
        patch: &PoPatch,
    ) -> Result<PurchaseOrder, ApiError>;

    /// DELETE `/api/po/delete/{id}`.
    async fn delete_purchase_order(&self, id: &PoId) -> Result<(), ApiError>;

    /// POST `/api/notification/create`.
    async fn create_notification(
        &self,
        notification: &Notification,
    ) -> Result<Notification, ApiError>;

    /// Invoices billed against the given PO number.
    ///
    /// The backend has no filtered listing, so this fetches everything and
    /// filters on the denormalized `purchase_order_ref`.
    async fn invoices_for_po(&self, po_number: &str) -> Result<Vec<Invoice>, ApiError> {
        let invoices = self.list_invoices().await?;
        Ok(invoices
            .into_iter()
            .filter(|invoice| invoice.purchase_order_ref == po_number)
            .collect())
    }
}

/// `BackOffice` over HTTP.
///
/// Cheap to clone; the inner `reqwest::Client` is an `Arc` around a
/// connection pool.
#[derive(Debug, Clone)]
pub struct HttpBackOffice {
    client: reqwest::Client,
    config: ApiConfig,
}

impl HttpBackOffice {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn network_err(url: &str, err: reqwest::Error) -> ApiError {
        tracing::error!("request to {url} failed: {err}");
        ApiError::Network(err.to_string())
    }

    async fn ensure_success(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(ApiError::Api(status.as_u16(), body))
    }

    fn invoice_form(invoice: &NewInvoice, attachment: Option<&Attachment>) -> Result<multipart::Form, ApiError> {
        let mut form = multipart::Form::new()
            .text("purchaseOrderRef", invoice.purchase_order_ref.clone())
            .text("invoiceNumber", invoice.invoice_number.clone())
            .text("amount", invoice.amount.to_string())
            .text("dateBilled", invoice.date_billed.to_string())
            .text("dueDate", invoice.due_date.to_string())
            .text("status", invoice.status.as_str())
            .text(
                "createdAt",
                invoice.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            );

        if let Some(attachment) = attachment {
            let part = multipart::Part::bytes(attachment.bytes.clone())
                .file_name(attachment.file_name.clone())
                .mime_str(&attachment.content_type)
                .map_err(|e| ApiError::Parse(format!("attachment mime type: {e}")))?;
            form = form.part("file", part);
        }

        Ok(form)
    }
}

#[async_trait]
impl BackOffice for HttpBackOffice {
    async fn list_invoices(&self) -> Result<Vec<Invoice>, ApiError> {
        let url = self.config.url("/api/invoices/all");
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Self::network_err(&url, e))?;

        Self::ensure_success(resp)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn create_invoice(
        &self,
        invoice: &NewInvoice,
        attachment: Option<&Attachment>,
    ) -> Result<Invoice, ApiError> {
        let url = self.config.url("/api/invoices/create");
        let form = Self::invoice_form(invoice, attachment)?;

        let resp = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| Self::network_err(&url, e))?;

        Self::ensure_success(resp)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn replace_purchase_order(
        &self,
        po: &PurchaseOrder,
    ) -> Result<PurchaseOrder, ApiError> {
        let url = self.config.url(&format!("/api/po/update/{}", po.id));
        let resp = self
            .client
            .put(&url)
            .json(po)
            .send()
            .await
            .map_err(|e| Self::network_err(&url, e))?;

        Self::ensure_success(resp)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn patch_purchase_order(
        &self,
        id: &PoId,
        patch: &PoPatch,
    ) -> Result<PurchaseOrder, ApiError> {
        let url = self.config.url(&format!("/api/po/update/{id}"));
        let resp = self
            .client
            .patch(&url)
            .json(patch)
            .send()
            .await
            .map_err(|e| Self::network_err(&url, e))?;

        Self::ensure_success(resp)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn delete_purchase_order(&self, id: &PoId) -> Result<(), ApiError> {
        let url = self.config.url(&format!("/api/po/delete/{id}"));
        let resp = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| Self::network_err(&url, e))?;

        Self::ensure_success(resp).await?;
        Ok(())
    }

    async fn create_notification(
        &self,
        notification: &Notification,
    ) -> Result<Notification, ApiError> {
        let url = self.config.url("/api/notification/create");
        let resp = self
            .client
            .post(&url)
            .json(notification)
            .send()
            .await
            .map_err(|e| Self::network_err(&url, e))?;

        Self::ensure_success(resp)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}
