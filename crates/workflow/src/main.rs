//! List the invoices billed against a purchase order.

use anyhow::Context;

use potrack_workflow::{ApiConfig, BackOffice, HttpBackOffice};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    potrack_observability::init();

    let po_number = std::env::args()
        .nth(1)
        .context("usage: potrack <PO_NUMBER>")?;

    let api = HttpBackOffice::new(ApiConfig::from_env());
    let invoices = api
        .invoices_for_po(&po_number)
        .await
        .with_context(|| format!("listing invoices for {po_number}"))?;

    if invoices.is_empty() {
        println!("no invoices billed against {po_number}");
        return Ok(());
    }

    for invoice in &invoices {
        println!(
            "{}\t{}\t{}\tbilled {}\tdue {}",
            invoice.invoice_number,
            invoice.amount,
            invoice.status.as_str(),
            invoice.date_billed,
            invoice.due_date,
        );
    }

    Ok(())
}
