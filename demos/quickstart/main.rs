//! End-to-end walkthrough of the invox core: add records, derive a sorted
//! view, export/import, and (when a rendering service is running) generate
//! a document.
//!
//! Run with:
//! ```sh
//! cargo run --example quickstart
//! ```
//!
//! Generation talks to the endpoint configured under the `settings` key
//! (default `http://localhost:8000`); without a service listening there,
//! the demo prints the error it got and carries on.

use invox::codec::{export, import};
use invox::config::GeneratorConfig;
use invox::core::{view, InvoiceRecord, SortDirection, SortField};
use invox::generate::{DocumentClient, OutputFormat};
use invox::storage::InMemoryBackend;
use invox::store::RecordStore;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let backend = Arc::new(InMemoryBackend::new());
    let store = RecordStore::new(backend.clone());

    for (number, client, hours) in [
        (1002, "Mike Smith", "AI Consultancy 29.03.25 (2 hours)"),
        (1000, "Jane Doe", "Notes write up 29.03.25 (1 hour)"),
        (1001, "Ada Lovelace", "Workshop prep (1.5 hours)"),
    ] {
        store
            .add(InvoiceRecord {
                client_name: client.to_string(),
                company_name: "Fizzbuzz Consulting Ltd".to_string(),
                invoice_number: number,
                invoice_date: "21.04.25".to_string(),
                hourly_rate: 300.0,
                services: vec![hours.to_string()],
                ..Default::default()
            })
            .await?;
    }

    let records = store.list().await?;
    println!("--- sorted by invoice number ---");
    for record in view(&records, "", SortField::InvoiceNumber, SortDirection::Ascending) {
        println!(
            "#{} {} — £{:.2}",
            record.invoice_number,
            record.client_name,
            invox::core::invoice_total(&record)
        );
    }

    let first = &records[0];
    let yaml = export(first)?;
    println!("--- exported #{} ---\n{}", first.invoice_number, yaml);

    let reimported = import(&yaml)?.into_record();
    let readded = store.add(reimported).await?;
    println!("re-imported as {}", readded.id);

    let config = GeneratorConfig::load(backend.as_ref()).await?;
    let client = DocumentClient::new(config);
    match client.generate(first, store.assets(), OutputFormat::Pdf).await {
        Ok(artifact) => {
            let reference = client
                .store_artifact(backend.as_ref(), first, &artifact)
                .await?;
            let mut updated = first.clone();
            updated.artifact_ref = Some(reference.clone());
            store.update(updated).await?;
            println!("generated {} ({} bytes)", reference, artifact.bytes.len());
        }
        Err(err) => println!("generation skipped: {}", err),
    }

    Ok(())
}
