//! List view derivation: filtering and sorting over a record snapshot
//!
//! The engine is stateless — it takes the current record snapshot and
//! returns a new ordering. Filtering is a case-insensitive substring match
//! over client name, company name and the decimal rendering of the invoice
//! number. Sorting is a comparator keyed by [`SortField`], with
//! [`SortDirection::Descending`] inverting the comparator's sign.
//!
//! Dates use the fixed `DD.MM.YY` display format. Records missing a service
//! date sort after records that have one, in either direction.

use crate::core::amount::invoice_total;
use crate::core::InvoiceRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort key for the invoice list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    InvoiceNumber,
    ClientName,
    InvoiceDate,
    ServiceDate,
    ServiceDescription,
    TotalAmount,
    GenerationStatus,
}

/// Sort direction; descending inverts the comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Parse a `DD.MM.YY` display date.
fn parse_display_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%d.%m.%y").ok()
}

/// Whether `record` matches `query`, case-insensitively.
///
/// An empty query matches every record.
pub fn matches_query(record: &InvoiceRecord, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    record.client_name.to_lowercase().contains(&needle)
        || record.company_name.to_lowercase().contains(&needle)
        || record.invoice_number.to_string().contains(&needle)
}

/// Compare two optional dates with absent values last, in either direction.
///
/// Direction only applies between two present dates; a record without the
/// date always loses to one with it, regardless of direction.
fn compare_optional_dates(
    a: Option<NaiveDate>,
    b: Option<NaiveDate>,
    direction: SortDirection,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => direction.apply(a.cmp(&b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare(
    a: &InvoiceRecord,
    b: &InvoiceRecord,
    field: SortField,
    direction: SortDirection,
) -> Ordering {
    match field {
        SortField::InvoiceNumber => direction.apply(a.invoice_number.cmp(&b.invoice_number)),
        SortField::ClientName => {
            direction.apply(a.client_name.to_lowercase().cmp(&b.client_name.to_lowercase()))
        }
        SortField::InvoiceDate => compare_optional_dates(
            parse_display_date(&a.invoice_date),
            parse_display_date(&b.invoice_date),
            direction,
        ),
        SortField::ServiceDate => compare_optional_dates(
            a.service_date.as_deref().and_then(parse_display_date),
            b.service_date.as_deref().and_then(parse_display_date),
            direction,
        ),
        SortField::ServiceDescription => direction.apply(
            a.service_description
                .as_deref()
                .unwrap_or("")
                .cmp(b.service_description.as_deref().unwrap_or("")),
        ),
        SortField::TotalAmount => {
            direction.apply(invoice_total(a).total_cmp(&invoice_total(b)))
        }
        SortField::GenerationStatus => {
            direction.apply(a.has_artifact().cmp(&b.has_artifact()))
        }
    }
}

/// Derive the display view: filter by `query`, then sort.
///
/// The sort is stable, so records that compare equal keep their insertion
/// order from the store.
pub fn view(
    records: &[InvoiceRecord],
    query: &str,
    field: SortField,
    direction: SortDirection,
) -> Vec<InvoiceRecord> {
    let mut filtered: Vec<InvoiceRecord> = records
        .iter()
        .filter(|record| matches_query(record, query))
        .cloned()
        .collect();
    filtered.sort_by(|a, b| compare(a, b, field, direction));
    filtered
}
