//! Service-line amount computation
//!
//! Service lines carry their hour count as free text, e.g.
//! `"AI Consultancy 29.03.25 (2 hours)"`. Extraction is a tolerant
//! two-branch rule: a `"(<n> hour)"`/`"(<n> hours)"` pattern yields the
//! parsed count, anything else counts as exactly one hour. Malformed lines
//! never fail — they just fall back.

use crate::core::InvoiceRecord;
use regex::Regex;
use std::sync::OnceLock;

/// Hours extracted from a single service line.
///
/// ```
/// use invox::core::service_hours;
///
/// assert_eq!(service_hours("Consulting (2 hours)"), 2.0);
/// assert_eq!(service_hours("Pair programming (1.5 hours)"), 1.5);
/// assert_eq!(service_hours("Review"), 1.0);
/// ```
pub fn service_hours(line: &str) -> f64 {
    static HOURS_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = HOURS_REGEX.get_or_init(|| {
        Regex::new(r"\((\d+(?:\.\d+)?)\s*hours?\)").unwrap()
    });

    regex
        .captures(line)
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .unwrap_or(1.0)
}

/// Pre-VAT total: the sum of every line's hours times the hourly rate.
pub fn subtotal(record: &InvoiceRecord) -> f64 {
    let hours: f64 = record.services.iter().map(|line| service_hours(line)).sum();
    hours * record.hourly_rate
}

/// Amount due including VAT.
pub fn invoice_total(record: &InvoiceRecord) -> f64 {
    subtotal(record) * (1.0 + record.vat_rate / 100.0)
}
