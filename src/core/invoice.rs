//! Invoice record types
//!
//! [`InvoiceRecord`] is the persisted unit: one invoice's full data, with a
//! store-assigned immutable id. [`InvoiceDraft`] is its loosely-typed twin —
//! every field optional — produced by the import codec and turned into a
//! well-typed record by an explicit, field-by-field defaulting function.
//!
//! Inline image data (`icon_data`) is transient: it exists only between
//! import/edit time and the next store write, where it is converted into a
//! content-hash reference (`icon_hash`) and stripped.

use serde::{Deserialize, Serialize};

/// Default VAT percentage applied when an import omits the field.
pub const DEFAULT_VAT_RATE: f64 = 20.0;

/// Default document column widths in inches, `[left, right]`.
pub const DEFAULT_COLUMN_WIDTHS: [f64; 2] = [2.5, 3.5];

/// Default document font.
pub const DEFAULT_FONT_NAME: &str = "Calibri";

/// Default payment terms in days.
pub const DEFAULT_PAYMENT_TERMS_DAYS: i64 = 30;

/// One invoice's full data as held by the record store.
///
/// The `id` is assigned once by [`RecordStore::add`] and never changes.
/// Optional fields are omitted from the persisted JSON when unset.
///
/// [`RecordStore::add`]: crate::store::RecordStore::add
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Opaque store-unique identifier. Empty until the record is added.
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub client_address: String,
    #[serde(default)]
    pub company_name: String,

    /// Service lines, e.g. `"AI Consultancy 29.03.25 (2 hours)"`.
    #[serde(default)]
    pub services: Vec<String>,

    /// Header table column widths in inches, `[left, right]`.
    #[serde(default = "default_column_widths")]
    pub column_widths: [f64; 2],

    #[serde(default)]
    pub hourly_rate: f64,
    #[serde(default = "default_vat_rate")]
    pub vat_rate: f64,
    #[serde(default)]
    pub invoice_number: i64,

    /// Invoice date in `DD.MM.YY` form.
    #[serde(default)]
    pub invoice_date: String,

    #[serde(default = "default_payment_terms_days")]
    pub payment_terms_days: i64,

    #[serde(default)]
    pub account_number: String,
    #[serde(default)]
    pub sort_code: String,
    #[serde(default)]
    pub bank_address: String,
    #[serde(default)]
    pub company_number: String,
    #[serde(default)]
    pub vat_number: String,
    #[serde(default)]
    pub registered_address: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub contact_number: String,

    #[serde(default = "default_font_name")]
    pub font_name: String,

    /// Display name of the logo file, carried for the rendering service.
    #[serde(default)]
    pub icon_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid: Option<bool>,

    /// Locator of the last generated document, overwritten on regeneration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_ref: Option<String>,

    /// Content hash of the stored logo asset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_hash: Option<String>,

    /// Transient base64 image payload. Must never reach the persisted
    /// collection: the record store resolves it to `icon_hash` on write.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_data: Option<String>,
}

fn default_column_widths() -> [f64; 2] {
    DEFAULT_COLUMN_WIDTHS
}

fn default_vat_rate() -> f64 {
    DEFAULT_VAT_RATE
}

fn default_font_name() -> String {
    DEFAULT_FONT_NAME.to_string()
}

fn default_payment_terms_days() -> i64 {
    DEFAULT_PAYMENT_TERMS_DAYS
}

impl Default for InvoiceRecord {
    fn default() -> Self {
        Self {
            id: String::new(),
            client_name: String::new(),
            client_address: String::new(),
            company_name: String::new(),
            services: Vec::new(),
            column_widths: DEFAULT_COLUMN_WIDTHS,
            hourly_rate: 0.0,
            vat_rate: DEFAULT_VAT_RATE,
            invoice_number: 0,
            invoice_date: String::new(),
            payment_terms_days: DEFAULT_PAYMENT_TERMS_DAYS,
            account_number: String::new(),
            sort_code: String::new(),
            bank_address: String::new(),
            company_number: String::new(),
            vat_number: String::new(),
            registered_address: String::new(),
            email: String::new(),
            contact_number: String::new(),
            font_name: DEFAULT_FONT_NAME.to_string(),
            icon_name: String::new(),
            service_date: None,
            service_description: None,
            paid: None,
            artifact_ref: None,
            icon_hash: None,
            icon_data: None,
        }
    }
}

impl InvoiceRecord {
    /// Whether a generated document is attached to this record.
    pub fn has_artifact(&self) -> bool {
        self.artifact_ref.is_some()
    }
}

/// A partial invoice as reconstructed from import text.
///
/// Every field is optional on input; [`InvoiceDraft::into_record`] is the
/// single place where absent or uncoercible values become their documented
/// defaults. Identity is never part of a draft — the store assigns it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvoiceDraft {
    pub client_name: Option<String>,
    pub client_address: Option<String>,
    pub company_name: Option<String>,
    pub services: Option<Vec<String>>,
    pub column_widths: Option<[f64; 2]>,
    pub hourly_rate: Option<f64>,
    pub vat_rate: Option<f64>,
    pub invoice_number: Option<i64>,
    pub invoice_date: Option<String>,
    pub payment_terms_days: Option<i64>,
    pub account_number: Option<String>,
    pub sort_code: Option<String>,
    pub bank_address: Option<String>,
    pub company_number: Option<String>,
    pub vat_number: Option<String>,
    pub registered_address: Option<String>,
    pub email: Option<String>,
    pub contact_number: Option<String>,
    pub font_name: Option<String>,
    pub icon_name: Option<String>,
    pub service_date: Option<String>,
    pub service_description: Option<String>,
    pub paid: Option<bool>,
    pub icon_hash: Option<String>,
    pub icon_data: Option<String>,
}

impl InvoiceDraft {
    /// Apply the documented default for every absent field and produce a
    /// well-typed record with an empty id, ready for [`RecordStore::add`].
    ///
    /// [`RecordStore::add`]: crate::store::RecordStore::add
    pub fn into_record(self) -> InvoiceRecord {
        InvoiceRecord {
            id: String::new(),
            client_name: self.client_name.unwrap_or_default(),
            client_address: self.client_address.unwrap_or_default(),
            company_name: self.company_name.unwrap_or_default(),
            services: self.services.unwrap_or_default(),
            column_widths: self.column_widths.unwrap_or(DEFAULT_COLUMN_WIDTHS),
            hourly_rate: self.hourly_rate.unwrap_or(0.0),
            vat_rate: self.vat_rate.unwrap_or(DEFAULT_VAT_RATE),
            invoice_number: self.invoice_number.unwrap_or(0),
            invoice_date: self.invoice_date.unwrap_or_default(),
            payment_terms_days: self.payment_terms_days.unwrap_or(DEFAULT_PAYMENT_TERMS_DAYS),
            account_number: self.account_number.unwrap_or_default(),
            sort_code: self.sort_code.unwrap_or_default(),
            bank_address: self.bank_address.unwrap_or_default(),
            company_number: self.company_number.unwrap_or_default(),
            vat_number: self.vat_number.unwrap_or_default(),
            registered_address: self.registered_address.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            contact_number: self.contact_number.unwrap_or_default(),
            font_name: self.font_name.unwrap_or_else(|| DEFAULT_FONT_NAME.to_string()),
            icon_name: self.icon_name.unwrap_or_default(),
            service_date: self.service_date,
            service_description: self.service_description,
            paid: self.paid,
            artifact_ref: None,
            icon_hash: self.icon_hash,
            icon_data: self.icon_data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_draft_gets_documented_defaults() {
        let record = InvoiceDraft::default().into_record();

        assert_eq!(record.id, "");
        assert_eq!(record.vat_rate, DEFAULT_VAT_RATE);
        assert_eq!(record.column_widths, DEFAULT_COLUMN_WIDTHS);
        assert_eq!(record.font_name, DEFAULT_FONT_NAME);
        assert_eq!(record.payment_terms_days, DEFAULT_PAYMENT_TERMS_DAYS);
        assert_eq!(record.hourly_rate, 0.0);
        assert_eq!(record.invoice_number, 0);
        assert!(record.services.is_empty());
        assert!(record.paid.is_none());
        assert!(record.artifact_ref.is_none());
    }

    #[test]
    fn test_draft_values_win_over_defaults() {
        let draft = InvoiceDraft {
            client_name: Some("Mike Smith".to_string()),
            vat_rate: Some(5.0),
            invoice_number: Some(1008),
            ..Default::default()
        };
        let record = draft.into_record();

        assert_eq!(record.client_name, "Mike Smith");
        assert_eq!(record.vat_rate, 5.0);
        assert_eq!(record.invoice_number, 1008);
    }

    #[test]
    fn test_persisted_json_omits_unset_optionals() {
        let record = InvoiceRecord::default();
        let json = serde_json::to_string(&record).unwrap();

        assert!(!json.contains("icon_data"));
        assert!(!json.contains("artifact_ref"));
        assert!(!json.contains("paid"));
    }

    #[test]
    fn test_persisted_json_tolerates_missing_fields() {
        let record: InvoiceRecord =
            serde_json::from_str(r#"{"client_name": "Acme"}"#).unwrap();

        assert_eq!(record.client_name, "Acme");
        assert_eq!(record.vat_rate, DEFAULT_VAT_RATE);
        assert_eq!(record.font_name, DEFAULT_FONT_NAME);
    }

    #[test]
    fn test_has_artifact() {
        let mut record = InvoiceRecord::default();
        assert!(!record.has_artifact());
        record.artifact_ref = Some("artifact/invoice_1008.pdf".to_string());
        assert!(record.has_artifact());
    }
}
