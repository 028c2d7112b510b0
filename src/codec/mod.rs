//! YAML import/export of invoice field-sets
//!
//! Export serializes the full record — including any transient inline image
//! data — into a human-editable YAML mapping. Identity and the generated
//! artifact locator are intentionally excluded: they belong to the store
//! and the rendering service, not the interchange format.
//!
//! Import is the tolerant inverse: every recognized field is optional and
//! may arrive wrong-typed (numbers as strings and vice versa); each is
//! coerced where possible and otherwise left for the defaulting function.
//! Unrecognized keys are ignored. The only hard failure is text that is
//! not a YAML mapping at all, surfaced as [`ParseError`] with the reason.
//!
//! Round-trip law: `import(export(r))` reproduces every persisted field of
//! `r` except `id` and `artifact_ref`.
//!
//! [`ParseError`]: crate::core::ParseError

use crate::core::{InvoiceDraft, InvoiceRecord, InvoxResult, ParseError};
use serde_yaml::{Mapping, Value};

/// Serialize `record` to the interchange YAML document.
pub fn export(record: &InvoiceRecord) -> InvoxResult<String> {
    let mut value = serde_yaml::to_value(record).map_err(|err| ParseError::InvalidDocument {
        message: err.to_string(),
    })?;

    // shift_remove keeps the remaining keys in declaration order.
    if let Value::Mapping(mapping) = &mut value {
        mapping.shift_remove("id");
        mapping.shift_remove("artifact_ref");
    }

    serde_yaml::to_string(&value).map_err(|err| {
        ParseError::InvalidDocument {
            message: err.to_string(),
        }
        .into()
    })
}

/// Parse interchange text into a partial record.
///
/// Fails only when `text` is not parseable YAML or not a mapping; absent
/// and wrong-typed fields are simply left unset on the draft.
pub fn import(text: &str) -> InvoxResult<InvoiceDraft> {
    let value: Value = serde_yaml::from_str(text).map_err(|err| ParseError::InvalidDocument {
        message: err.to_string(),
    })?;

    let Value::Mapping(mapping) = value else {
        return Err(ParseError::NotAMapping.into());
    };

    Ok(draft_from_mapping(&mapping))
}

fn draft_from_mapping(mapping: &Mapping) -> InvoiceDraft {
    let field = |name: &str| mapping.get(name);

    InvoiceDraft {
        client_name: field("client_name").and_then(as_string),
        client_address: field("client_address").and_then(as_string),
        company_name: field("company_name").and_then(as_string),
        services: field("services").and_then(as_string_seq),
        column_widths: field("column_widths").and_then(as_widths),
        hourly_rate: field("hourly_rate").and_then(as_f64),
        vat_rate: field("vat_rate").and_then(as_f64),
        invoice_number: field("invoice_number").and_then(as_i64),
        invoice_date: field("invoice_date").and_then(as_string),
        payment_terms_days: field("payment_terms_days").and_then(as_i64),
        account_number: field("account_number").and_then(as_string),
        sort_code: field("sort_code").and_then(as_string),
        bank_address: field("bank_address").and_then(as_string),
        company_number: field("company_number").and_then(as_string),
        vat_number: field("vat_number").and_then(as_string),
        registered_address: field("registered_address").and_then(as_string),
        email: field("email").and_then(as_string),
        contact_number: field("contact_number").and_then(as_string),
        font_name: field("font_name").and_then(as_string),
        icon_name: field("icon_name").and_then(as_string),
        service_date: field("service_date").and_then(as_string),
        service_description: field("service_description").and_then(as_string),
        paid: field("paid").and_then(Value::as_bool),
        icon_hash: field("icon_hash").and_then(as_string),
        icon_data: field("icon_data").and_then(as_string),
    }
}

// ---------------------------------------------------------------------------
// Tolerant scalar coercion
// ---------------------------------------------------------------------------

fn as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        // Account numbers and sort codes are regularly typed unquoted.
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().map(|f| f as i64))
        }
        _ => None,
    }
}

fn as_string_seq(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Sequence(items) => Some(items.iter().filter_map(as_string).collect()),
        _ => None,
    }
}

fn as_widths(value: &Value) -> Option<[f64; 2]> {
    match value {
        Value::Sequence(items) => {
            let widths: Vec<f64> = items.iter().filter_map(as_f64).collect();
            (widths.len() >= 2).then(|| [widths[0], widths[1]])
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_record() -> InvoiceRecord {
        InvoiceRecord {
            id: "store-assigned".to_string(),
            client_name: "Mike Smith".to_string(),
            client_address: "17 Poland St.\nLondon\nW1 1ZZ\nU.K.".to_string(),
            company_name: "Fizzbuzz Consulting Ltd".to_string(),
            services: vec![
                "AI Consultancy 29.03.25 (1 hour)".to_string(),
                "Notes write up 29.03.25 (1 hour)".to_string(),
            ],
            column_widths: [2.5, 3.5],
            hourly_rate: 300.0,
            vat_rate: 20.0,
            invoice_number: 1008,
            invoice_date: "21.04.25".to_string(),
            payment_terms_days: 30,
            account_number: "12345678".to_string(),
            sort_code: "12-34-56".to_string(),
            bank_address: "123 Bank St, London, UK".to_string(),
            company_number: "12345678".to_string(),
            vat_number: "GB123456789".to_string(),
            registered_address: "123 Business St, London, UK".to_string(),
            email: "contact@fizzbuzz.co.uk".to_string(),
            contact_number: "07700 900123".to_string(),
            font_name: "Calibri".to_string(),
            icon_name: "FizzbuzzConsultingIcon.png".to_string(),
            service_date: Some("29.03.25".to_string()),
            service_description: Some("March consultancy".to_string()),
            paid: Some(false),
            artifact_ref: Some("artifact/invoice_1008.pdf".to_string()),
            icon_hash: Some("ab12cd34".to_string()),
            icon_data: None,
        }
    }

    #[test]
    fn test_roundtrip_reproduces_persisted_fields() {
        let original = full_record();
        let text = export(&original).unwrap();
        let restored = import(&text).unwrap().into_record();

        let mut expected = original.clone();
        expected.id = String::new();
        expected.artifact_ref = None;
        assert_eq!(restored, expected);
    }

    #[test]
    fn test_export_excludes_id_and_artifact() {
        let text = export(&full_record()).unwrap();
        assert!(!text.contains("store-assigned"));
        assert!(!text.contains("artifact_ref"));
        assert!(text.contains("client_name"));
    }

    #[test]
    fn test_export_includes_transient_image_data() {
        let mut record = full_record();
        record.icon_data = Some("aGVsbG8=".to_string());
        let text = export(&record).unwrap();
        assert!(text.contains("icon_data"));
        assert!(text.contains("aGVsbG8="));
    }

    #[test]
    fn test_import_applies_defaults_for_missing_fields() {
        let record = import("client_name: Acme\n").unwrap().into_record();
        assert_eq!(record.client_name, "Acme");
        assert_eq!(record.vat_rate, 20.0);
        assert_eq!(record.font_name, "Calibri");
        assert_eq!(record.column_widths, [2.5, 3.5]);
    }

    #[test]
    fn test_import_ignores_unknown_keys() {
        let draft = import("client_name: Acme\nnot_a_field: 12\n").unwrap();
        assert_eq!(draft.client_name.as_deref(), Some("Acme"));
    }

    #[test]
    fn test_import_coerces_wrong_typed_scalars() {
        let text = "hourly_rate: \"300\"\ninvoice_number: \"1008\"\naccount_number: 12345678\n";
        let draft = import(text).unwrap();
        assert_eq!(draft.hourly_rate, Some(300.0));
        assert_eq!(draft.invoice_number, Some(1008));
        assert_eq!(draft.account_number.as_deref(), Some("12345678"));
    }

    #[test]
    fn test_import_defaults_uncoercible_numbers() {
        let record = import("hourly_rate: [not, a, number]\nvat_rate: lots\n")
            .unwrap()
            .into_record();
        assert_eq!(record.hourly_rate, 0.0);
        assert_eq!(record.vat_rate, 20.0);
    }

    #[test]
    fn test_import_fails_on_invalid_yaml() {
        let err = import("client_name: [unclosed").unwrap_err();
        assert_eq!(err.error_code(), "PARSE_ERROR");
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn test_import_fails_on_non_mapping() {
        let err = import("- just\n- a\n- list\n").unwrap_err();
        assert_eq!(err.error_code(), "PARSE_ERROR");
        assert!(err.to_string().contains("mapping"));
    }
}
