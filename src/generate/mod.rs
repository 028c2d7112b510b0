//! Document generation against the external rendering service
//!
//! The service renders an invoice as DOCX or PDF from one JSON payload
//! carrying every record field plus the resolved logo bytes. The two output
//! formats — and the PDF conversion backend variant — are modeled as enums
//! and travel as query parameters; the endpoint URL itself never changes
//! shape.
//!
//! # Contract
//!
//! `POST {base_url}/generate-invoice?format=pdf|docx[&pdf_backend=...]`
//! answers with the binary document on 2xx, or an error body otherwise.
//! A failed attempt surfaces as [`GenerationError`]; nothing here retries.
//!
//! [`GenerationError`]: crate::core::GenerationError

pub mod client;

pub use client::DocumentClient;

use crate::core::InvoiceRecord;
use serde::{Deserialize, Serialize};

/// Output format of a generated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Pdf,
    Docx,
}

impl OutputFormat {
    /// The query-parameter value the rendering service expects.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Docx => "docx",
        }
    }

    /// File extension, without the dot.
    pub fn extension(&self) -> &'static str {
        self.as_str()
    }

    /// MIME type of the generated document.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "application/pdf",
            OutputFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

/// A generated document as returned by the rendering service.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub format: OutputFormat,
    pub bytes: Vec<u8>,
}

impl Artifact {
    /// Download file name for this artifact, matching the service's own
    /// naming (`invoice_{number}.{ext}`).
    pub fn file_name(&self, invoice_number: i64) -> String {
        format!("invoice_{}.{}", invoice_number, self.format.extension())
    }
}

/// The JSON payload the rendering service accepts.
///
/// All numeric fields are strict JSON numbers; the logo travels as an
/// embedded base64 string.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub client_name: String,
    pub client_address: String,
    pub services: Vec<String>,
    pub payment_terms_days: i64,
    pub invoice_number: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_date: Option<String>,
    pub company_name: String,
    pub hourly_rate: f64,
    pub vat_rate: f64,
    pub account_number: String,
    pub sort_code: String,
    pub bank_address: String,
    pub company_number: String,
    pub vat_number: String,
    pub registered_address: String,
    pub email: String,
    pub contact_number: String,
    pub column_widths: [f64; 2],
    pub font_name: String,
    pub icon_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_data: Option<String>,
}

impl GenerateRequest {
    /// Build the payload from a record and its resolved logo bytes.
    pub fn from_record(record: &InvoiceRecord, icon_data: Option<String>) -> Self {
        Self {
            client_name: record.client_name.clone(),
            client_address: record.client_address.clone(),
            services: record.services.clone(),
            payment_terms_days: record.payment_terms_days,
            invoice_number: record.invoice_number,
            invoice_date: (!record.invoice_date.is_empty())
                .then(|| record.invoice_date.clone()),
            company_name: record.company_name.clone(),
            hourly_rate: record.hourly_rate,
            vat_rate: record.vat_rate,
            account_number: record.account_number.clone(),
            sort_code: record.sort_code.clone(),
            bank_address: record.bank_address.clone(),
            company_number: record.company_number.clone(),
            vat_number: record.vat_number.clone(),
            registered_address: record.registered_address.clone(),
            email: record.email.clone(),
            contact_number: record.contact_number.clone(),
            column_widths: record.column_widths,
            font_name: record.font_name.clone(),
            icon_name: record.icon_name.clone(),
            icon_data,
        }
    }
}
