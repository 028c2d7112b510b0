//! Core module containing the domain types, error taxonomy and pure logic

pub mod amount;
pub mod error;
pub mod invoice;
pub mod query;

pub use amount::{invoice_total, service_hours, subtotal};
pub use error::{
    ConfigError, GenerationError, InvoxError, InvoxResult, NotFoundError, ParseError,
    StorageError, ValidationError,
};
pub use invoice::{InvoiceDraft, InvoiceRecord};
pub use query::{matches_query, view, SortDirection, SortField};
