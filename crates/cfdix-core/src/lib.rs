//! Core library for CFDI (Mexican electronic invoice) extraction.
//!
//! This crate provides:
//! - Loading and parsing of CFDI XML documents (versions 3.3 and 4.0)
//! - Namespace-tolerant element lookup with generation fallback
//! - Section extractors for header data, parties, line items, fiscal stamp
//!   and complements (payments 1.0/2.0)
//! - A normalized, version-independent record model for downstream reporting

pub mod cfdi;
pub mod error;
pub mod models;

pub use error::{LoadError, Result};
pub use models::config::{CfdiConfig, FieldDefaults, NamespaceTable};
pub use models::record::{
    CfdiRecord, Complements, FiscalStamp, GeneralData, Issuer, LineItem, Payment, Recipient,
    RelatedDocument, TaxEntry, TaxInfo,
};

pub use cfdi::{CfdiExtractor, detect_version};
