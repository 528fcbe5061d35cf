//! Section extractors.
//!
//! Each extractor is a pure function over the parsed tree and the engine
//! configuration, total over missing elements: absence yields defaults or
//! `None`, never an error. No extractor depends on another's output.

pub mod concepts;
pub mod general;
pub mod parties;
pub mod payments;
pub mod stamp;

pub use concepts::{extract_line_items, extract_taxes};
pub use general::{extract_general, translate_tipo_comprobante};
pub use parties::{extract_issuer, extract_recipient};
pub use payments::extract_complements;
pub use stamp::extract_stamp;
