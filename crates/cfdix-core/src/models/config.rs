//! Configuration for the extraction engine.
//!
//! Two concerns live here: the namespace table that drives every
//! generation-fallback lookup, and the per-field default table applied when
//! an attribute is missing from a present element. Both are plain values
//! handed to the engine at construction, so adding a future complement
//! namespace or changing a default never touches extractor call sites.

use serde::{Deserialize, Serialize};

/// Known SAT namespace URIs.
pub mod ns {
    /// CFDI 4.0 schema.
    pub const CFDI_40: &str = "http://www.sat.gob.mx/cfd/4";

    /// CFDI 3.3 schema.
    pub const CFDI_33: &str = "http://www.sat.gob.mx/cfd/3";

    /// Fiscal stamp (Timbre Fiscal Digital).
    pub const TFD: &str = "http://www.sat.gob.mx/TimbreFiscalDigital";

    /// Payments complement 2.0.
    pub const PAGOS_20: &str = "http://www.sat.gob.mx/Pagos20";

    /// Payments complement 1.0.
    pub const PAGOS_10: &str = "http://www.sat.gob.mx/Pagos";
}

/// Main configuration for the extraction engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CfdiConfig {
    /// Candidate namespaces per lookup family.
    pub namespaces: NamespaceTable,

    /// Defaults applied when an attribute is missing from a present element.
    pub defaults: FieldDefaults,
}

/// Ordered candidate namespaces for each lookup family.
///
/// Newest schema generation first; lookups fall back in list order until
/// one candidate yields a result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NamespaceTable {
    /// Comprobante body elements (Emisor, Receptor, Conceptos, ...).
    pub cfdi: Vec<String>,

    /// Fiscal stamp elements.
    pub tfd: Vec<String>,

    /// Payments complement elements.
    pub pagos: Vec<String>,
}

impl Default for NamespaceTable {
    fn default() -> Self {
        Self {
            cfdi: vec![ns::CFDI_40.to_owned(), ns::CFDI_33.to_owned()],
            tfd: vec![ns::TFD.to_owned()],
            pagos: vec![ns::PAGOS_20.to_owned(), ns::PAGOS_10.to_owned()],
        }
    }
}

impl NamespaceTable {
    /// The current-generation comprobante namespace, as a one-element
    /// candidate list. Tax entries inside line items resolve against this
    /// only, with no legacy fallback.
    pub fn cfdi_current(&self) -> &[String] {
        &self.cfdi[..self.cfdi.len().min(1)]
    }
}

/// Per-field default strings, consulted once during extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldDefaults {
    /// Series when the root carries no `Serie` attribute.
    pub serie: String,

    /// Folio when the root carries no `Folio` attribute.
    pub folio: String,

    /// Currency code when the root carries no `Moneda` attribute.
    pub moneda: String,

    /// Legal name when a present party element carries no `Nombre`.
    pub nombre: String,

    /// Payment method when the root carries no `MetodoPago`. The shipped
    /// default is "No especificado"; deployments that prefer the
    /// "Pago parcial" wording override it here.
    pub metodo_pago: String,
}

impl Default for FieldDefaults {
    fn default() -> Self {
        Self {
            serie: "Sin Serie".to_owned(),
            folio: "Sin Folio".to_owned(),
            moneda: "MXN".to_owned(),
            nombre: "Sin Nombre".to_owned(),
            metodo_pago: "No especificado".to_owned(),
        }
    }
}

impl CfdiConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
