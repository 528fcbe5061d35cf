//! CFDI extraction pipeline.
//!
//! One-way data flow: bytes → tree → version-tagged tree → independently
//! extracted sections → one assembled record. The engine keeps no state
//! between documents.

mod assembler;
mod loader;
pub mod lookup;
pub mod sections;
mod version;

pub use version::detect_version;

use std::path::Path;

use crate::error::Result;
use crate::models::config::CfdiConfig;
use crate::models::record::CfdiRecord;

/// The extraction engine.
///
/// Stateless between invocations: each `process_*` call parses its own
/// tree and returns an owned record, so independent documents can be
/// processed concurrently from separate threads.
#[derive(Debug, Clone, Default)]
pub struct CfdiExtractor {
    config: CfdiConfig,
}

impl CfdiExtractor {
    /// Engine with the default namespace table and field defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with an explicit configuration.
    pub fn with_config(config: CfdiConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &CfdiConfig {
        &self.config
    }

    /// Process one document from disk. The path doubles as the record's
    /// source identifier.
    pub fn process_path(&self, path: impl AsRef<Path>) -> Result<CfdiRecord> {
        let path = path.as_ref();
        let xml = loader::read_source(path)?;
        self.process_str(&path.display().to_string(), &xml)
    }

    /// Process one document from a raw byte stream.
    pub fn process_bytes(&self, source: &str, bytes: &[u8]) -> Result<CfdiRecord> {
        self.process_str(source, loader::decode(bytes)?)
    }

    /// Process one document from already-decoded XML text.
    pub fn process_str(&self, source: &str, xml: &str) -> Result<CfdiRecord> {
        let doc = loader::parse(xml)?;
        Ok(assembler::assemble(source, doc.root_element(), &self.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadError;
    use pretty_assertions::assert_eq;
    use std::fs;

    const MINIMAL_40: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<cfdi:Comprobante xmlns:cfdi="http://www.sat.gob.mx/cfd/4" Version="4.0" Serie="A"
    Folio="1" Fecha="2025-12-30T12:00:00" SubTotal="100" Total="1160" Moneda="MXN"
    TipoDeComprobante="I">
  <cfdi:Emisor Rfc="DEMO010101001" Nombre="Empresa Demostrativa SA de CV" RegimenFiscal="601"/>
  <cfdi:Receptor Rfc="XAXX010101000" Nombre="Juan Perez" UsoCFDI="G03"/>
  <cfdi:Conceptos>
    <cfdi:Concepto ClaveProdServ="01010101" Cantidad="1" ClaveUnidad="H87"
        Descripcion="Servicio" ValorUnitario="100" Importe="100"/>
  </cfdi:Conceptos>
</cfdi:Comprobante>
"#;

    #[test]
    fn test_minimal_document_end_to_end() {
        let extractor = CfdiExtractor::new();
        let record = extractor.process_str("minimal.xml", MINIMAL_40).unwrap();

        assert_eq!(record.source, "minimal.xml");
        assert_eq!(record.general.serie, "A");
        assert_eq!(record.general.folio, "1");
        assert_eq!(record.general.tipo_comprobante, "Ingreso (Factura)");
        assert_eq!(record.issuer.rfc.as_deref(), Some("DEMO010101001"));
        assert_eq!(record.recipient.rfc.as_deref(), Some("XAXX010101000"));
        assert_eq!(record.line_items.len(), 1);

        // One line item, no tax elements, no complements
        assert!(record.line_items[0].impuestos.is_empty());
        assert!(record.document_taxes.is_empty());
        assert!(record.complements.is_empty());
        assert_eq!(record.stamp, None);
    }

    #[test]
    fn test_process_bytes_matches_process_str() {
        let extractor = CfdiExtractor::new();
        let from_bytes = extractor
            .process_bytes("doc.xml", MINIMAL_40.as_bytes())
            .unwrap();
        assert_eq!(from_bytes.general.serie, "A");
    }

    #[test]
    fn test_process_path_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("factura.xml");
        fs::write(&path, MINIMAL_40).unwrap();

        let record = CfdiExtractor::new().process_path(&path).unwrap();
        assert_eq!(record.source, path.display().to_string());
        assert_eq!(record.general.folio, "1");
    }

    #[test]
    fn test_missing_path_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = CfdiExtractor::new()
            .process_path(dir.path().join("nope.xml"))
            .unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
    }

    #[test]
    fn test_malformed_document_yields_no_record() {
        let truncated = &MINIMAL_40[..120];
        let err = CfdiExtractor::new()
            .process_str("truncated.xml", truncated)
            .unwrap_err();
        assert!(matches!(err, LoadError::Malformed(_)));
    }

    #[test]
    fn test_configured_metodo_pago_default() {
        let mut config = CfdiConfig::default();
        config.defaults.metodo_pago = "Pago parcial".to_owned();

        let record = CfdiExtractor::with_config(config)
            .process_str("doc.xml", MINIMAL_40)
            .unwrap();
        assert_eq!(record.general.metodo_pago, "Pago parcial");
    }
}
