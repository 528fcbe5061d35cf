//! Fiscal stamp (Timbre Fiscal Digital) extraction.

use roxmltree::Node;

use crate::cfdi::lookup::{attr_string, find_descendant};
use crate::models::config::CfdiConfig;
use crate::models::record::FiscalStamp;

/// Extract the fiscal stamp, searching all descendants. `None` when the
/// document is untimbred; a present-but-sparse stamp keeps its `Some`
/// wrapper with `None` fields inside.
pub fn extract_stamp(root: Node, config: &CfdiConfig) -> Option<FiscalStamp> {
    find_descendant(root, "TimbreFiscalDigital", &config.namespaces.tfd).map(|timbre| {
        FiscalStamp {
            uuid: attr_string(timbre, "UUID"),
            fecha_timbrado: attr_string(timbre, "FechaTimbrado"),
            rfc_prov_certif: attr_string(timbre, "RfcProvCertif"),
            no_certificado_sat: attr_string(timbre, "NoCertificadoSAT"),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    #[test]
    fn test_untimbred_document() {
        let doc = Document::parse(
            r#"<cfdi:Comprobante xmlns:cfdi="http://www.sat.gob.mx/cfd/4"/>"#,
        )
        .unwrap();
        assert_eq!(extract_stamp(doc.root_element(), &CfdiConfig::default()), None);
    }

    #[test]
    fn test_stamp_nested_in_complemento() {
        let doc = Document::parse(
            r#"<cfdi:Comprobante xmlns:cfdi="http://www.sat.gob.mx/cfd/4"
                xmlns:tfd="http://www.sat.gob.mx/TimbreFiscalDigital">
                <cfdi:Complemento>
                    <tfd:TimbreFiscalDigital UUID="1a3e0f9a-ec50-4020-bf93-33f613599acb"
                        FechaTimbrado="2025-12-30T12:05:00" RfcProvCertif="SAT970701NN3"
                        NoCertificadoSAT="00001000000504465028"/>
                </cfdi:Complemento>
            </cfdi:Comprobante>"#,
        )
        .unwrap();

        let stamp = extract_stamp(doc.root_element(), &CfdiConfig::default()).unwrap();
        assert_eq!(
            stamp.uuid.as_deref(),
            Some("1a3e0f9a-ec50-4020-bf93-33f613599acb")
        );
        assert_eq!(stamp.rfc_prov_certif.as_deref(), Some("SAT970701NN3"));
    }

    #[test]
    fn test_sparse_stamp_is_still_present() {
        let doc = Document::parse(
            r#"<cfdi:Comprobante xmlns:cfdi="http://www.sat.gob.mx/cfd/4"
                xmlns:tfd="http://www.sat.gob.mx/TimbreFiscalDigital">
                <cfdi:Complemento><tfd:TimbreFiscalDigital/></cfdi:Complemento>
            </cfdi:Comprobante>"#,
        )
        .unwrap();

        let stamp = extract_stamp(doc.root_element(), &CfdiConfig::default());
        assert_eq!(stamp, Some(FiscalStamp::default()));
    }
}
