//! Payments complement extraction (Pagos 2.0 with 1.0 fallback).
//!
//! The complement nests three levels deep: Pagos → Pago → DoctoRelacionado
//! → ImpuestosDR/TrasladoDR. Every level resolves generation-tolerantly,
//! so a 2.0 container with 2.0 children and a 1.0 container with 1.0
//! children both extract through the same code path.

use roxmltree::Node;

use crate::cfdi::lookup::{attr_decimal, attr_string, find_descendant, find_descendants};
use crate::models::config::CfdiConfig;
use crate::models::record::{Complements, Payment, RelatedDocument, TaxEntry};

/// Detect and extract complements present on the document.
///
/// No payments container means `pagos: None`; a container with zero
/// payment elements means `Some(vec![])`. Further complement kinds slot in
/// here following the same detection pattern.
pub fn extract_complements(root: Node, config: &CfdiConfig) -> Complements {
    let namespaces = &config.namespaces.pagos;

    let pagos = find_descendant(root, "Pagos", namespaces).map(|container| {
        find_descendants(container, "Pago", namespaces)
            .into_iter()
            .map(|pago| extract_payment(pago, namespaces))
            .collect()
    });

    Complements { pagos }
}

fn extract_payment(pago: Node, namespaces: &[String]) -> Payment {
    Payment {
        fecha_pago: attr_string(pago, "FechaPago"),
        forma_pago: attr_string(pago, "FormaDePagoP"),
        moneda: attr_string(pago, "MonedaP"),
        monto: attr_decimal(pago, "Monto"),
        documentos_relacionados: find_descendants(pago, "DoctoRelacionado", namespaces)
            .into_iter()
            .map(|doc| extract_related_document(doc, namespaces))
            .collect(),
    }
}

fn extract_related_document(doc: Node, namespaces: &[String]) -> RelatedDocument {
    let traslados = find_descendant(doc, "ImpuestosDR", namespaces)
        .map(|impuestos| {
            find_descendants(impuestos, "TrasladoDR", namespaces)
                .into_iter()
                .map(tax_entry_dr)
                .collect()
        })
        .unwrap_or_default();

    RelatedDocument {
        id_documento: attr_string(doc, "IdDocumento"),
        serie: attr_string(doc, "Serie"),
        folio: attr_string(doc, "Folio"),
        moneda: attr_string(doc, "MonedaDR"),
        imp_saldo_ant: attr_decimal(doc, "ImpSaldoAnt"),
        imp_pagado: attr_decimal(doc, "ImpPagado"),
        imp_saldo_insoluto: attr_decimal(doc, "ImpSaldoInsoluto"),
        traslados,
    }
}

fn tax_entry_dr(node: Node) -> TaxEntry {
    TaxEntry {
        base: attr_decimal(node, "BaseDR"),
        impuesto: attr_string(node, "ImpuestoDR"),
        tipo_factor: attr_string(node, "TipoFactorDR"),
        tasa_cuota: attr_decimal(node, "TasaOCuotaDR"),
        importe: attr_decimal(node, "ImporteDR"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use roxmltree::Document;
    use rust_decimal::Decimal;

    const PAGOS_20: &str = r#"<cfdi:Comprobante xmlns:cfdi="http://www.sat.gob.mx/cfd/4"
        xmlns:pago20="http://www.sat.gob.mx/Pagos20">
        <cfdi:Complemento>
            <pago20:Pagos Version="2.0">
                <pago20:Pago FechaPago="2025-01-15T10:00:00" FormaDePagoP="03"
                    MonedaP="MXN" Monto="1160.00">
                    <pago20:DoctoRelacionado
                        IdDocumento="aaaa0f9a-ec50-4020-bf93-33f613599acb"
                        Serie="A" Folio="1" MonedaDR="MXN" ImpSaldoAnt="1160.00"
                        ImpPagado="580.00" ImpSaldoInsoluto="580.00">
                        <pago20:ImpuestosDR>
                            <pago20:TrasladosDR>
                                <pago20:TrasladoDR BaseDR="500.00" ImpuestoDR="002"
                                    TipoFactorDR="Tasa" TasaOCuotaDR="0.160000"
                                    ImporteDR="80.00"/>
                            </pago20:TrasladosDR>
                        </pago20:ImpuestosDR>
                    </pago20:DoctoRelacionado>
                </pago20:Pago>
            </pago20:Pagos>
        </cfdi:Complemento>
    </cfdi:Comprobante>"#;

    #[test]
    fn test_no_complement_omits_pagos() {
        let doc = Document::parse(
            r#"<cfdi:Comprobante xmlns:cfdi="http://www.sat.gob.mx/cfd/4"/>"#,
        )
        .unwrap();
        let complements = extract_complements(doc.root_element(), &CfdiConfig::default());
        assert!(complements.pagos.is_none());
    }

    #[test]
    fn test_empty_container_keeps_pagos_key() {
        let doc = Document::parse(
            r#"<cfdi:Comprobante xmlns:cfdi="http://www.sat.gob.mx/cfd/4"
                xmlns:pago20="http://www.sat.gob.mx/Pagos20">
                <cfdi:Complemento><pago20:Pagos Version="2.0"/></cfdi:Complemento>
            </cfdi:Comprobante>"#,
        )
        .unwrap();
        let complements = extract_complements(doc.root_element(), &CfdiConfig::default());
        assert_eq!(complements.pagos, Some(Vec::new()));
    }

    #[test]
    fn test_payment_with_related_document_taxes() {
        let doc = Document::parse(PAGOS_20).unwrap();
        let complements = extract_complements(doc.root_element(), &CfdiConfig::default());

        let pagos = complements.pagos.unwrap();
        assert_eq!(pagos.len(), 1);

        let pago = &pagos[0];
        assert_eq!(pago.forma_pago.as_deref(), Some("03"));
        assert_eq!(pago.monto, Decimal::new(116000, 2));
        assert_eq!(pago.documentos_relacionados.len(), 1);

        let doc_rel = &pago.documentos_relacionados[0];
        assert_eq!(doc_rel.serie.as_deref(), Some("A"));
        assert_eq!(doc_rel.imp_saldo_ant, Decimal::new(116000, 2));
        assert_eq!(doc_rel.imp_pagado, Decimal::new(58000, 2));
        assert_eq!(doc_rel.imp_saldo_insoluto, Decimal::new(58000, 2));

        assert_eq!(doc_rel.traslados.len(), 1);
        assert_eq!(doc_rel.traslados[0].base, Decimal::new(50000, 2));
        assert_eq!(doc_rel.traslados[0].impuesto.as_deref(), Some("002"));
        assert_eq!(doc_rel.traslados[0].importe, Decimal::new(8000, 2));
    }

    #[test]
    fn test_legacy_pagos_10_fallback() {
        let doc = Document::parse(
            r#"<cfdi:Comprobante xmlns:cfdi="http://www.sat.gob.mx/cfd/3"
                xmlns:pago10="http://www.sat.gob.mx/Pagos">
                <cfdi:Complemento>
                    <pago10:Pagos Version="1.0">
                        <pago10:Pago FechaPago="2021-06-01T09:00:00" FormaDePagoP="01"
                            MonedaP="MXN" Monto="500.00">
                            <pago10:DoctoRelacionado IdDocumento="bbbb-1111" Folio="9"
                                MonedaDR="MXN" ImpSaldoAnt="500.00" ImpPagado="500.00"
                                ImpSaldoInsoluto="0"/>
                        </pago10:Pago>
                    </pago10:Pagos>
                </cfdi:Complemento>
            </cfdi:Comprobante>"#,
        )
        .unwrap();
        let complements = extract_complements(doc.root_element(), &CfdiConfig::default());

        let pagos = complements.pagos.unwrap();
        assert_eq!(pagos.len(), 1);
        assert_eq!(pagos[0].monto, Decimal::new(50000, 2));

        let doc_rel = &pagos[0].documentos_relacionados[0];
        assert_eq!(doc_rel.id_documento.as_deref(), Some("bbbb-1111"));
        assert_eq!(doc_rel.imp_saldo_insoluto, Decimal::ZERO);
        assert!(doc_rel.traslados.is_empty());
    }
}
