//! Line-item extraction, including per-item nested tax entries.

use roxmltree::Node;

use crate::cfdi::lookup::{attr_decimal, attr_string, find_all, find_descendants};
use crate::models::config::CfdiConfig;
use crate::models::record::{LineItem, TaxEntry, TaxInfo};

/// Extract all line items under `Conceptos/Concepto`, trying the current
/// namespace first and the legacy one second.
pub fn extract_line_items(root: Node, config: &CfdiConfig) -> Vec<LineItem> {
    find_all(root, &["Conceptos", "Concepto"], &config.namespaces.cfdi)
        .into_iter()
        .map(|concepto| LineItem {
            clave_prod_serv: attr_string(concepto, "ClaveProdServ"),
            cantidad: attr_decimal(concepto, "Cantidad"),
            clave_unidad: attr_string(concepto, "ClaveUnidad"),
            descripcion: attr_string(concepto, "Descripcion"),
            valor_unitario: attr_decimal(concepto, "ValorUnitario"),
            importe: attr_decimal(concepto, "Importe"),
            descuento: attr_decimal(concepto, "Descuento"),
            objeto_imp: attr_string(concepto, "ObjetoImp"),
            impuestos: extract_taxes(concepto, config),
        })
        .collect()
}

/// Gather transfer and withholding entries nested anywhere below `scope`.
///
/// The tax container's depth varies between documents, so the search spans
/// all descendants. Entries resolve against the current-generation
/// namespace only. Called with a `Concepto` node for per-item taxes, or
/// with the root for the document-level flattened view.
pub fn extract_taxes(scope: Node, config: &CfdiConfig) -> TaxInfo {
    let namespaces = config.namespaces.cfdi_current();

    TaxInfo {
        traslados: find_descendants(scope, "Traslado", namespaces)
            .into_iter()
            .map(tax_entry)
            .collect(),
        retenciones: find_descendants(scope, "Retencion", namespaces)
            .into_iter()
            .map(tax_entry)
            .collect(),
    }
}

fn tax_entry(node: Node) -> TaxEntry {
    TaxEntry {
        base: attr_decimal(node, "Base"),
        impuesto: attr_string(node, "Impuesto"),
        tipo_factor: attr_string(node, "TipoFactor"),
        tasa_cuota: attr_decimal(node, "TasaOCuota"),
        importe: attr_decimal(node, "Importe"),
    }
}
