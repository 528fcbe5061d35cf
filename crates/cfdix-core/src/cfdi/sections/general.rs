//! General header extraction from the comprobante root.

use roxmltree::Node;

use crate::cfdi::lookup::{attr_decimal, attr_or, attr_string};
use crate::models::config::CfdiConfig;
use crate::models::record::GeneralData;

/// Comprobante-type codes and their labels.
const TIPO_COMPROBANTE: [(&str, &str); 5] = [
    ("I", "Ingreso (Factura)"),
    ("E", "Egreso (Nota de Crédito)"),
    ("P", "Pago"),
    ("N", "Nómina"),
    ("T", "Traslado"),
];

/// Translate a comprobante-type code to its label. Unknown codes keep the
/// raw code visible in the result.
pub fn translate_tipo_comprobante(code: Option<&str>) -> String {
    match code {
        Some(code) => TIPO_COMPROBANTE
            .iter()
            .find(|(key, _)| *key == code)
            .map(|(_, label)| (*label).to_owned())
            .unwrap_or_else(|| format!("Desconocido ({})", code)),
        None => "Desconocido (sin tipo)".to_owned(),
    }
}

/// Extract the comprobante's own attributes.
///
/// Root attributes are unprefixed, so no namespace handling applies here;
/// the default table covers every attribute that may be missing.
pub fn extract_general(root: Node, config: &CfdiConfig) -> GeneralData {
    let defaults = &config.defaults;

    GeneralData {
        version: attr_string(root, "Version"),
        serie: attr_or(root, "Serie", &defaults.serie),
        folio: attr_or(root, "Folio", &defaults.folio),
        fecha: attr_string(root, "Fecha"),
        subtotal: attr_decimal(root, "SubTotal"),
        total: attr_decimal(root, "Total"),
        moneda: attr_or(root, "Moneda", &defaults.moneda),
        tipo_comprobante: translate_tipo_comprobante(root.attribute("TipoDeComprobante")),
        metodo_pago: attr_or(root, "MetodoPago", &defaults.metodo_pago),
        lugar_expedicion: attr_string(root, "LugarExpedicion"),
    }
}
