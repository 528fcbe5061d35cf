//! Issuer and recipient extraction with generation fallback.

use roxmltree::Node;

use crate::cfdi::lookup::{attr_or, attr_string, find_first};
use crate::models::config::CfdiConfig;
use crate::models::record::{Issuer, Recipient};

/// Extract the issuer (`Emisor`), trying the current namespace first and
/// the legacy one second. A missing element yields the all-`None` struct.
pub fn extract_issuer(root: Node, config: &CfdiConfig) -> Issuer {
    match find_first(root, &["Emisor"], &config.namespaces.cfdi) {
        Some(emisor) => Issuer {
            rfc: attr_string(emisor, "Rfc"),
            nombre: Some(attr_or(emisor, "Nombre", &config.defaults.nombre)),
            regimen_fiscal: attr_string(emisor, "RegimenFiscal"),
        },
        None => Issuer::default(),
    }
}

/// Extract the recipient (`Receptor`), same fallback and absence rules as
/// the issuer.
pub fn extract_recipient(root: Node, config: &CfdiConfig) -> Recipient {
    match find_first(root, &["Receptor"], &config.namespaces.cfdi) {
        Some(receptor) => Recipient {
            rfc: attr_string(receptor, "Rfc"),
            nombre: Some(attr_or(receptor, "Nombre", &config.defaults.nombre)),
            uso_cfdi: attr_string(receptor, "UsoCFDI"),
            regimen_fiscal: attr_string(receptor, "RegimenFiscalReceptor"),
            domicilio_fiscal: attr_string(receptor, "DomicilioFiscalReceptor"),
        },
        None => Recipient::default(),
    }
}
