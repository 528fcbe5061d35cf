//! Record assembly: compose section extractor outputs into one record.

use chrono::Utc;
use roxmltree::Node;
use tracing::info;

use crate::models::config::CfdiConfig;
use crate::models::record::CfdiRecord;

use super::sections;

/// Compose all section outputs into one normalized record.
///
/// Sections are independent of each other, so invocation order does not
/// affect the result. Assembly never fails: the only fallible stage of the
/// pipeline is the loader.
pub fn assemble(source: &str, root: Node, config: &CfdiConfig) -> CfdiRecord {
    let record = CfdiRecord {
        source: source.to_owned(),
        processed_at: Utc::now(),
        general: sections::extract_general(root, config),
        issuer: sections::extract_issuer(root, config),
        recipient: sections::extract_recipient(root, config),
        line_items: sections::extract_line_items(root, config),
        stamp: sections::extract_stamp(root, config),
        complements: sections::extract_complements(root, config),
        document_taxes: sections::extract_taxes(root, config),
    };

    log_summary(&record);
    record
}

/// Compact operator-facing summary. Informational only.
fn log_summary(record: &CfdiRecord) {
    info!(
        "{}: UUID {} | {} | {}-{} | ${} {} | {} conceptos",
        record.source,
        record.uuid().unwrap_or("No disponible"),
        record.general.tipo_comprobante,
        record.general.serie,
        record.general.folio,
        record.general.total,
        record.general.moneda,
        record.line_items.len(),
    );
    info!(
        "Emisor: {} ({}) / Receptor: {} ({})",
        record.issuer.nombre.as_deref().unwrap_or("-"),
        record.issuer.rfc.as_deref().unwrap_or("-"),
        record.recipient.nombre.as_deref().unwrap_or("-"),
        record.recipient.rfc.as_deref().unwrap_or("-"),
    );

    let kinds = record.complements.kinds();
    if !kinds.is_empty() {
        info!("Complementos: {}", kinds.join(", "));
    }
}
