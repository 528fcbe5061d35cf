//! Process command - extract data from a single CFDI file.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::debug;

use cfdix_core::models::config::CfdiConfig;
use cfdix_core::models::record::{CfdiRecord, LineItem};
use cfdix_core::CfdiExtractor;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (CFDI XML)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output (one row per line item, header fields repeated)
    Csv,
    /// Plain text summary
    Text,
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let extractor = CfdiExtractor::with_config(config);

    let record = extractor.process_path(&args.input)?;
    debug!("Assembled record for {}", record.source);

    let output = format_record(&record, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}

/// Load the engine configuration, falling back to defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<CfdiConfig> {
    match config_path {
        Some(path) => Ok(CfdiConfig::from_file(std::path::Path::new(path))?),
        None => Ok(CfdiConfig::default()),
    }
}

/// Render one record in the requested format.
pub fn format_record(record: &CfdiRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

/// One CSV row per line item, with the document-level fields repeated so
/// each row stands alone.
fn format_csv(record: &CfdiRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "uuid",
        "serie",
        "folio",
        "fecha",
        "tipo_comprobante",
        "emisor_rfc",
        "emisor_nombre",
        "receptor_rfc",
        "receptor_nombre",
        "clave_prod_serv",
        "descripcion",
        "cantidad",
        "valor_unitario",
        "importe",
        "descuento",
        "total",
        "moneda",
    ])?;

    let uuid = record.uuid().unwrap_or_default();

    // A document with no conceptos still yields one row of header data
    let placeholder = [LineItem::default()];
    let items: &[LineItem] = if record.line_items.is_empty() {
        &placeholder
    } else {
        &record.line_items
    };

    for item in items {
        wtr.write_record([
            uuid,
            &record.general.serie,
            &record.general.folio,
            record.general.fecha.as_deref().unwrap_or_default(),
            &record.general.tipo_comprobante,
            record.issuer.rfc.as_deref().unwrap_or_default(),
            record.issuer.nombre.as_deref().unwrap_or_default(),
            record.recipient.rfc.as_deref().unwrap_or_default(),
            record.recipient.nombre.as_deref().unwrap_or_default(),
            item.clave_prod_serv.as_deref().unwrap_or_default(),
            item.descripcion.as_deref().unwrap_or_default(),
            &item.cantidad.to_string(),
            &item.valor_unitario.to_string(),
            &item.importe.to_string(),
            &item.descuento.to_string(),
            &record.general.total.to_string(),
            &record.general.moneda,
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &CfdiRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "CFDI: {}-{}\n",
        record.general.serie, record.general.folio
    ));
    output.push_str(&format!(
        "UUID: {}\n",
        record.uuid().unwrap_or("No disponible")
    ));
    output.push_str(&format!("Tipo: {}\n", record.general.tipo_comprobante));
    if let Some(fecha) = &record.general.fecha {
        output.push_str(&format!("Fecha: {}\n", fecha));
    }
    output.push_str("\n");

    output.push_str("Emisor:\n");
    output.push_str(&format!(
        "  {} ({})\n",
        record.issuer.nombre.as_deref().unwrap_or("-"),
        record.issuer.rfc.as_deref().unwrap_or("-")
    ));

    output.push_str("Receptor:\n");
    output.push_str(&format!(
        "  {} ({})\n",
        record.recipient.nombre.as_deref().unwrap_or("-"),
        record.recipient.rfc.as_deref().unwrap_or("-")
    ));
    output.push_str("\n");

    output.push_str(&format!("Conceptos: {}\n", record.line_items.len()));
    output.push_str(&format!(
        "Subtotal: {} {}\n",
        record.general.subtotal, record.general.moneda
    ));
    output.push_str(&format!(
        "Total:    {} {}\n",
        record.general.total, record.general.moneda
    ));

    let kinds = record.complements.kinds();
    if !kinds.is_empty() {
        output.push_str(&format!("\nComplementos: {}\n", kinds.join(", ")));
    }

    output
}
