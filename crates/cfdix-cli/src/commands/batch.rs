//! Batch processing command for folders of CFDI files.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use cfdix_core::models::record::CfdiRecord;
use cfdix_core::{CfdiExtractor, LoadError};

use super::process::{format_record, load_config, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input directory or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory for per-file results
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate consolidated CSV reports (general, conceptos,
    /// documentos relacionados)
    #[arg(long)]
    summary: bool,
}

/// Result of processing a single file.
struct BatchOutcome {
    path: PathBuf,
    record: Option<CfdiRecord>,
    failure: Option<LoadError>,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let extractor = CfdiExtractor::with_config(config);

    // A bare directory means "every .xml inside it"
    let pattern = if std::path::Path::new(&args.input).is_dir() {
        format!("{}/*.xml", args.input.trim_end_matches('/'))
    } else {
        args.input.clone()
    };

    let files: Vec<PathBuf> = glob(&pattern)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            ext.eq_ignore_ascii_case("xml")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching CFDI files found for pattern: {}", pattern);
    }

    println!(
        "{} Found {} CFDI files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    // One bad document never aborts the batch: failures are collected and
    // reported next to the successes.
    let mut outcomes = Vec::with_capacity(files.len());
    for path in files {
        let outcome = match extractor.process_path(&path) {
            Ok(record) => BatchOutcome {
                path,
                record: Some(record),
                failure: None,
            },
            Err(e) => {
                warn!("Failed to process {}: {}", path.display(), e);
                BatchOutcome {
                    path,
                    record: None,
                    failure: Some(e),
                }
            }
        };
        outcomes.push(outcome);
        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    // Per-file outputs
    if let Some(ref output_dir) = args.output_dir {
        for (outcome, record) in outcomes
            .iter()
            .filter_map(|o| o.record.as_ref().map(|r| (o, r)))
        {
            let stem = outcome
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("cfdi");

            let extension = match args.format {
                OutputFormat::Json => "json",
                OutputFormat::Csv => "csv",
                OutputFormat::Text => "txt",
            };

            let output_path = output_dir.join(format!("{}.{}", stem, extension));
            fs::write(&output_path, format_record(record, args.format)?)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    if args.summary {
        let dir = args
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        write_general_report(&dir.join("reporte_general.csv"), &outcomes)?;
        write_conceptos_report(&dir.join("reporte_conceptos.csv"), &outcomes)?;
        write_documentos_report(&dir.join("reporte_documentos.csv"), &outcomes)?;
        println!(
            "{} Consolidated reports written to {}",
            style("✓").green(),
            dir.display()
        );
    }

    let successful = outcomes.iter().filter(|o| o.record.is_some()).count();
    let failed: Vec<_> = outcomes.iter().filter(|o| o.failure.is_some()).collect();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        outcomes.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for outcome in &failed {
            println!(
                "  - {}: {}",
                outcome.path.display(),
                outcome
                    .failure
                    .as_ref()
                    .map(|e| e.to_string())
                    .unwrap_or_default()
            );
        }
    }

    Ok(())
}

/// One row per document: header data plus the processing status.
fn write_general_report(path: &PathBuf, outcomes: &[BatchOutcome]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "uuid",
        "version",
        "tipo_comprobante",
        "serie",
        "folio",
        "fecha",
        "subtotal",
        "total",
        "moneda",
        "metodo_pago",
        "emisor_rfc",
        "emisor_nombre",
        "receptor_rfc",
        "receptor_nombre",
        "conceptos",
        "complementos",
        "error",
    ])?;

    for outcome in outcomes {
        let filename = outcome
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        if let Some(record) = &outcome.record {
            wtr.write_record([
                filename,
                "success",
                record.uuid().unwrap_or_default(),
                record.general.version.as_deref().unwrap_or_default(),
                &record.general.tipo_comprobante,
                &record.general.serie,
                &record.general.folio,
                record.general.fecha.as_deref().unwrap_or_default(),
                &record.general.subtotal.to_string(),
                &record.general.total.to_string(),
                &record.general.moneda,
                &record.general.metodo_pago,
                record.issuer.rfc.as_deref().unwrap_or_default(),
                record.issuer.nombre.as_deref().unwrap_or_default(),
                record.recipient.rfc.as_deref().unwrap_or_default(),
                record.recipient.nombre.as_deref().unwrap_or_default(),
                &record.line_items.len().to_string(),
                &record.complements.kinds().join(" "),
                "",
            ])?;
        } else {
            let failure = outcome.failure.as_ref();
            wtr.write_record([
                filename,
                failure.map(|e| e.kind()).unwrap_or("error"),
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                &failure.map(|e| e.to_string()).unwrap_or_default(),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

/// One row per line item, keyed back to the document by UUID.
fn write_conceptos_report(path: &PathBuf, outcomes: &[BatchOutcome]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "uuid_cfdi",
        "clave_prod_serv",
        "descripcion",
        "cantidad",
        "clave_unidad",
        "valor_unitario",
        "importe",
        "descuento",
    ])?;

    for record in outcomes.iter().filter_map(|o| o.record.as_ref()) {
        let uuid = record.uuid().unwrap_or_default();
        for item in &record.line_items {
            wtr.write_record([
                uuid,
                item.clave_prod_serv.as_deref().unwrap_or_default(),
                item.descripcion.as_deref().unwrap_or_default(),
                &item.cantidad.to_string(),
                item.clave_unidad.as_deref().unwrap_or_default(),
                &item.valor_unitario.to_string(),
                &item.importe.to_string(),
                &item.descuento.to_string(),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

/// One row per related document inside payment complements. The first
/// transferred-tax entry is flattened into the row.
fn write_documentos_report(path: &PathBuf, outcomes: &[BatchOutcome]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "uuid_cfdi",
        "id_documento",
        "serie",
        "folio",
        "moneda_dr",
        "imp_saldo_ant",
        "imp_pagado",
        "imp_saldo_insoluto",
        "base_dr",
        "tasa_cuota_dr",
        "importe_dr",
    ])?;

    for record in outcomes.iter().filter_map(|o| o.record.as_ref()) {
        let uuid = record.uuid().unwrap_or_default();
        let pagos = match &record.complements.pagos {
            Some(pagos) => pagos,
            None => continue,
        };

        for pago in pagos {
            for doc_rel in &pago.documentos_relacionados {
                let traslado = doc_rel.traslados.first();
                wtr.write_record([
                    uuid,
                    doc_rel.id_documento.as_deref().unwrap_or_default(),
                    doc_rel.serie.as_deref().unwrap_or_default(),
                    doc_rel.folio.as_deref().unwrap_or_default(),
                    doc_rel.moneda.as_deref().unwrap_or_default(),
                    &doc_rel.imp_saldo_ant.to_string(),
                    &doc_rel.imp_pagado.to_string(),
                    &doc_rel.imp_saldo_insoluto.to_string(),
                    &traslado.map(|t| t.base.to_string()).unwrap_or_default(),
                    &traslado
                        .map(|t| t.tasa_cuota.to_string())
                        .unwrap_or_default(),
                    &traslado.map(|t| t.importe.to_string()).unwrap_or_default(),
                ])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
