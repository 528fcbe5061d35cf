//! Normalized record model for extracted CFDI data.
//!
//! One `CfdiRecord` is produced per source document. Field-level absence
//! rules: when a parent element is missing the whole section is `None` /
//! all-`None`, when only an attribute is missing a present element the
//! field carries its configured default (strings) or zero (amounts).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A complete normalized CFDI document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CfdiRecord {
    /// Source identifier (normally the file path).
    pub source: String,

    /// When this record was assembled.
    pub processed_at: DateTime<Utc>,

    /// Root-level comprobante attributes.
    pub general: GeneralData,

    /// Issuer (emisor) information.
    pub issuer: Issuer,

    /// Recipient (receptor) information.
    pub recipient: Recipient,

    /// Line items (conceptos) in document order.
    pub line_items: Vec<LineItem>,

    /// Fiscal stamp; `None` when the document is untimbred.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stamp: Option<FiscalStamp>,

    /// Detected complements.
    pub complements: Complements,

    /// Transfer and withholding entries flattened over the whole document,
    /// kept for legacy flattened queries alongside the per-item breakdown.
    pub document_taxes: TaxInfo,
}

/// Root-level comprobante attributes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralData {
    /// Raw `Version` attribute, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Document series (defaulted when absent).
    pub serie: String,

    /// Document folio (defaulted when absent).
    pub folio: String,

    /// Issue timestamp, kept as the raw string. Calendar interpretation is
    /// a downstream concern.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha: Option<String>,

    /// Subtotal amount (0 when absent).
    pub subtotal: Decimal,

    /// Total amount (0 when absent).
    pub total: Decimal,

    /// Currency code (default: MXN).
    pub moneda: String,

    /// Translated comprobante-type label, e.g. "Ingreso (Factura)".
    pub tipo_comprobante: String,

    /// Payment method code or the configured default.
    pub metodo_pago: String,

    /// Place of issuance (postal code), when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lugar_expedicion: Option<String>,
}

/// Issuer of the document.
///
/// All fields are `None` when the `Emisor` element itself is missing, so
/// callers never branch on whether the element existed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Issuer {
    /// Taxpayer id (RFC).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rfc: Option<String>,

    /// Legal name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,

    /// Tax regime code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regimen_fiscal: Option<String>,
}

/// Recipient of the document. Same absence rules as [`Issuer`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipient {
    /// Taxpayer id (RFC).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rfc: Option<String>,

    /// Legal name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,

    /// CFDI usage code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uso_cfdi: Option<String>,

    /// Tax regime code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regimen_fiscal: Option<String>,

    /// Fiscal-domicile postal code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domicilio_fiscal: Option<String>,
}

/// A single line item (concepto).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LineItem {
    /// Product/service code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clave_prod_serv: Option<String>,

    /// Quantity (0 when absent).
    pub cantidad: Decimal,

    /// Unit-of-measure code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clave_unidad: Option<String>,

    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,

    /// Unit value (0 when absent).
    pub valor_unitario: Decimal,

    /// Line amount (0 when absent).
    pub importe: Decimal,

    /// Discount (0 when absent).
    pub descuento: Decimal,

    /// Tax-object indicator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objeto_imp: Option<String>,

    /// Taxes nested under this item.
    pub impuestos: TaxInfo,
}

/// Transferred and withheld tax entries, in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxInfo {
    /// Transferred taxes (traslados).
    pub traslados: Vec<TaxEntry>,

    /// Withheld taxes (retenciones).
    pub retenciones: Vec<TaxEntry>,
}

impl TaxInfo {
    /// True when neither transfers nor withholdings were found.
    pub fn is_empty(&self) -> bool {
        self.traslados.is_empty() && self.retenciones.is_empty()
    }
}

/// One tax entry (transfer or withholding).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxEntry {
    /// Taxable base (0 when absent).
    pub base: Decimal,

    /// Tax kind code (002 = IVA, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impuesto: Option<String>,

    /// Factor type (Tasa, Cuota, Exento).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo_factor: Option<String>,

    /// Rate or fee (0 when absent).
    pub tasa_cuota: Decimal,

    /// Tax amount (0 when absent).
    pub importe: Decimal,
}

/// Fiscal stamp (Timbre Fiscal Digital). Presence signals the document has
/// been stamped; individual fields may still be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FiscalStamp {
    /// Document UUID assigned by the certifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    /// Stamping timestamp, raw string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha_timbrado: Option<String>,

    /// Certifying-provider RFC.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rfc_prov_certif: Option<String>,

    /// SAT certificate number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_certificado_sat: Option<String>,
}

/// Complements detected on the document.
///
/// `pagos: None` means no payments container was found; `Some(vec![])`
/// means a container was present but held zero payment elements. The two
/// states stay distinct through serialization (the key is omitted when
/// `None`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Complements {
    /// Payments complement, when detected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagos: Option<Vec<Payment>>,
}

impl Complements {
    /// Detected complement kinds, for operator summaries.
    pub fn kinds(&self) -> Vec<&'static str> {
        let mut kinds = Vec::new();
        if self.pagos.is_some() {
            kinds.push("pagos");
        }
        kinds
    }

    /// True when no complement was detected.
    pub fn is_empty(&self) -> bool {
        self.pagos.is_none()
    }
}

/// One payment inside a payments complement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Payment date, raw string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha_pago: Option<String>,

    /// Payment-form code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forma_pago: Option<String>,

    /// Payment currency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moneda: Option<String>,

    /// Payment amount (0 when absent).
    pub monto: Decimal,

    /// Invoices settled by this payment, in document order.
    pub documentos_relacionados: Vec<RelatedDocument>,
}

/// A document related to a payment, with running balances.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelatedDocument {
    /// UUID of the original invoice being paid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_documento: Option<String>,

    /// Series of the original invoice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serie: Option<String>,

    /// Folio of the original invoice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folio: Option<String>,

    /// Currency of the related document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moneda: Option<String>,

    /// Balance before this payment (0 when absent).
    pub imp_saldo_ant: Decimal,

    /// Amount paid (0 when absent).
    pub imp_pagado: Decimal,

    /// Remaining balance (0 when absent).
    pub imp_saldo_insoluto: Decimal,

    /// Transferred taxes attached to this related document.
    pub traslados: Vec<TaxEntry>,
}

impl CfdiRecord {
    /// Stamp UUID, when the document was stamped.
    pub fn uuid(&self) -> Option<&str> {
        self.stamp.as_ref().and_then(|s| s.uuid.as_deref())
    }
}
