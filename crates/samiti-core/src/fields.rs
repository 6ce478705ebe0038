//! Typed field schema and normalization for the registration form.
//!
//! Raw multipart fields arrive as string scalars (possibly repeated). Each
//! known field is declared once in [`REGISTRATION_FIELDS`] with its kind and
//! default, and [`NormalizedFields::normalize`] applies the schema uniformly:
//! trimming, boolean/number coercion, and defaulting. Unknown fields are
//! ignored. Email is normalized separately because its emptiness is a
//! validation failure rather than a default.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;

/// How a raw field value is coerced.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// Trimmed string; absent becomes the empty string.
    Text,
    /// Trimmed string; absent or empty after trim becomes `None`.
    OptionalText,
    /// True iff the lowercased value is "true", "1", or "yes".
    Bool,
    /// Decimal; absent or unparsable falls back to the default.
    Number { default: i64 },
    /// Opaque enum tag passed through to the store; absent falls back to the
    /// default. Values outside the store's enum are rejected there, not here.
    EnumTag { default: &'static str },
}

/// One declared form field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

/// Schema for every non-credential registration field.
pub const REGISTRATION_FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "sectorNumber", kind: FieldKind::Text },
    FieldSpec { name: "roadNumber", kind: FieldKind::Text },
    FieldSpec { name: "plotNumber", kind: FieldKind::Text },
    FieldSpec { name: "plotSize", kind: FieldKind::Text },
    FieldSpec { name: "ownershipProofType", kind: FieldKind::EnumTag { default: "LD_TAX_RECEIPT" } },
    FieldSpec { name: "ownerNameEnglish", kind: FieldKind::Text },
    FieldSpec { name: "ownerNameBangla", kind: FieldKind::Text },
    FieldSpec { name: "contactNumber", kind: FieldKind::Text },
    FieldSpec { name: "nidNumber", kind: FieldKind::Text },
    FieldSpec { name: "presentAddress", kind: FieldKind::Text },
    FieldSpec { name: "permanentAddress", kind: FieldKind::Text },
    FieldSpec { name: "paymentMethod", kind: FieldKind::EnumTag { default: "BKASH" } },
    FieldSpec { name: "bkashTransactionId", kind: FieldKind::OptionalText },
    FieldSpec { name: "bkashAccountNumber", kind: FieldKind::OptionalText },
    FieldSpec { name: "bankAccountNumberFrom", kind: FieldKind::OptionalText },
    FieldSpec { name: "membershipFee", kind: FieldKind::Number { default: 1020 } },
    FieldSpec { name: "agreeDataUse", kind: FieldKind::Bool },
];

/// A normalized field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    OptionalText(Option<String>),
    Bool(bool),
    Number(Decimal),
}

/// Schema-normalized registration fields with typed accessors.
#[derive(Debug, Clone)]
pub struct NormalizedFields(BTreeMap<&'static str, FieldValue>);

impl NormalizedFields {
    /// Apply [`REGISTRATION_FIELDS`] to the raw field map. A repeated field
    /// resolves to its first value, matching the file-slot resolution rule.
    pub fn normalize(raw: &HashMap<String, Vec<String>>) -> Self {
        let mut values = BTreeMap::new();
        for spec in REGISTRATION_FIELDS {
            let first = raw
                .get(spec.name)
                .and_then(|vs| vs.first())
                .map(String::as_str);
            values.insert(spec.name, coerce(spec.kind, first));
        }
        NormalizedFields(values)
    }

    /// Trimmed text field; empty string when absent.
    pub fn text(&self, name: &str) -> String {
        match self.0.get(name) {
            Some(FieldValue::Text(s)) => s.clone(),
            _ => String::new(),
        }
    }

    /// Optional trimmed text field; `None` when absent or empty.
    pub fn optional_text(&self, name: &str) -> Option<String> {
        match self.0.get(name) {
            Some(FieldValue::OptionalText(v)) => v.clone(),
            _ => None,
        }
    }

    pub fn boolean(&self, name: &str) -> bool {
        matches!(self.0.get(name), Some(FieldValue::Bool(true)))
    }

    /// Numeric field; the schema default is already applied during
    /// normalization, so absence here only happens for unknown names.
    pub fn number(&self, name: &str) -> Decimal {
        match self.0.get(name) {
            Some(FieldValue::Number(n)) => *n,
            _ => Decimal::ZERO,
        }
    }
}

fn coerce(kind: FieldKind, raw: Option<&str>) -> FieldValue {
    match kind {
        FieldKind::Text => FieldValue::Text(raw.unwrap_or_default().trim().to_string()),
        FieldKind::OptionalText => {
            let trimmed = raw.unwrap_or_default().trim();
            FieldValue::OptionalText((!trimmed.is_empty()).then(|| trimmed.to_string()))
        }
        FieldKind::Bool => {
            let s = raw.unwrap_or_default().trim().to_lowercase();
            FieldValue::Bool(s == "true" || s == "1" || s == "yes")
        }
        FieldKind::Number { default } => {
            let parsed = raw
                .and_then(|s| s.trim().parse::<Decimal>().ok())
                .unwrap_or_else(|| Decimal::from(default));
            FieldValue::Number(parsed)
        }
        FieldKind::EnumTag { default } => {
            let trimmed = raw.unwrap_or_default().trim();
            let tag = if trimmed.is_empty() { default } else { trimmed };
            FieldValue::Text(tag.to_string())
        }
    }
}

/// Lowercase and trim an email value. Emptiness is the caller's validation
/// failure, not a default.
pub fn normalize_email(raw: Option<&str>) -> String {
    raw.unwrap_or_default().trim().to_lowercase()
}
