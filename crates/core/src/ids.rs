//! Identifiers for prescriptions and their medication line items.
//!
//! Both identifiers are opaque strings: documents loaded from disk may carry any non-blank id
//! (the mock data uses `1`, `rx3`, ...). Freshly generated ids use the canonical uuid form,
//! 32 lowercase hex characters without hyphens, so they never collide within a prescription.

use crate::constants::MEDICATION_ID_PREFIX;
use crate::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

fn canonical_uuid() -> String {
    Uuid::new_v4().simple().to_string()
}

fn parse_opaque(kind: &str, input: &str) -> CoreResult<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(CoreError::InvalidInput(format!("{kind} id cannot be empty")));
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(CoreError::InvalidInput(format!(
            "{kind} id must not contain whitespace, got: '{input}'"
        )));
    }
    Ok(trimmed.to_owned())
}

/// Identity of one medication line item, unique within its prescription.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MedicationId(String);

impl MedicationId {
    /// Allocates a fresh id of the form `rx<32 hex>`.
    pub fn generate() -> Self {
        Self(format!("{MEDICATION_ID_PREFIX}{}", canonical_uuid()))
    }

    /// Wraps an externally supplied id.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInput`] for blank ids or ids containing whitespace.
    pub fn parse(input: &str) -> CoreResult<Self> {
        parse_opaque("medication", input).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MedicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for MedicationId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<MedicationId> for String {
    fn from(id: MedicationId) -> Self {
        id.0
    }
}

/// Identity of a saved prescription. Unsaved drafts have none.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PrescriptionId(String);

impl PrescriptionId {
    pub fn generate() -> Self {
        Self(canonical_uuid())
    }

    /// Wraps an externally supplied id.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInput`] for blank ids or ids containing whitespace.
    pub fn parse(input: &str) -> CoreResult<Self> {
        parse_opaque("prescription", input).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PrescriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PrescriptionId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PrescriptionId> for String {
    fn from(id: PrescriptionId) -> Self {
        id.0
    }
}
