//! YAML form of a prescription.
//!
//! This module keeps a strict wire model separate from the domain types:
//! - the wire structs mirror the file layout exactly and reject unknown keys;
//! - translation into [`Prescription`] re-checks everything the domain constructors enforce
//!   (required medication fields, unique ids, known template, ISO dates);
//! - the interaction flag and its details are stored separately on disk and must agree, and
//!   both must match what the interaction rules say about the listed medications;
//! - a signed or sent document must carry an id and at least one medication.
//!
//! Dates use `YYYY-MM-DD`. Enumerations are lowercase (`draft`, `english`, ...).

use crate::catalog;
use crate::composer::annotate;
use crate::constants::WIRE_DATE_FORMAT;
use crate::ids::PrescriptionId;
use crate::medication::{Medication, MedicationDraft};
use crate::prescription::{PatientRef, Prescriber, Prescription};
use crate::{CoreError, CoreResult};
use chrono::NaiveDate;
use erx_types::{LanguageMode, PrescriptionStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

// ============================================================================
// Public operations
// ============================================================================

/// Prescription YAML operations.
///
/// Zero-sized namespace; all methods are associated functions.
pub struct PrescriptionDocument;

impl PrescriptionDocument {
    /// Parses a prescription from YAML text.
    ///
    /// Schema mismatches are reported with the path of the offending field (for example
    /// `medications[1].dosage`) via `serde_path_to_error`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Translation`] if the YAML does not match the wire schema or a value
    /// fails domain validation, and [`CoreError::UnknownTemplate`] for an unknown template id.
    pub fn parse(yaml_text: &str) -> CoreResult<Prescription> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

        let wire = match serde_path_to_error::deserialize::<_, PrescriptionWire>(deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() || path == "." {
                    "<root>"
                } else {
                    path.as_str()
                };
                return Err(CoreError::Translation(format!(
                    "prescription schema mismatch at {path}: {source}"
                )));
            }
        };

        wire_to_domain(wire)
    }

    /// Renders a prescription as YAML text.
    pub fn render(prescription: &Prescription) -> CoreResult<String> {
        let wire = domain_to_wire(prescription);
        Ok(serde_yaml::to_string(&wire)?)
    }
}

/// Reads and parses a prescription file.
pub fn read_prescription_file(path: &Path) -> CoreResult<Prescription> {
    let text = std::fs::read_to_string(path).map_err(CoreError::FileRead)?;
    tracing::debug!(path = %path.display(), "parsing prescription file");
    PrescriptionDocument::parse(&text)
}

/// Renders `prescription` and writes it to `path`, replacing any existing file.
pub fn write_prescription_file(path: &Path, prescription: &Prescription) -> CoreResult<()> {
    let text = PrescriptionDocument::render(prescription)?;
    std::fs::write(path, text).map_err(CoreError::FileWrite)
}

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct PrescriptionWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    patient: PatientWire,
    prescriber: PrescriberWire,
    #[serde(default)]
    medications: Vec<MedicationWire>,
    diagnosis: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    vitals: Option<String>,
    created_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    follow_up_date: Option<String>,
    status: PrescriptionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    template: Option<String>,
    #[serde(default)]
    language: LanguageMode,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct PatientWire {
    id: String,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    age: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    gender: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct PrescriberWire {
    id: String,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    clinic: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct MedicationWire {
    id: String,
    name: String,
    dosage: String,
    frequency: String,
    duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timing: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    has_interaction: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    interaction_details: Option<String>,
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

fn parse_date(field: &str, value: &str) -> CoreResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), WIRE_DATE_FORMAT).map_err(|e| {
        CoreError::Translation(format!(
            "{field} must be a YYYY-MM-DD date, got '{value}': {e}"
        ))
    })
}

fn medication_from_wire(index: usize, wire: MedicationWire) -> CoreResult<Medication> {
    let details = match (wire.has_interaction, wire.interaction_details) {
        (true, Some(details)) if !details.trim().is_empty() => Some(details),
        (false, None) => None,
        _ => {
            return Err(CoreError::Translation(format!(
                "medications[{index}]: has_interaction and interaction_details must be set together"
            )))
        }
    };

    let draft = MedicationDraft {
        id: Some(wire.id),
        name: Some(wire.name),
        dosage: Some(wire.dosage),
        frequency: Some(wire.frequency),
        duration: Some(wire.duration),
        instructions: wire.instructions,
        timing: wire.timing,
    };
    let mut medication = draft.build().map_err(|e| {
        CoreError::Translation(format!("medications[{index}]: {e}"))
    })?;
    medication.set_interaction(details.as_deref());
    Ok(medication)
}

fn wire_to_domain(wire: PrescriptionWire) -> CoreResult<Prescription> {
    let id = wire
        .id
        .as_deref()
        .map(PrescriptionId::parse)
        .transpose()
        .map_err(|e| CoreError::Translation(format!("id: {e}")))?;

    if let Some(template) = &wire.template {
        catalog::require_template(template)?;
    }

    let mut seen = HashSet::new();
    let mut medications = Vec::with_capacity(wire.medications.len());
    for (index, med) in wire.medications.into_iter().enumerate() {
        let medication = medication_from_wire(index, med)?;
        if !seen.insert(medication.id().clone()) {
            return Err(CoreError::DuplicateMedicationId(medication.id().to_string()));
        }
        medications.push(medication);
    }

    let mut expected = medications.clone();
    annotate(&mut expected);
    for (index, (loaded, computed)) in medications.iter().zip(&expected).enumerate() {
        if loaded.interaction_details() != computed.interaction_details() {
            return Err(CoreError::Translation(format!(
                "medications[{index}]: interaction annotation does not match the interaction rules"
            )));
        }
    }

    if wire.status != PrescriptionStatus::Draft {
        if medications.is_empty() {
            return Err(CoreError::NoMedications);
        }
        if id.is_none() {
            return Err(CoreError::Translation(format!(
                "id: required once {}",
                wire.status
            )));
        }
    }

    let created_date = parse_date("created_date", &wire.created_date)?;
    let follow_up_date = wire
        .follow_up_date
        .as_deref()
        .map(|d| parse_date("follow_up_date", d))
        .transpose()?;

    Ok(Prescription {
        id,
        patient: PatientRef {
            id: wire.patient.id,
            name: wire.patient.name,
            age: wire.patient.age,
            gender: wire.patient.gender,
        },
        prescriber: Prescriber {
            id: wire.prescriber.id,
            name: wire.prescriber.name,
            clinic: wire.prescriber.clinic,
        },
        medications,
        diagnosis: wire.diagnosis,
        vitals: wire.vitals,
        created_date,
        notes: wire.notes,
        follow_up_date,
        status: wire.status,
        template: wire.template,
        language: wire.language,
    })
}

fn domain_to_wire(rx: &Prescription) -> PrescriptionWire {
    PrescriptionWire {
        id: rx.id().map(ToString::to_string),
        patient: PatientWire {
            id: rx.patient.id.clone(),
            name: rx.patient.name.clone(),
            age: rx.patient.age.clone(),
            gender: rx.patient.gender.clone(),
        },
        prescriber: PrescriberWire {
            id: rx.prescriber.id.clone(),
            name: rx.prescriber.name.clone(),
            clinic: rx.prescriber.clinic.clone(),
        },
        medications: rx
            .medications()
            .iter()
            .map(|m| MedicationWire {
                id: m.id().to_string(),
                name: m.name().to_owned(),
                dosage: m.dosage().to_owned(),
                frequency: m.frequency().to_owned(),
                duration: m.duration().to_owned(),
                instructions: m.instructions().map(str::to_owned),
                timing: m.timing().map(str::to_owned),
                has_interaction: m.has_interaction(),
                interaction_details: m.interaction_details().map(str::to_owned),
            })
            .collect(),
        diagnosis: rx.diagnosis.clone(),
        vitals: rx.vitals.clone(),
        created_date: rx.created_date.format(WIRE_DATE_FORMAT).to_string(),
        notes: rx.notes.clone(),
        follow_up_date: rx
            .follow_up_date
            .map(|d| d.format(WIRE_DATE_FORMAT).to_string()),
        status: rx.status(),
        template: rx.template().map(str::to_owned),
        language: rx.language,
    }
}
