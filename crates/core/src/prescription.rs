//! Prescription documents and their lifecycle.
//!
//! A prescription starts as an unsaved draft with no id. Medications may only change while it
//! is a draft. Signing applies the prescriber's display-only signature marker; sending hands it
//! to the patient. Status never moves backwards.

use crate::composer::MedicationList;
use crate::constants::GENERAL_TEMPLATE_ID;
use crate::ids::PrescriptionId;
use crate::medication::Medication;
use crate::{catalog, CoreError, CoreResult};
use chrono::NaiveDate;
use erx_types::{LanguageMode, PrescriptionStatus};

/// Who the prescription is for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatientRef {
    pub id: String,
    pub name: String,
    pub age: Option<String>,
    pub gender: Option<String>,
}

impl PatientRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            age: None,
            gender: None,
        }
    }
}

/// Who wrote the prescription.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prescriber {
    pub id: String,
    pub name: String,
    pub clinic: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prescription {
    pub(crate) id: Option<PrescriptionId>,
    pub patient: PatientRef,
    pub prescriber: Prescriber,
    pub(crate) medications: Vec<Medication>,
    pub diagnosis: String,
    pub vitals: Option<String>,
    pub created_date: NaiveDate,
    pub notes: Option<String>,
    pub follow_up_date: Option<NaiveDate>,
    pub(crate) status: PrescriptionStatus,
    pub(crate) template: Option<String>,
    pub language: LanguageMode,
}

impl Prescription {
    /// New unsaved draft under the `general` template, displayed in English.
    pub fn draft(
        patient: PatientRef,
        prescriber: Prescriber,
        diagnosis: impl Into<String>,
        created_date: NaiveDate,
    ) -> Self {
        Self {
            id: None,
            patient,
            prescriber,
            medications: Vec::new(),
            diagnosis: diagnosis.into(),
            vitals: None,
            created_date,
            notes: None,
            follow_up_date: None,
            status: PrescriptionStatus::Draft,
            template: Some(GENERAL_TEMPLATE_ID.to_owned()),
            language: LanguageMode::English,
        }
    }

    pub fn id(&self) -> Option<&PrescriptionId> {
        self.id.as_ref()
    }

    pub fn medications(&self) -> &[Medication] {
        &self.medications
    }

    pub fn status(&self) -> PrescriptionStatus {
        self.status
    }

    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    pub fn is_editable(&self) -> bool {
        self.status == PrescriptionStatus::Draft
    }

    fn ensure_editable(&self) -> CoreResult<()> {
        if self.is_editable() {
            Ok(())
        } else {
            Err(CoreError::NotEditable(self.status))
        }
    }

    /// Sets the template used to filter offered medications.
    pub fn set_template(&mut self, template: &str) -> CoreResult<()> {
        self.ensure_editable()?;
        catalog::require_template(template)?;
        self.template = Some(template.to_owned());
        Ok(())
    }

    /// Opens the current medications for editing under this prescription's template.
    pub fn edit_medications(&self) -> CoreResult<MedicationList> {
        self.ensure_editable()?;
        MedicationList::new(
            self.medications.clone(),
            self.template().unwrap_or(GENERAL_TEMPLATE_ID),
        )
    }

    /// Replaces the medications with the contents of an edited list.
    ///
    /// The list's template becomes the prescription's template.
    pub fn set_medications(&mut self, list: MedicationList) -> CoreResult<()> {
        self.ensure_editable()?;
        self.template = Some(list.template().to_owned());
        self.medications = list.into_medications();
        Ok(())
    }

    /// Saves the draft, allocating an id on first save.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NoMedications`] if nothing has been prescribed.
    pub fn save(&mut self) -> CoreResult<&PrescriptionId> {
        if self.medications.is_empty() {
            return Err(CoreError::NoMedications);
        }
        let id = self.id.get_or_insert_with(PrescriptionId::generate);
        tracing::info!(prescription = %id, status = %self.status, "prescription saved");
        Ok(id)
    }

    /// Applies the prescriber's signature.
    ///
    /// # Errors
    ///
    /// - [`CoreError::InvalidStatusTransition`] unless the prescription is a draft.
    /// - [`CoreError::NoMedications`] if nothing has been prescribed.
    pub fn sign(&mut self) -> CoreResult<()> {
        self.transition(PrescriptionStatus::Signed)?;
        tracing::info!(prescriber = %self.prescriber.name, "prescription signed");
        Ok(())
    }

    /// Records that the signed prescription was sent to the patient.
    pub fn mark_sent(&mut self) -> CoreResult<()> {
        self.transition(PrescriptionStatus::Sent)?;
        tracing::info!(patient = %self.patient.name, "prescription sent");
        Ok(())
    }

    fn transition(&mut self, to: PrescriptionStatus) -> CoreResult<()> {
        if !self.status.can_transition_to(to) {
            return Err(CoreError::InvalidStatusTransition {
                from: self.status,
                to,
            });
        }
        if to == PrescriptionStatus::Signed {
            self.save()?;
        }
        self.status = to;
        Ok(())
    }
}
