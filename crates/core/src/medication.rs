//! Medication line items.
//!
//! A [`Medication`] is built from a [`MedicationDraft`] once the four core fields (name,
//! dosage, frequency, duration) are filled in. After that the only thing that changes on it is
//! the interaction annotation, which the composer sets from the evaluator's verdict.

use crate::ids::MedicationId;
use crate::{CoreError, CoreResult};
use erx_types::RequiredText;

/// One prescribed drug.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Medication {
    id: MedicationId,
    name: RequiredText,
    dosage: RequiredText,
    frequency: RequiredText,
    duration: RequiredText,
    instructions: Option<String>,
    timing: Option<String>,
    interaction: Option<String>,
}

impl Medication {
    pub fn id(&self) -> &MedicationId {
        &self.id
    }

    /// Display name, matched against the interaction rule table.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn dosage(&self) -> &str {
        self.dosage.as_str()
    }

    pub fn frequency(&self) -> &str {
        self.frequency.as_str()
    }

    pub fn duration(&self) -> &str {
        self.duration.as_str()
    }

    pub fn instructions(&self) -> Option<&str> {
        self.instructions.as_deref()
    }

    /// When to take it, e.g. "Morning" or "After meals".
    pub fn timing(&self) -> Option<&str> {
        self.timing.as_deref()
    }

    pub fn has_interaction(&self) -> bool {
        self.interaction.is_some()
    }

    /// Explanation of the interaction this medication is implicated in.
    pub fn interaction_details(&self) -> Option<&str> {
        self.interaction.as_deref()
    }

    pub(crate) fn set_interaction(&mut self, details: Option<&str>) {
        self.interaction = details.map(str::to_owned);
    }
}

/// A line item being filled in. Every field is optional until [`MedicationDraft::build`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MedicationDraft {
    pub id: Option<String>,
    pub name: Option<String>,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
    pub duration: Option<String>,
    pub instructions: Option<String>,
    pub timing: Option<String>,
}

fn required(field: &'static str, value: Option<String>) -> CoreResult<RequiredText> {
    value
        .as_deref()
        .and_then(|v| RequiredText::new(v).ok())
        .ok_or(CoreError::IncompleteMedication { field })
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

impl MedicationDraft {
    /// Shorthand for the four required fields.
    pub fn new(
        name: impl Into<String>,
        dosage: impl Into<String>,
        frequency: impl Into<String>,
        duration: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            dosage: Some(dosage.into()),
            frequency: Some(frequency.into()),
            duration: Some(duration.into()),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    pub fn with_timing(mut self, timing: impl Into<String>) -> Self {
        self.timing = Some(timing.into());
        self
    }

    /// Turns the draft into a [`Medication`].
    ///
    /// A missing id is generated. Blank optional fields are dropped.
    ///
    /// # Errors
    ///
    /// - [`CoreError::IncompleteMedication`] naming the first of name, dosage, frequency or
    ///   duration that is missing or blank.
    /// - [`CoreError::InvalidInput`] if a supplied id is not usable.
    pub fn build(self) -> CoreResult<Medication> {
        let name = required("name", self.name)?;
        let dosage = required("dosage", self.dosage)?;
        let frequency = required("frequency", self.frequency)?;
        let duration = required("duration", self.duration)?;

        let id = match self.id {
            Some(id) => MedicationId::parse(&id)?,
            None => MedicationId::generate(),
        };

        Ok(Medication {
            id,
            name,
            dosage,
            frequency,
            duration,
            instructions: optional(self.instructions),
            timing: optional(self.timing),
            interaction: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_complete_draft() {
        let med = MedicationDraft::new("Amlodipine", "5mg", "Once daily", "30 days")
            .with_id("rx1")
            .with_timing("Morning")
            .build()
            .expect("complete draft");

        assert_eq!(med.id().as_str(), "rx1");
        assert_eq!(med.name(), "Amlodipine");
        assert_eq!(med.timing(), Some("Morning"));
        assert_eq!(med.instructions(), None);
        assert!(!med.has_interaction());
        assert_eq!(med.interaction_details(), None);
    }

    #[test]
    fn generates_id_when_absent() {
        let med = MedicationDraft::new("Paracetamol", "500mg", "Every 6 hours", "5 days")
            .build()
            .expect("complete draft");
        assert!(med.id().as_str().starts_with("rx"));
    }

    #[test]
    fn reports_first_missing_required_field() {
        let err = MedicationDraft::default().build().expect_err("empty draft");
        assert!(matches!(err, CoreError::IncompleteMedication { field: "name" }));

        let draft = MedicationDraft {
            name: Some("Ibuprofen".into()),
            dosage: Some("400mg".into()),
            frequency: Some("   ".into()),
            duration: Some("3 days".into()),
            ..MedicationDraft::default()
        };
        let err = draft.build().expect_err("blank frequency");
        assert!(matches!(err, CoreError::IncompleteMedication { field: "frequency" }));
    }

    #[test]
    fn blank_optional_fields_are_dropped() {
        let med = MedicationDraft::new("Cetirizine", "10mg", "Once daily", "7 days")
            .with_instructions("  ")
            .with_timing(" At bedtime ")
            .build()
            .expect("complete draft");
        assert_eq!(med.instructions(), None);
        assert_eq!(med.timing(), Some("At bedtime"));
    }

    #[test]
    fn annotation_keeps_flag_and_details_together() {
        let mut med = MedicationDraft::new("Warfarin", "5mg", "Once daily", "30 days")
            .build()
            .expect("complete draft");
        med.set_interaction(Some("Warfarin + Ibuprofen: bleeding"));
        assert!(med.has_interaction());
        assert_eq!(med.interaction_details(), Some("Warfarin + Ibuprofen: bleeding"));

        med.set_interaction(None);
        assert!(!med.has_interaction());
        assert_eq!(med.interaction_details(), None);
    }
}
