//! Medication list editing with automatic interaction annotation.
//!
//! [`MedicationList`] is what a prescription form holds while the prescriber adds and removes
//! drugs. Every change re-runs the interaction evaluator once at least two medications are on
//! the list and rewrites the annotations:
//! - a medication is implicated when its name occurs inside the verdict's details text;
//! - every other medication has its annotation cleared.
//!
//! With fewer than two medications the evaluator is skipped and nothing stays flagged.

use crate::catalog::{self, CatalogMedication};
use crate::constants::{GENERAL_TEMPLATE_ID, MIN_MEDICATIONS_FOR_INTERACTION_CHECK};
use crate::interactions::{evaluate_interactions, InteractionVerdict};
use crate::medication::Medication;
use crate::{CoreError, CoreResult};

#[derive(Clone, Debug)]
pub struct MedicationList {
    medications: Vec<Medication>,
    template: String,
    verdict: InteractionVerdict,
}

impl Default for MedicationList {
    fn default() -> Self {
        Self {
            medications: Vec::new(),
            template: GENERAL_TEMPLATE_ID.to_owned(),
            verdict: InteractionVerdict::NONE,
        }
    }
}

impl MedicationList {
    /// Starts a list from existing line items under `template`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::UnknownTemplate`] if `template` is not in the catalog.
    /// - [`CoreError::DuplicateMedicationId`] if two initial items share an id.
    pub fn new(initial: Vec<Medication>, template: &str) -> CoreResult<Self> {
        catalog::require_template(template)?;
        let mut list = Self {
            medications: Vec::with_capacity(initial.len()),
            template: template.to_owned(),
            verdict: InteractionVerdict::NONE,
        };
        for medication in initial {
            list.push_unique(medication)?;
        }
        list.reevaluate();
        Ok(list)
    }

    pub fn medications(&self) -> &[Medication] {
        &self.medications
    }

    pub fn into_medications(self) -> Vec<Medication> {
        self.medications
    }

    pub fn len(&self) -> usize {
        self.medications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.medications.is_empty()
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Verdict from the most recent evaluation.
    pub fn verdict(&self) -> InteractionVerdict {
        self.verdict
    }

    /// Catalog entries offered for selection under the current template.
    pub fn offered_medications(&self) -> Vec<&'static CatalogMedication> {
        catalog::medications_for_template(&self.template)
    }

    /// Switches the template. Items already on the list are kept.
    pub fn set_template(&mut self, template: &str) -> CoreResult<()> {
        catalog::require_template(template)?;
        self.template = template.to_owned();
        Ok(())
    }

    /// Appends `medication` and re-evaluates interactions.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DuplicateMedicationId`] if the id is already on the list.
    pub fn add(&mut self, medication: Medication) -> CoreResult<InteractionVerdict> {
        self.push_unique(medication)?;
        Ok(self.reevaluate())
    }

    /// Removes the item at `index` and re-evaluates interactions.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MedicationIndexOutOfRange`] when `index` is past the end.
    pub fn remove(&mut self, index: usize) -> CoreResult<Medication> {
        if index >= self.medications.len() {
            return Err(CoreError::MedicationIndexOutOfRange {
                index,
                len: self.medications.len(),
            });
        }
        let removed = self.medications.remove(index);
        self.reevaluate();
        Ok(removed)
    }

    fn push_unique(&mut self, medication: Medication) -> CoreResult<()> {
        if self.medications.iter().any(|m| m.id() == medication.id()) {
            return Err(CoreError::DuplicateMedicationId(
                medication.id().to_string(),
            ));
        }
        self.medications.push(medication);
        Ok(())
    }

    fn reevaluate(&mut self) -> InteractionVerdict {
        self.verdict = annotate(&mut self.medications);
        if let Some(details) = self.verdict.details() {
            tracing::warn!(%details, "medication interaction detected");
        }
        self.verdict
    }
}

/// Evaluates `medications` and rewrites every interaction annotation from the verdict.
/// The YAML loader uses this too.
pub(crate) fn annotate(medications: &mut [Medication]) -> InteractionVerdict {
    let verdict = if medications.len() < MIN_MEDICATIONS_FOR_INTERACTION_CHECK {
        InteractionVerdict::NONE
    } else {
        let names: Vec<&str> = medications.iter().map(Medication::name).collect();
        evaluate_interactions(&names)
    };

    let details = verdict.details();
    for medication in medications.iter_mut() {
        let implicated = details.filter(|d| d.contains(medication.name()));
        medication.set_interaction(implicated);
    }
    verdict
}
