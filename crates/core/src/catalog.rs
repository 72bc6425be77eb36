//! Static reference catalogs: prescription templates and prescribable medications.
//!
//! A template is only a selection aid. Picking one narrows which catalog medications are
//! offered while composing; it has no other effect on the document.
//!
//! The `has_interactions` flag on a catalog entry drives the "(!)" hint next to the drug name
//! when it is offered. It is maintained separately from the interaction rule table in
//! [`crate::interactions`] and is never consulted by the evaluator.

use crate::constants::GENERAL_TEMPLATE_ID;
use crate::{CoreError, CoreResult};
use serde::Serialize;

/// A named filter bucket for the medication catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PrescriptionTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// One prescribable drug in the reference catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CatalogMedication {
    pub id: &'static str,
    pub name: &'static str,
    /// Matches a template id.
    pub category: &'static str,
    pub has_interactions: bool,
}

impl CatalogMedication {
    /// Name as offered for selection, with the interaction hint appended when flagged.
    pub fn display_name(&self) -> String {
        if self.has_interactions {
            format!("{} (!)", self.name)
        } else {
            self.name.to_owned()
        }
    }
}

static TEMPLATES: [PrescriptionTemplate; 5] = [
    PrescriptionTemplate {
        id: "general",
        name: "General Practice",
        description: "Standard prescription template for general consultations",
    },
    PrescriptionTemplate {
        id: "cardiology",
        name: "Cardiology",
        description: "Template with common cardiac medications and follow-up instructions",
    },
    PrescriptionTemplate {
        id: "nephrology",
        name: "Nephrology",
        description: "Specialized for kidney-related conditions with dosage adjustments",
    },
    PrescriptionTemplate {
        id: "pediatrics",
        name: "Pediatrics",
        description: "Age-appropriate dosing and child-friendly instructions",
    },
    PrescriptionTemplate {
        id: "orthopedics",
        name: "Orthopedics",
        description: "Template with pain management and physical therapy instructions",
    },
];

const fn drug(
    id: &'static str,
    name: &'static str,
    category: &'static str,
    has_interactions: bool,
) -> CatalogMedication {
    CatalogMedication {
        id,
        name,
        category,
        has_interactions,
    }
}

static MEDICATIONS: [CatalogMedication; 12] = [
    drug("med1", "Atorvastatin", "cardiology", false),
    drug("med2", "Metoprolol", "cardiology", false),
    drug("med3", "Amlodipine", "cardiology", false),
    drug("med4", "Lisinopril", "cardiology", false),
    drug("med5", "Furosemide", "nephrology", false),
    drug("med6", "Spironolactone", "nephrology", false),
    drug("med7", "Paracetamol", "general", false),
    drug("med8", "Ibuprofen", "general", false),
    drug("med9", "Amoxicillin", "general", false),
    drug("med10", "Cetirizine", "general", false),
    drug("med11", "Warfarin", "cardiology", true),
    drug("med12", "Ciprofloxacin", "general", true),
];

/// All prescription templates in display order.
pub fn templates() -> &'static [PrescriptionTemplate] {
    &TEMPLATES
}

pub fn find_template(id: &str) -> Option<&'static PrescriptionTemplate> {
    TEMPLATES.iter().find(|t| t.id == id)
}

/// Like [`find_template`] but fails with [`CoreError::UnknownTemplate`].
pub fn require_template(id: &str) -> CoreResult<&'static PrescriptionTemplate> {
    find_template(id).ok_or_else(|| CoreError::UnknownTemplate(id.to_owned()))
}

/// The full medication catalog in definition order.
pub fn medication_catalog() -> &'static [CatalogMedication] {
    &MEDICATIONS
}

/// Looks a drug up by its exact display name.
pub fn find_medication(name: &str) -> Option<&'static CatalogMedication> {
    MEDICATIONS.iter().find(|m| m.name == name)
}

/// Medications offered while composing under `template_id`.
///
/// The `general` template offers the whole catalog; any other id offers the entries whose
/// category equals it, so an unknown id offers nothing.
pub fn medications_for_template(template_id: &str) -> Vec<&'static CatalogMedication> {
    MEDICATIONS
        .iter()
        .filter(|m| template_id == GENERAL_TEMPLATE_ID || m.category == template_id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn general_template_offers_full_catalog() {
        let offered = medications_for_template("general");
        assert_eq!(offered.len(), medication_catalog().len());
        assert!(offered
            .iter()
            .zip(medication_catalog())
            .all(|(a, b)| *a == b));
    }

    #[test]
    fn cardiology_template_offers_only_cardiology() {
        let offered = medications_for_template("cardiology");
        let names: Vec<_> = offered.iter().map(|m| m.name).collect();
        assert_eq!(
            names,
            ["Atorvastatin", "Metoprolol", "Amlodipine", "Lisinopril", "Warfarin"]
        );
        assert!(offered.iter().all(|m| m.category == "cardiology"));
    }

    #[test]
    fn template_without_catalog_entries_offers_nothing() {
        assert!(find_template("pediatrics").is_some());
        assert!(medications_for_template("pediatrics").is_empty());
        assert!(medications_for_template("dermatology").is_empty());
    }

    #[test]
    fn require_template_reports_unknown_id() {
        assert_eq!(require_template("nephrology").expect("known").name, "Nephrology");
        let err = require_template("oncology").expect_err("unknown");
        assert!(matches!(err, CoreError::UnknownTemplate(id) if id == "oncology"));
    }

    #[test]
    fn flagged_entries_carry_display_hint() {
        let warfarin = find_medication("Warfarin").expect("in catalog");
        assert_eq!(warfarin.display_name(), "Warfarin (!)");
        let paracetamol = find_medication("Paracetamol").expect("in catalog");
        assert_eq!(paracetamol.display_name(), "Paracetamol");
        assert!(find_medication("warfarin").is_none());
    }

    #[test]
    fn every_category_names_a_template() {
        for med in medication_catalog() {
            assert!(find_template(med.category).is_some(), "{}", med.name);
        }
    }
}
