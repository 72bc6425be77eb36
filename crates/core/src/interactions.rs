//! Medication interaction evaluation.
//!
//! The evaluator checks a list of medication display names against a small static table of
//! pairwise rules. A rule fires when both of its drug names appear anywhere in the list;
//! matching is exact and case-sensitive. When several rules could fire only the first one in
//! table order is reported.
//!
//! The rule data is illustrative and carries no clinical authority.

use serde::Serialize;

/// A pair of drugs that should not be prescribed together without review.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct InteractionRule {
    pub drugs: [&'static str; 2],
    pub details: &'static str,
}

impl InteractionRule {
    /// Whether `name` is one of the two drugs of this rule.
    pub fn involves(&self, name: &str) -> bool {
        self.drugs.iter().any(|drug| *drug == name)
    }

    fn fires_for<S: AsRef<str>>(&self, names: &[S]) -> bool {
        self.drugs
            .iter()
            .all(|drug| names.iter().any(|n| n.as_ref() == *drug))
    }
}

static INTERACTION_RULES: [InteractionRule; 2] = [
    InteractionRule {
        drugs: ["Warfarin", "Ibuprofen"],
        details:
            "Warfarin + Ibuprofen: Increased risk of bleeding. Consider alternative pain reliever.",
    },
    InteractionRule {
        drugs: ["Lisinopril", "Spironolactone"],
        details: "Lisinopril + Spironolactone: Monitor for hyperkalemia. Consider reducing dosage.",
    },
];

/// The rule table in evaluation order.
pub fn interaction_rules() -> &'static [InteractionRule] {
    &INTERACTION_RULES
}

/// Outcome of [`evaluate_interactions`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InteractionVerdict {
    rule: Option<&'static InteractionRule>,
}

impl InteractionVerdict {
    pub const NONE: InteractionVerdict = InteractionVerdict { rule: None };

    pub fn has_interaction(&self) -> bool {
        self.rule.is_some()
    }

    /// Explanation of the matched rule, absent when nothing fired.
    pub fn details(&self) -> Option<&'static str> {
        self.rule.map(|r| r.details)
    }

    /// The rule that fired.
    pub fn rule(&self) -> Option<&'static InteractionRule> {
        self.rule
    }
}

impl Serialize for InteractionVerdict {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("InteractionVerdict", 3)?;
        state.serialize_field("has_interaction", &self.has_interaction())?;
        state.serialize_field("details", &self.details())?;
        state.serialize_field("drugs", &self.rule.map(|r| r.drugs))?;
        state.end()
    }
}

/// Evaluates `names` against the interaction rule table.
///
/// Duplicates, unknown names and lists shorter than two are all valid input; they simply do
/// not fire anything.
pub fn evaluate_interactions<S: AsRef<str>>(names: &[S]) -> InteractionVerdict {
    let rule = INTERACTION_RULES.iter().find(|rule| rule.fires_for(names));
    match rule {
        Some(rule) => tracing::debug!(drugs = ?rule.drugs, "interaction rule fired"),
        None => tracing::debug!(count = names.len(), "no interaction rule fired"),
    }
    InteractionVerdict { rule }
}
