//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into the core. Nothing in this
//! crate reads environment variables itself; binaries read them and hand the raw values to the
//! parsing helpers below.

use crate::catalog;
use crate::constants::{DEFAULT_DOCTOR_ID, DEFAULT_DOCTOR_NAME, GENERAL_TEMPLATE_ID};
use crate::prescription::{PatientRef, Prescriber, Prescription};
use crate::{CoreError, CoreResult};
use chrono::NaiveDate;
use erx_types::LanguageMode;

/// Core configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoreConfig {
    default_language: LanguageMode,
    default_template: String,
    prescriber: Prescriber,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            default_language: LanguageMode::English,
            default_template: GENERAL_TEMPLATE_ID.to_owned(),
            prescriber: Prescriber {
                id: DEFAULT_DOCTOR_ID.to_owned(),
                name: DEFAULT_DOCTOR_NAME.to_owned(),
                clinic: None,
            },
        }
    }
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::UnknownTemplate`] if `default_template` is not in the catalog.
    /// - [`CoreError::InvalidInput`] if the prescriber id or name is blank.
    pub fn new(
        default_language: LanguageMode,
        default_template: String,
        prescriber: Prescriber,
    ) -> CoreResult<Self> {
        catalog::require_template(&default_template)?;
        if prescriber.id.trim().is_empty() {
            return Err(CoreError::InvalidInput("prescriber id cannot be empty".into()));
        }
        if prescriber.name.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "prescriber name cannot be empty".into(),
            ));
        }

        Ok(Self {
            default_language,
            default_template,
            prescriber,
        })
    }

    pub fn default_language(&self) -> LanguageMode {
        self.default_language
    }

    pub fn default_template(&self) -> &str {
        &self.default_template
    }

    pub fn prescriber(&self) -> &Prescriber {
        &self.prescriber
    }

    /// Starts a draft for `patient` with this configuration's prescriber, template and
    /// language.
    pub fn new_draft(
        &self,
        patient: PatientRef,
        diagnosis: impl Into<String>,
        created_date: NaiveDate,
    ) -> CoreResult<Prescription> {
        let mut draft =
            Prescription::draft(patient, self.prescriber.clone(), diagnosis, created_date);
        draft.set_template(&self.default_template)?;
        draft.language = self.default_language;
        Ok(draft)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse the display language from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns English.
pub fn language_from_env_value(value: Option<String>) -> CoreResult<LanguageMode> {
    let parsed = non_blank(value)
        .map(|v| v.parse::<LanguageMode>())
        .transpose()?;
    Ok(parsed.unwrap_or_default())
}

/// Parse the default template id from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns `general`.
pub fn template_from_env_value(value: Option<String>) -> CoreResult<String> {
    match non_blank(value) {
        Some(template) => Ok(catalog::require_template(&template)?.id.to_owned()),
        None => Ok(GENERAL_TEMPLATE_ID.to_owned()),
    }
}

/// Build the prescriber from optional id, name and clinic values, falling back to defaults.
pub fn prescriber_from_env_values(
    id: Option<String>,
    name: Option<String>,
    clinic: Option<String>,
) -> Prescriber {
    Prescriber {
        id: non_blank(id).unwrap_or_else(|| DEFAULT_DOCTOR_ID.to_owned()),
        name: non_blank(name).unwrap_or_else(|| DEFAULT_DOCTOR_NAME.to_owned()),
        clinic: non_blank(clinic),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use erx_types::PrescriptionStatus;

    #[test]
    fn language_defaults_to_english() {
        assert_eq!(language_from_env_value(None).expect("ok"), LanguageMode::English);
        assert_eq!(
            language_from_env_value(Some("  ".into())).expect("ok"),
            LanguageMode::English
        );
        assert_eq!(
            language_from_env_value(Some("Both".into())).expect("ok"),
            LanguageMode::Both
        );
    }

    #[test]
    fn language_rejects_unknown_value() {
        let err = language_from_env_value(Some("tamil".into())).expect_err("unknown");
        assert!(matches!(err, CoreError::Text(_)));
    }

    #[test]
    fn template_must_be_in_catalog() {
        assert_eq!(template_from_env_value(None).expect("ok"), "general");
        assert_eq!(
            template_from_env_value(Some(" cardiology ".into())).expect("ok"),
            "cardiology"
        );
        let err = template_from_env_value(Some("oncology".into())).expect_err("unknown");
        assert!(matches!(err, CoreError::UnknownTemplate(_)));
    }

    #[test]
    fn prescriber_falls_back_to_defaults() {
        let prescriber = prescriber_from_env_values(None, Some(" ".into()), None);
        assert_eq!(prescriber.id, "doc1");
        assert_eq!(prescriber.name, "Dr. Rajesh Kapoor");
        assert_eq!(prescriber.clinic, None);
    }

    #[test]
    fn new_rejects_blank_prescriber() {
        let prescriber = Prescriber {
            id: "doc2".into(),
            name: "".into(),
            clinic: None,
        };
        let err = CoreConfig::new(LanguageMode::Hindi, "general".into(), prescriber)
            .expect_err("blank name");
        assert!(matches!(err, CoreError::InvalidInput(msg) if msg.contains("name")));
    }

    #[test]
    fn new_draft_applies_configuration() {
        let cfg = CoreConfig::new(
            LanguageMode::Hindi,
            "nephrology".into(),
            prescriber_from_env_values(Some("doc7".into()), Some("Dr. Mehta".into()), None),
        )
        .expect("valid config");

        let draft = cfg
            .new_draft(
                PatientRef::new("p1", "Sunita Rao"),
                "CKD stage 3",
                NaiveDate::from_ymd_opt(2024, 3, 1).expect("date"),
            )
            .expect("draft");

        assert_eq!(draft.status(), PrescriptionStatus::Draft);
        assert_eq!(draft.template(), Some("nephrology"));
        assert_eq!(draft.language, LanguageMode::Hindi);
        assert_eq!(draft.prescriber.id, "doc7");
    }
}
