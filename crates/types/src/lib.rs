//! Shared primitive types for the e-prescription workspace.
//!
//! - [`RequiredText`]: free text that must carry at least one visible character
//!   (medication name, dosage, frequency, duration).
//! - [`LanguageMode`]: the display language selected for a prescription.
//! - [`PrescriptionStatus`]: the closed lifecycle set of a prescription.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Errors produced while constructing or parsing the primitive types in this crate.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    /// The input was empty or whitespace only.
    #[error("text cannot be empty")]
    Empty,

    /// The input did not name a known language mode.
    #[error("unknown language mode '{0}' (expected english, hindi or both)")]
    UnknownLanguage(String),

    /// The input did not name a known prescription status.
    #[error("unknown prescription status '{0}' (expected draft, signed or sent)")]
    UnknownStatus(String),
}

/// Trimmed free text guaranteed to be non-blank.
///
/// Prescription line items are free text ("5mg", "Once daily", "30 days"); the only rule the
/// form applies is that the required ones are filled in. Surrounding whitespace is dropped on
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequiredText(String);

impl RequiredText {
    /// Builds a `RequiredText`, returning [`TextError::Empty`] when nothing but whitespace is
    /// supplied.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RequiredText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RequiredText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for RequiredText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RequiredText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        RequiredText::new(&raw).map_err(serde::de::Error::custom)
    }
}

/// Language a prescription is displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageMode {
    /// English only.
    #[default]
    English,
    /// Hindi where the term dictionary knows the phrase, English otherwise.
    Hindi,
    /// English with the Hindi rendering stacked underneath.
    Both,
}

impl LanguageMode {
    pub const ALL: [LanguageMode; 3] = [Self::English, Self::Hindi, Self::Both];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Hindi => "hindi",
            Self::Both => "both",
        }
    }
}

impl fmt::Display for LanguageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageMode {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "english" | "en" => Ok(Self::English),
            "hindi" | "hi" => Ok(Self::Hindi),
            "both" | "bilingual" => Ok(Self::Both),
            _ => Err(TextError::UnknownLanguage(s.to_owned())),
        }
    }
}

/// Lifecycle state of a prescription.
///
/// Moves forward only: `draft` → `signed` → `sent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrescriptionStatus {
    #[default]
    Draft,
    Signed,
    Sent,
}

impl PrescriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Signed => "signed",
            Self::Sent => "sent",
        }
    }

    /// Whether `next` is a legal step from this status.
    pub fn can_transition_to(&self, next: PrescriptionStatus) -> bool {
        matches!(
            (self, next),
            (Self::Draft, Self::Signed) | (Self::Signed, Self::Sent)
        )
    }
}

impl fmt::Display for PrescriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrescriptionStatus {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "signed" => Ok(Self::Signed),
            "sent" => Ok(Self::Sent),
            _ => Err(TextError::UnknownStatus(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_trims_input() {
        let text = RequiredText::new("  5mg ").expect("non-blank");
        assert_eq!(text.as_str(), "5mg");
    }

    #[test]
    fn required_text_rejects_blank() {
        assert_eq!(RequiredText::new(""), Err(TextError::Empty));
        assert_eq!(RequiredText::new(" \t\n"), Err(TextError::Empty));
    }

    #[test]
    fn required_text_deserialize_rejects_blank() {
        let err = serde_json::from_str::<RequiredText>("\"   \"").expect_err("blank");
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn language_mode_parses_aliases() {
        assert_eq!("English".parse(), Ok(LanguageMode::English));
        assert_eq!("hi".parse(), Ok(LanguageMode::Hindi));
        assert_eq!("bilingual".parse(), Ok(LanguageMode::Both));
        assert!(matches!(
            "french".parse::<LanguageMode>(),
            Err(TextError::UnknownLanguage(v)) if v == "french"
        ));
    }

    #[test]
    fn language_mode_serialises_lowercase() {
        let json = serde_json::to_string(&LanguageMode::Both).expect("serialise");
        assert_eq!(json, "\"both\"");
        assert_eq!(LanguageMode::default(), LanguageMode::English);
    }

    #[test]
    fn status_only_moves_forward() {
        use PrescriptionStatus::*;
        assert!(Draft.can_transition_to(Signed));
        assert!(Signed.can_transition_to(Sent));
        assert!(!Sent.can_transition_to(Draft));
        assert!(!Signed.can_transition_to(Draft));
        assert!(!Draft.can_transition_to(Sent));
        assert!(!Draft.can_transition_to(Draft));
    }

    #[test]
    fn status_round_trips_through_str() {
        for status in [
            PrescriptionStatus::Draft,
            PrescriptionStatus::Signed,
            PrescriptionStatus::Sent,
        ] {
            assert_eq!(status.as_str().parse(), Ok(status));
        }
    }
}
