//! English → Hindi display text for prescriptions.
//!
//! Translation is a lookup in a fixed phrase dictionary, not a general translator. Lookups are
//! exact and case-sensitive, and anything the dictionary does not know falls back to the
//! English source unchanged. Patient-entered free text therefore usually stays in English even
//! when Hindi is selected.
//!
//! [`render_field`] is the single-phrase primitive. [`render_inline`] and [`SectionLabel`] are
//! the composed forms the prescription card uses for frequency/timing lines and for headings
//! whose Hindi text is fixed rather than looked up.

use erx_types::LanguageMode;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

static HINDI_TERMS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        // Patient info
        ("Patient", "रोगी"),
        ("Age", "उम्र"),
        ("Gender", "लिंग"),
        ("Diagnosis", "निदान"),
        ("Vitals", "महत्वपूर्ण लक्षण"),
        // Medication instructions
        ("Take", "लें"),
        ("tablet", "गोली"),
        ("capsule", "कैप्सूल"),
        ("syrup", "सिरप"),
        ("injection", "इंजेक्शन"),
        ("after meals", "खाने के बाद"),
        ("before meals", "खाने से पहले"),
        ("with meals", "खाने के साथ"),
        ("morning", "सुबह"),
        ("afternoon", "दोपहर"),
        ("evening", "शाम"),
        ("night", "रात"),
        ("daily", "रोज़"),
        ("twice daily", "दिन में दो बार"),
        ("three times a day", "दिन में तीन बार"),
        ("four times a day", "दिन में चार बार"),
        ("as needed", "जरूरत पड़ने पर"),
        ("for", "के लिए"),
        ("days", "दिन"),
        ("weeks", "सप्ताह"),
        ("months", "महीने"),
        // Instructions
        ("Take with food", "खाने के साथ लें"),
        ("Drink plenty of water", "पर्याप्त पानी पियें"),
        ("Avoid alcohol", "शराब से परहेज करें"),
        ("Store in a cool, dry place", "ठंडी और सूखी जगह पर रखें"),
        ("Keep out of reach of children", "बच्चों की पहुंच से दूर रखें"),
        // Follow-up
        ("Follow-up appointment", "फॉलो-अप अपॉइंटमेंट"),
        ("Contact in case of emergency", "आपातकाल में संपर्क करें"),
        ("Doctor", "डॉक्टर"),
        ("Clinic", "क्लिनिक"),
        ("Date", "तारीख"),
        ("Signature", "हस्ताक्षर"),
        // Common messages
        (
            "Please complete the full course of medication",
            "कृपया दवा का पूरा कोर्स पूरा करें",
        ),
        (
            "Contact immediately if symptoms worsen",
            "लक्षण बिगड़ने पर तुरंत संपर्क करें",
        ),
        (
            "Rest and hydration recommended",
            "आराम और हाइड्रेशन की सलाह दी जाती है",
        ),
        ("Digital Prescription", "डिजिटल प्रिस्क्रिप्शन"),
        ("Prescription", "प्रिस्क्रिप्शन"),
        ("WhatsApp for any concerns", "किसी भी चिंता के लिए WhatsApp करें"),
    ])
});

/// Dictionary entry for `text`, if any.
pub fn lookup_hindi(text: &str) -> Option<&'static str> {
    HINDI_TERMS.get(text).copied()
}

/// Hindi for `text`, or `text` itself when the dictionary has no entry.
pub fn translate_to_hindi(text: &str) -> &str {
    lookup_hindi(text).unwrap_or(text)
}

/// Number of phrases the dictionary knows.
pub fn dictionary_len() -> usize {
    HINDI_TERMS.len()
}

/// Display text produced by [`render_field`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderedText {
    /// One line, in whichever language was selected.
    Single { text: String },
    /// English over Hindi. `secondary` is absent when the caller marked the text as
    /// reading the same in both.
    Stacked {
        primary: String,
        secondary: Option<String>,
    },
}

impl RenderedText {
    /// First (or only) line.
    pub fn primary(&self) -> &str {
        match self {
            Self::Single { text } => text,
            Self::Stacked { primary, .. } => primary,
        }
    }

    pub fn secondary(&self) -> Option<&str> {
        match self {
            Self::Single { .. } => None,
            Self::Stacked { secondary, .. } => secondary.as_deref(),
        }
    }
}

impl fmt::Display for RenderedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.primary())?;
        if let Some(secondary) = self.secondary() {
            write!(f, "\n{secondary}")?;
        }
        Ok(())
    }
}

/// Renders one English phrase for `mode`.
pub fn render_field(text: &str, mode: LanguageMode) -> RenderedText {
    render_field_with(text, mode, false)
}

/// Like [`render_field`]; `same_in_both` drops the Hindi line in bilingual mode.
pub fn render_field_with(text: &str, mode: LanguageMode, same_in_both: bool) -> RenderedText {
    match mode {
        LanguageMode::English => RenderedText::Single {
            text: text.to_owned(),
        },
        LanguageMode::Hindi => RenderedText::Single {
            text: translate_to_hindi(text).to_owned(),
        },
        LanguageMode::Both => RenderedText::Stacked {
            primary: text.to_owned(),
            secondary: (!same_in_both).then(|| translate_to_hindi(text).to_owned()),
        },
    }
}

/// One-line form used inside medication lines: bilingual mode gives `"english / hindi"`.
pub fn render_inline(text: &str, mode: LanguageMode) -> String {
    match mode {
        LanguageMode::English => text.to_owned(),
        LanguageMode::Hindi => translate_to_hindi(text).to_owned(),
        LanguageMode::Both => format!("{text} / {}", translate_to_hindi(text)),
    }
}

/// Fixed card headings whose Hindi wording is set by hand instead of looked up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionLabel {
    Medications,
    Instructions,
    FollowUpAppointment,
    Doctor,
    DigitalSignature,
    Print,
    DownloadPdf,
}

impl SectionLabel {
    pub fn english(&self) -> &'static str {
        match self {
            Self::Medications => "Medications",
            Self::Instructions => "Instructions",
            Self::FollowUpAppointment => "Follow-up Appointment",
            Self::Doctor => "Doctor",
            Self::DigitalSignature => "Digital Signature",
            Self::Print => "Print",
            Self::DownloadPdf => "Download PDF",
        }
    }

    pub fn hindi(&self) -> &'static str {
        match self {
            Self::Medications => "दवाइयां",
            Self::Instructions => "निर्देश",
            Self::FollowUpAppointment => "फॉलो-अप अपॉइंटमेंट",
            Self::Doctor => "डॉक्टर",
            Self::DigitalSignature => "डिजिटल हस्ताक्षर",
            Self::Print => "प्रिंट करें",
            Self::DownloadPdf => "पीडीएफ डाउनलोड करें",
        }
    }

    /// Action buttons stay English-only in bilingual mode.
    fn is_action(&self) -> bool {
        matches!(self, Self::Print | Self::DownloadPdf)
    }

    pub fn render(&self, mode: LanguageMode) -> String {
        match mode {
            LanguageMode::English => self.english().to_owned(),
            LanguageMode::Hindi => self.hindi().to_owned(),
            LanguageMode::Both if self.is_action() => self.english().to_owned(),
            LanguageMode::Both => format!("{} / {}", self.english(), self.hindi()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn doctor_translates_to_dictionary_entry() {
        assert_eq!(
            render_field("Doctor", LanguageMode::Hindi),
            RenderedText::Single {
                text: "डॉक्टर".into()
            }
        );
    }

    #[test]
    fn bilingual_patient_stacks_english_over_hindi() {
        let rendered = render_field("Patient", LanguageMode::Both);
        assert_eq!(rendered.primary(), "Patient");
        assert_eq!(
            rendered.secondary(),
            Some(render_field("Patient", LanguageMode::Hindi).primary())
        );
        assert_eq!(rendered.to_string(), "Patient\nरोगी");
    }

    #[test]
    fn same_in_both_suppresses_second_line() {
        let rendered = render_field_with("Prescription", LanguageMode::Both, true);
        assert_eq!(
            rendered,
            RenderedText::Stacked {
                primary: "Prescription".into(),
                secondary: None
            }
        );
        assert_eq!(rendered.to_string(), "Prescription");
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(translate_to_hindi("daily"), "रोज़");
        assert_eq!(translate_to_hindi("Daily"), "Daily");
        assert_eq!(translate_to_hindi("Once daily"), "Once daily");
    }

    #[test]
    fn untranslated_text_falls_back_in_bilingual_mode() {
        let rendered = render_field("Hypertension", LanguageMode::Both);
        assert_eq!(rendered.secondary(), Some("Hypertension"));
    }

    #[test]
    fn inline_rendering_joins_with_slash() {
        assert_eq!(render_inline("twice daily", LanguageMode::Both), "twice daily / दिन में दो बार");
        assert_eq!(render_inline("twice daily", LanguageMode::Hindi), "दिन में दो बार");
        assert_eq!(render_inline("Morning", LanguageMode::Both), "Morning / Morning");
        assert_eq!(render_inline("Morning", LanguageMode::English), "Morning");
    }

    #[test]
    fn section_labels_follow_mode() {
        assert_eq!(SectionLabel::Medications.render(LanguageMode::English), "Medications");
        assert_eq!(SectionLabel::Medications.render(LanguageMode::Hindi), "दवाइयां");
        assert_eq!(
            SectionLabel::Instructions.render(LanguageMode::Both),
            "Instructions / निर्देश"
        );
        assert_eq!(SectionLabel::Print.render(LanguageMode::Both), "Print");
        assert_eq!(SectionLabel::DownloadPdf.render(LanguageMode::Hindi), "पीडीएफ डाउनलोड करें");
    }

    #[test]
    fn doctor_label_agrees_with_dictionary() {
        assert_eq!(SectionLabel::Doctor.hindi(), translate_to_hindi("Doctor"));
    }

    #[test]
    fn dictionary_has_every_phrase() {
        assert_eq!(dictionary_len(), 43);
    }

    proptest! {
        #[test]
        fn english_mode_is_identity(text in ".*") {
            let once = render_field(&text, LanguageMode::English);
            prop_assert_eq!(once.primary(), text.as_str());
            let twice = render_field(&once.to_string(), LanguageMode::English);
            prop_assert_eq!(twice, once);
        }

        #[test]
        fn unknown_text_falls_back_to_source(text in "[A-Za-z ]{0,24}") {
            prop_assume!(lookup_hindi(&text).is_none());
            let rendered = render_field(&text, LanguageMode::Hindi);
            prop_assert_eq!(rendered.primary(), text.as_str());
        }
    }
}
