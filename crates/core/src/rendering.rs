//! Patient-facing prescription card.
//!
//! [`PrescriptionView::build`] lays a [`Prescription`] out the way it is printed or shared:
//! header, patient block, medication lines, notes, follow-up and signature. Labels go through
//! the bilingual renderer; values the prescriber typed are shown as entered, except frequency,
//! timing, instructions and notes, which are also passed through the dictionary.

use crate::constants::DISPLAY_DATE_FORMAT;
use crate::prescription::Prescription;
use crate::translation::{render_field, render_field_with, render_inline, RenderedText, SectionLabel};
use chrono::NaiveDate;
use erx_types::LanguageMode;
use serde::Serialize;
use std::fmt;

/// A labelled value on the card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LabelledValue {
    pub label: RenderedText,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MedicationLine {
    pub name: String,
    /// `dosage • frequency`
    pub dose: String,
    /// `for <duration>`
    pub course: String,
    pub timing: Option<String>,
    pub instructions: Option<RenderedText>,
    pub duration: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PrescriptionView {
    pub language: LanguageMode,
    pub title: RenderedText,
    pub date: String,
    pub prescriber: String,
    pub clinic: Option<String>,
    pub patient: LabelledValue,
    pub age_gender: LabelledValue,
    pub diagnosis: LabelledValue,
    pub vitals: Option<LabelledValue>,
    pub medications_heading: String,
    pub medications: Vec<MedicationLine>,
    pub notes: Option<(String, RenderedText)>,
    pub follow_up: Option<(String, String)>,
    pub doctor_label: String,
    pub signature_label: String,
    pub actions: Vec<String>,
}

fn format_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

/// `Age/Gender` label: each half rendered separately and then joined.
fn age_gender_label(mode: LanguageMode) -> RenderedText {
    let age = render_field("Age", mode);
    let gender = render_field("Gender", mode);
    match (age.secondary(), gender.secondary()) {
        (Some(a), Some(g)) => RenderedText::Stacked {
            primary: format!("{}/{}", age.primary(), gender.primary()),
            secondary: Some(format!("{a}/{g}")),
        },
        _ => RenderedText::Single {
            text: format!("{}/{}", age.primary(), gender.primary()),
        },
    }
}

impl PrescriptionView {
    /// Lays out `prescription` in `mode`.
    ///
    /// `mode` usually comes from [`Prescription::language`], but the viewer may pick another.
    pub fn build(prescription: &Prescription, mode: LanguageMode) -> Self {
        let patient = &prescription.patient;

        let medications = prescription
            .medications()
            .iter()
            .map(|m| MedicationLine {
                name: m.name().to_owned(),
                dose: format!("{} • {}", m.dosage(), render_inline(m.frequency(), mode)),
                course: format!(
                    "{} {}",
                    render_field("for", mode).primary(),
                    m.duration()
                ),
                timing: m.timing().map(|t| render_inline(t, mode)),
                instructions: m.instructions().map(|i| render_field(i, mode)),
                duration: m.duration().to_owned(),
            })
            .collect();

        Self {
            language: mode,
            title: render_field_with("Prescription", mode, true),
            date: format_date(prescription.created_date),
            prescriber: prescription.prescriber.name.clone(),
            clinic: prescription.prescriber.clinic.clone(),
            patient: LabelledValue {
                label: render_field("Patient", mode),
                value: patient.name.clone(),
            },
            age_gender: LabelledValue {
                label: age_gender_label(mode),
                value: format!(
                    "{} / {}",
                    patient.age.as_deref().unwrap_or("-"),
                    patient.gender.as_deref().unwrap_or("-")
                ),
            },
            diagnosis: LabelledValue {
                label: render_field("Diagnosis", mode),
                value: prescription.diagnosis.clone(),
            },
            vitals: prescription.vitals.as_ref().map(|v| LabelledValue {
                label: render_field("Vitals", mode),
                value: v.clone(),
            }),
            medications_heading: SectionLabel::Medications.render(mode),
            medications,
            notes: prescription
                .notes
                .as_deref()
                .map(|n| (SectionLabel::Instructions.render(mode), render_field(n, mode))),
            follow_up: prescription
                .follow_up_date
                .map(|d| (SectionLabel::FollowUpAppointment.render(mode), format_date(d))),
            doctor_label: SectionLabel::Doctor.render(mode),
            signature_label: SectionLabel::DigitalSignature.render(mode),
            actions: vec![
                SectionLabel::Print.render(mode),
                SectionLabel::DownloadPdf.render(mode),
                "WhatsApp".to_owned(),
            ],
        }
    }

    /// Plain-text rendering for terminals and logs.
    pub fn to_plain_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PrescriptionView {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inline = |text: &RenderedText| match text.secondary() {
            Some(secondary) => format!("{} ({secondary})", text.primary()),
            None => text.primary().to_owned(),
        };

        writeln!(out, "{}", inline(&self.title))?;
        writeln!(out, "{}", self.date)?;
        writeln!(out, "{}", self.prescriber)?;
        if let Some(clinic) = &self.clinic {
            writeln!(out, "{clinic}")?;
        }
        writeln!(out)?;

        for field in [&self.patient, &self.age_gender, &self.diagnosis]
            .into_iter()
            .chain(self.vitals.as_ref())
        {
            writeln!(out, "{}: {}", inline(&field.label), field.value)?;
        }
        writeln!(out)?;

        writeln!(out, "Rx {}", self.medications_heading)?;
        for (n, line) in self.medications.iter().enumerate() {
            writeln!(out, "{}. {}  [{}]", n + 1, line.name, line.duration)?;
            writeln!(out, "   {}", line.dose)?;
            match &line.timing {
                Some(timing) => writeln!(out, "   {}  {timing}", line.course)?,
                None => writeln!(out, "   {}", line.course)?,
            }
            if let Some(instructions) = &line.instructions {
                for text in instructions.to_string().lines() {
                    writeln!(out, "   {text}")?;
                }
            }
        }

        if let Some((heading, notes)) = &self.notes {
            writeln!(out)?;
            writeln!(out, "{heading}")?;
            writeln!(out, "{notes}")?;
        }

        if let Some((heading, date)) = &self.follow_up {
            writeln!(out)?;
            writeln!(out, "{heading}: {date}")?;
        }

        writeln!(out)?;
        writeln!(out, "{}", self.doctor_label)?;
        writeln!(out, "{}", self.prescriber)?;
        writeln!(out, "{}", self.signature_label)?;
        writeln!(out)?;
        write!(out, "{}", self.actions.join(" | "))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample_prescriptions;

    fn anil() -> Prescription {
        sample_prescriptions().expect("samples").remove(0)
    }

    fn priya() -> Prescription {
        sample_prescriptions().expect("samples").remove(1)
    }

    #[test]
    fn english_card_keeps_text_as_entered() {
        let view = PrescriptionView::build(&anil(), LanguageMode::English);
        assert_eq!(view.title.to_string(), "Prescription");
        assert_eq!(view.date, "15 Oct 2023");
        assert_eq!(view.clinic.as_deref(), Some("Sunshine Medical Center"));
        assert_eq!(view.age_gender.label.to_string(), "Age/Gender");
        assert_eq!(view.age_gender.value, "48 / M");
        assert_eq!(view.medications_heading, "Medications");
        assert_eq!(view.medications[0].dose, "5mg • Once daily");
        assert_eq!(view.medications[0].course, "for 30 days");
        assert_eq!(view.medications[0].timing.as_deref(), Some("Morning"));
        assert_eq!(view.medications[1].timing, None);
        assert_eq!(
            view.follow_up,
            Some(("Follow-up Appointment".to_owned(), "15 Nov 2023".to_owned()))
        );
    }

    #[test]
    fn hindi_card_translates_labels_and_known_phrases() {
        let view = PrescriptionView::build(&anil(), LanguageMode::Hindi);
        assert_eq!(view.title.to_string(), "प्रिस्क्रिप्शन");
        assert_eq!(view.patient.label.to_string(), "रोगी");
        assert_eq!(view.diagnosis.value, "Hypertension, Hyperlipidemia");
        assert_eq!(view.medications_heading, "दवाइयां");
        assert_eq!(view.medications[0].course, "के लिए 30 days");
        assert_eq!(view.doctor_label, "डॉक्टर");
        assert_eq!(view.actions[0], "प्रिंट करें");
    }

    #[test]
    fn bilingual_card_stacks_and_joins() {
        let view = PrescriptionView::build(&priya(), LanguageMode::Both);
        assert_eq!(view.title.secondary(), None);
        assert_eq!(view.patient.label.secondary(), Some("रोगी"));
        assert_eq!(view.age_gender.label.secondary(), Some("उम्र/लिंग"));
        assert_eq!(view.medications_heading, "Medications / दवाइयां");
        assert_eq!(
            view.medications[0].timing.as_deref(),
            Some("After meals / After meals")
        );
        assert_eq!(view.doctor_label, "Doctor / डॉक्टर");
        assert_eq!(view.actions[0], "Print");
    }

    #[test]
    fn missing_patient_details_render_as_dashes() {
        let mut rx = anil();
        rx.patient.age = None;
        rx.patient.gender = None;
        rx.vitals = None;
        let view = PrescriptionView::build(&rx, LanguageMode::English);
        assert_eq!(view.age_gender.value, "- / -");
        assert!(view.vitals.is_none());
    }

    #[test]
    fn plain_text_contains_every_section() {
        let mut rx = priya();
        rx.notes = Some("Drink plenty of water".into());
        let text = PrescriptionView::build(&rx, LanguageMode::Both).to_plain_text();

        assert!(text.starts_with("Prescription\n10 Oct 2023\nDr. Rajesh Kapoor\n"));
        assert!(text.contains("Patient (रोगी): Priya Patel"));
        assert!(text.contains("Rx Medications / दवाइयां"));
        assert!(text.contains("1. Paracetamol  [5 days]"));
        assert!(text.contains("Instructions / निर्देश\nDrink plenty of water\nपर्याप्त पानी पियें"));
        assert!(text.contains("Follow-up Appointment / फॉलो-अप अपॉइंटमेंट: 17 Oct 2023"));
        assert!(text.ends_with("Print | Download PDF | WhatsApp"));
    }

    #[test]
    fn display_matches_plain_text() {
        let view = PrescriptionView::build(&anil(), LanguageMode::Hindi);
        let shown = format!("{view}");
        assert_eq!(shown, view.to_plain_text());
        assert!(shown.contains("रोगी: Anil Sharma"));
        assert!(shown.contains("Sunshine Medical Center\n"));
    }
}
