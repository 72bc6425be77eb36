//! Mock prescriptions used by demos and tests.

use crate::ids::PrescriptionId;
use crate::medication::{Medication, MedicationDraft};
use crate::prescription::{PatientRef, Prescriber, Prescription};
use crate::{CoreError, CoreResult};
use chrono::NaiveDate;
use erx_types::{LanguageMode, PrescriptionStatus};

fn line(
    id: &str,
    name: &str,
    dosage: &str,
    frequency: &str,
    duration: &str,
    timing: Option<&str>,
) -> CoreResult<Medication> {
    let mut draft = MedicationDraft::new(name, dosage, frequency, duration).with_id(id);
    draft.timing = timing.map(str::to_owned);
    draft.build()
}

fn date(y: i32, m: u32, d: u32) -> CoreResult<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
        .ok_or_else(|| CoreError::InvalidInput(format!("invalid date {y}-{m}-{d}")))
}

fn kapoor() -> Prescriber {
    Prescriber {
        id: "doc1".into(),
        name: "Dr. Rajesh Kapoor".into(),
        clinic: Some("Sunshine Medical Center".into()),
    }
}

/// The two mock prescriptions: Anil Sharma (cardiology, English) and Priya Patel (general,
/// bilingual). Both have already been sent.
pub fn sample_prescriptions() -> CoreResult<Vec<Prescription>> {
    let anil = Prescription {
        id: Some(PrescriptionId::parse("1")?),
        patient: PatientRef {
            id: "1".into(),
            name: "Anil Sharma".into(),
            age: Some("48".into()),
            gender: Some("M".into()),
        },
        prescriber: kapoor(),
        medications: vec![
            line("rx1", "Amlodipine", "5mg", "Once daily", "30 days", Some("Morning"))?,
            line("rx2", "Atorvastatin", "10mg", "Once daily at bedtime", "30 days", None)?,
        ],
        diagnosis: "Hypertension, Hyperlipidemia".into(),
        vitals: Some("BP 142/88, HR 76, RR 16".into()),
        created_date: date(2023, 10, 15)?,
        notes: None,
        follow_up_date: Some(date(2023, 11, 15)?),
        status: PrescriptionStatus::Sent,
        template: Some("cardiology".into()),
        language: LanguageMode::English,
    };

    let priya = Prescription {
        id: Some(PrescriptionId::parse("2")?),
        patient: PatientRef {
            id: "2".into(),
            name: "Priya Patel".into(),
            age: Some("36".into()),
            gender: Some("F".into()),
        },
        prescriber: kapoor(),
        medications: vec![
            line(
                "rx3",
                "Paracetamol",
                "500mg",
                "Every 6 hours as needed",
                "5 days",
                Some("After meals"),
            )?,
            line("rx4", "Cetirizine", "10mg", "Once daily", "7 days", Some("At bedtime"))?,
        ],
        diagnosis: "Acute upper respiratory infection".into(),
        vitals: Some("Temp 99.8°F, BP 110/70, HR 88".into()),
        created_date: date(2023, 10, 10)?,
        notes: None,
        follow_up_date: Some(date(2023, 10, 17)?),
        status: PrescriptionStatus::Sent,
        template: Some("general".into()),
        language: LanguageMode::Both,
    };

    Ok(vec![anil, priya])
}
