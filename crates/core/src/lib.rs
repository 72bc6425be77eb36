//! # erx core
//!
//! Prescription authoring logic for the e-prescription workspace.
//!
//! This crate contains pure, synchronous operations over in-memory data:
//! - the prescription model ([`Medication`], [`Prescription`]) and its lifecycle
//! - static reference catalogs (templates, medications, interaction rules, Hindi terms)
//! - interaction evaluation and bilingual rendering
//! - a strict YAML form for loading and saving prescriptions
//!
//! **No UI or transport concerns**: forms, messaging and printing belong to callers; the CLI in
//! `erx-cli` is one such caller.

pub mod catalog;
pub mod composer;
pub mod config;
pub mod constants;
pub mod error;
pub mod fixtures;
pub mod ids;
pub mod interactions;
pub mod medication;
pub mod prescription;
pub mod rendering;
pub mod translation;
pub mod wire;

pub use composer::MedicationList;
pub use config::CoreConfig;
pub use error::{CoreError, CoreResult};
pub use ids::{MedicationId, PrescriptionId};
pub use interactions::{evaluate_interactions, InteractionRule, InteractionVerdict};
pub use medication::{Medication, MedicationDraft};
pub use prescription::{PatientRef, Prescriber, Prescription};
pub use rendering::PrescriptionView;
pub use translation::{render_field, render_field_with, translate_to_hindi, RenderedText};
pub use wire::PrescriptionDocument;

// Re-export the shared primitives so callers need only this crate.
pub use erx_types::{LanguageMode, PrescriptionStatus, RequiredText, TextError};
