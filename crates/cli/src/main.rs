use anyhow::Context;
use clap::{Parser, Subcommand};
use erx_core::catalog::{medications_for_template, templates};
use erx_core::config::{
    language_from_env_value, prescriber_from_env_values, template_from_env_value,
};
use erx_core::fixtures::sample_prescriptions;
use erx_core::wire::{read_prescription_file, write_prescription_file};
use erx_core::{
    evaluate_interactions, render_field, CoreConfig, LanguageMode, MedicationDraft, PatientRef,
    PrescriptionDocument, PrescriptionView,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "erx")]
#[command(about = "E-prescription authoring CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List prescription templates
    Templates,
    /// List medications offered under a template
    Catalog {
        /// Template id (defaults to ERX_TEMPLATE or "general")
        #[arg(long)]
        template: Option<String>,
    },
    /// Check medication names for interactions
    Check {
        /// Medication display names, e.g. Warfarin Ibuprofen
        #[arg(required = true)]
        names: Vec<String>,
        /// Print the verdict as JSON
        #[arg(long)]
        json: bool,
    },
    /// Translate a phrase for display
    Translate {
        /// English text
        text: String,
        /// english, hindi or both
        #[arg(long)]
        language: Option<String>,
    },
    /// Render a prescription YAML file as a patient-facing card
    Render {
        /// Path to the prescription YAML file
        file: PathBuf,
        /// Override the prescription's own language
        #[arg(long)]
        language: Option<String>,
        /// Print the card as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate a prescription YAML file and report interactions
    Validate {
        /// Path to the prescription YAML file
        file: PathBuf,
    },
    /// Compose a new draft prescription
    Draft {
        /// Patient id
        patient_id: String,
        /// Patient display name
        patient_name: String,
        /// Primary diagnosis
        diagnosis: String,
        /// Medication as "name;dosage;frequency;duration[;timing]" (repeatable)
        #[arg(long = "med")]
        medications: Vec<String>,
        /// Sign the prescription after composing
        #[arg(long)]
        sign: bool,
        /// Write the YAML here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the mock prescriptions as YAML
    Samples,
}

impl Commands {
    /// Whether the command reads the `ERX_*` configuration.
    fn needs_config(&self) -> bool {
        matches!(
            self,
            Commands::Catalog { .. } | Commands::Translate { .. } | Commands::Draft { .. }
        )
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn load_config() -> anyhow::Result<CoreConfig> {
    let language = language_from_env_value(env_value("ERX_LANGUAGE"))?;
    let template = template_from_env_value(env_value("ERX_TEMPLATE"))?;
    let prescriber = prescriber_from_env_values(
        env_value("ERX_DOCTOR_ID"),
        env_value("ERX_DOCTOR_NAME"),
        env_value("ERX_CLINIC_NAME"),
    );
    Ok(CoreConfig::new(language, template, prescriber)?)
}

fn parse_language(value: Option<String>, fallback: LanguageMode) -> anyhow::Result<LanguageMode> {
    match value {
        Some(v) => Ok(v.parse()?),
        None => Ok(fallback),
    }
}

fn parse_medication(spec: &str) -> anyhow::Result<MedicationDraft> {
    let parts: Vec<&str> = spec.split(';').map(str::trim).collect();
    match parts.as_slice() {
        [name, dosage, frequency, duration] => {
            Ok(MedicationDraft::new(*name, *dosage, *frequency, *duration))
        }
        [name, dosage, frequency, duration, timing] => {
            Ok(MedicationDraft::new(*name, *dosage, *frequency, *duration).with_timing(*timing))
        }
        _ => anyhow::bail!(
            "medication '{spec}' must look like name;dosage;frequency;duration[;timing]"
        ),
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("erx=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("Use 'erx --help' for commands");
        return Ok(());
    };

    let cfg = if command.needs_config() {
        load_config().context("invalid ERX_* configuration")?
    } else {
        CoreConfig::default()
    };

    match command {
        Commands::Templates => {
            for template in templates() {
                println!("{:<12} {:<18} {}", template.id, template.name, template.description);
            }
        }
        Commands::Catalog { template } => {
            let template = template.unwrap_or_else(|| cfg.default_template().to_owned());
            let offered = medications_for_template(&template);
            if offered.is_empty() {
                println!("No medications offered for template '{template}'.");
            }
            for med in offered {
                println!("{:<6} {:<18} {}", med.id, med.display_name(), med.category);
            }
        }
        Commands::Check { names, json } => {
            let verdict = evaluate_interactions(&names[..]);
            if json {
                println!("{}", serde_json::to_string_pretty(&verdict)?);
            } else {
                match verdict.details() {
                    Some(details) => println!("Interaction detected: {details}"),
                    None => println!("No interactions found."),
                }
            }
        }
        Commands::Translate { text, language } => {
            let mode = parse_language(language, cfg.default_language())?;
            println!("{}", render_field(&text, mode));
        }
        Commands::Render {
            file,
            language,
            json,
        } => {
            let prescription = read_prescription_file(&file)
                .with_context(|| format!("failed to load {}", file.display()))?;
            let mode = parse_language(language, prescription.language)?;
            let view = PrescriptionView::build(&prescription, mode);
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                println!("{}", view.to_plain_text());
            }
        }
        Commands::Validate { file } => {
            let prescription = read_prescription_file(&file)
                .with_context(|| format!("failed to load {}", file.display()))?;
            let names: Vec<&str> = prescription.medications().iter().map(|m| m.name()).collect();
            println!(
                "Valid {} prescription with {} medication(s).",
                prescription.status(),
                names.len()
            );
            if prescription.medications().is_empty() {
                println!("Warning: no medications; this prescription cannot be signed.");
            }
            if let Some(details) = evaluate_interactions(&names[..]).details() {
                println!("Interaction detected: {details}");
            }
        }
        Commands::Draft {
            patient_id,
            patient_name,
            diagnosis,
            medications,
            sign,
            out,
        } => {
            let today = chrono::Local::now().date_naive();
            let mut prescription =
                cfg.new_draft(PatientRef::new(patient_id, patient_name), diagnosis, today)?;

            let mut list = prescription.edit_medications()?;
            for spec in &medications {
                let medication = parse_medication(spec)?.build()?;
                let verdict = list.add(medication)?;
                if let Some(details) = verdict.details() {
                    eprintln!("Medication interaction detected: {details}");
                }
            }
            prescription.set_medications(list)?;

            if sign {
                prescription.sign()?;
            } else if !prescription.medications().is_empty() {
                prescription.save()?;
            }

            match out {
                Some(path) => {
                    write_prescription_file(&path, &prescription)?;
                    println!("Wrote prescription to {}", path.display());
                }
                None => print!("{}", PrescriptionDocument::render(&prescription)?),
            }
        }
        Commands::Samples => {
            for prescription in sample_prescriptions()? {
                println!("---");
                print!("{}", PrescriptionDocument::render(&prescription)?);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_medication_spec_with_timing() {
        let med = parse_medication("Amlodipine; 5mg; Once daily; 30 days; Morning")
            .expect("valid spec")
            .build()
            .expect("complete");
        assert_eq!(med.name(), "Amlodipine");
        assert_eq!(med.frequency(), "Once daily");
        assert_eq!(med.timing(), Some("Morning"));
    }

    #[test]
    fn rejects_short_medication_spec() {
        let err = parse_medication("Amlodipine;5mg").expect_err("too short");
        assert!(err.to_string().contains("name;dosage;frequency;duration"));
    }

    #[test]
    fn language_flag_overrides_fallback() {
        assert_eq!(
            parse_language(Some("hindi".into()), LanguageMode::English).expect("valid"),
            LanguageMode::Hindi
        );
        assert_eq!(
            parse_language(None, LanguageMode::Both).expect("valid"),
            LanguageMode::Both
        );
        assert!(parse_language(Some("klingon".into()), LanguageMode::English).is_err());
    }

    fn parsed(args: &[&str]) -> Commands {
        Cli::try_parse_from(args)
            .expect("valid arguments")
            .command
            .expect("subcommand")
    }

    #[test]
    fn only_config_dependent_commands_load_config() {
        assert!(!parsed(&["erx", "templates"]).needs_config());
        assert!(!parsed(&["erx", "check", "Warfarin", "Ibuprofen"]).needs_config());
        assert!(!parsed(&["erx", "validate", "rx.yaml"]).needs_config());
        assert!(!parsed(&["erx", "render", "rx.yaml", "--language", "hindi"]).needs_config());
        assert!(!parsed(&["erx", "samples"]).needs_config());

        assert!(parsed(&["erx", "catalog"]).needs_config());
        assert!(parsed(&["erx", "translate", "Doctor"]).needs_config());
        assert!(parsed(&["erx", "draft", "p1", "Sunita Rao", "Fever"]).needs_config());
    }

    #[test]
    fn help_parses_without_consulting_config() {
        let err = Cli::try_parse_from(["erx", "--help"])
            .err()
            .expect("help is reported as an early exit");
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
