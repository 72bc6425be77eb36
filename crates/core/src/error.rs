use erx_types::{PrescriptionStatus, TextError};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid text: {0}")]
    Text(#[from] TextError),

    #[error("medication is missing required field '{field}'")]
    IncompleteMedication { field: &'static str },
    #[error("duplicate medication id '{0}'")]
    DuplicateMedicationId(String),
    #[error("no medication at position {index} (list has {len})")]
    MedicationIndexOutOfRange { index: usize, len: usize },
    #[error("prescription has no medications")]
    NoMedications,

    #[error("unknown prescription template '{0}'")]
    UnknownTemplate(String),

    #[error("cannot move prescription from {from} to {to}")]
    InvalidStatusTransition {
        from: PrescriptionStatus,
        to: PrescriptionStatus,
    },
    #[error("prescription is {0} and can no longer be edited")]
    NotEditable(PrescriptionStatus),

    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),
    #[error("translation error: {0}")]
    Translation(String),
    #[error("failed to read prescription file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to write prescription file: {0}")]
    FileWrite(std::io::Error),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
