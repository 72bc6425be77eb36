//! Constants used throughout the e-prescription core.

/// Template id that offers the whole medication catalog instead of one category.
pub const GENERAL_TEMPLATE_ID: &str = "general";

/// Fewest medications on a list before interaction checking runs.
pub const MIN_MEDICATIONS_FOR_INTERACTION_CHECK: usize = 2;

/// Prefix for generated medication line-item ids.
pub const MEDICATION_ID_PREFIX: &str = "rx";

/// Prescriber id used when none is configured.
pub const DEFAULT_DOCTOR_ID: &str = "doc1";

/// Prescriber display name used when none is configured.
pub const DEFAULT_DOCTOR_NAME: &str = "Dr. Rajesh Kapoor";

/// Date layout of the on-disk prescription form.
pub const WIRE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Date layout of the rendered prescription, e.g. `15 Oct 2023`.
pub const DISPLAY_DATE_FORMAT: &str = "%d %b %Y";
