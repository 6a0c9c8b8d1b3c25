use crate::{factors::EmissionFactorTable, model::ModelConstants};
use serde::{Deserialize, Serialize};

/// On-disk wrapper for the emission-factor configuration.
///
/// `emission_factors` is optional here so that a file without the section can
/// be reported as a missing table rather than a generic parse failure.
#[derive(Debug, Serialize, Deserialize)]
pub struct FactorFile {
    pub schema_version: String,
    pub emission_factors: Option<EmissionFactorTable>,
    #[serde(default)]
    pub model: ModelConstants,
}
