//! Loading and validation of the emission-factor configuration.
//!
//! Validation happens once, when the table is loaded or an
//! [`EmissionsCalculator`](crate::calculator::EmissionsCalculator) is built.
//! A bad table is never replaced with defaults.

use crate::error::FootprintError;
use footprint_schemas::{
    factors::EmissionFactorTable, file_formats::FactorFile, model::ModelConstants,
};
use std::{fs, path::Path};
use tracing::info;

const RECYCLING_OFFSET: &str = "waste.recycling_offset";

/// A factor table and model constants that have passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorConfig {
    pub schema_version: String,
    pub factors: EmissionFactorTable,
    pub model: ModelConstants,
}

/// Checks every factor and model constant.
///
/// All factors must be finite and non-negative, except the recycling offset
/// whose sign is only a convention and may be anything finite.
pub fn validate(
    factors: &EmissionFactorTable,
    model: &ModelConstants,
) -> Result<(), FootprintError> {
    for (factor, value) in factors.entries() {
        let valid = if factor == RECYCLING_OFFSET {
            value.is_finite()
        } else {
            value.is_finite() && value >= 0.0
        };
        if !valid {
            return Err(FootprintError::InvalidFactor { factor, value });
        }
    }

    let checks = [
        ("km_per_flight", model.km_per_flight, model.km_per_flight >= 0.0),
        ("kg_to_tonnes", model.kg_to_tonnes, model.kg_to_tonnes > 0.0),
        (
            "meat_reduction_floor",
            model.meat_reduction_floor,
            (0.0..=1.0).contains(&model.meat_reduction_floor),
        ),
        (
            "max_local_meat_reduction",
            model.max_local_meat_reduction,
            (0.0..=1.0).contains(&model.max_local_meat_reduction),
        ),
        (
            "change_deadband_tonnes",
            model.change_deadband_tonnes,
            model.change_deadband_tonnes >= 0.0,
        ),
    ];
    for (name, value, in_range) in checks {
        if !value.is_finite() || !in_range {
            return Err(FootprintError::InvalidModelConstant { name, value });
        }
    }
    Ok(())
}

/// Reads a YAML (or JSON) factor file and validates its contents.
pub fn load_factor_file<P: AsRef<Path>>(path: P) -> Result<FactorConfig, FootprintError> {
    let path = path.as_ref();
    let origin = path.display().to_string();
    let content =
        fs::read_to_string(path).map_err(|e| FootprintError::FileIO(origin.clone(), e))?;
    let config = parse_factor_file(&content, &origin)?;
    info!(
        path = %origin,
        schema_version = %config.schema_version,
        "loaded emission factors"
    );
    Ok(config)
}

/// Parses factor-file content; `origin` names the source in error messages.
pub fn parse_factor_file(content: &str, origin: &str) -> Result<FactorConfig, FootprintError> {
    let file: FactorFile = serde_yaml::from_str(content)
        .map_err(|e| FootprintError::FactorFileParse(origin.to_string(), e))?;
    let factors = file
        .emission_factors
        .ok_or(FootprintError::MissingFactorTable)?;
    validate(&factors, &file.model)?;
    Ok(FactorConfig {
        schema_version: file.schema_version,
        factors,
        model: file.model,
    })
}
