use anyhow::{Context, Result};
use footprint_core::{
    factors::{self, FactorConfig},
    EmissionsCalculator,
};
use footprint_schemas::{
    factors::EmissionFactorTable, input::CalculatorInput, model::ModelConstants,
};
use std::{fs, path::Path};
use tracing::info;

pub const DEFAULT_LOG_PATH: &str = "./data/carbon_log.csv";
const BUILTIN_SCHEMA_VERSION: &str = "builtin";

/// Everything the tracker needs from configuration for one run.
pub struct TrackerConfig {
    pub factor_config: FactorConfig,
}

impl TrackerConfig {
    /// Loads the factor table from `factors_path`, or uses the built-in table
    /// when no path is given. A file that fails validation is an error.
    pub fn load(factors_path: Option<&Path>) -> Result<Self> {
        let factor_config = match factors_path {
            Some(path) => factors::load_factor_file(path)
                .with_context(|| format!("Failed to load emission factors from {:?}", path))?,
            None => {
                info!("no factor file given, using built-in emission factors");
                let factors = EmissionFactorTable::default();
                let model = ModelConstants::default();
                factors::validate(&factors, &model)
                    .context("Built-in emission factors are invalid")?;
                FactorConfig {
                    schema_version: BUILTIN_SCHEMA_VERSION.to_string(),
                    factors,
                    model,
                }
            }
        };
        Ok(Self { factor_config })
    }

    pub fn calculator(&self) -> Result<EmissionsCalculator> {
        EmissionsCalculator::from_config(&self.factor_config)
            .context("Failed to build emissions calculator")
    }

    pub fn deadband_tonnes(&self) -> f64 {
        self.factor_config.model.change_deadband_tonnes
    }
}

/// Reads a calculator input file. JSON is accepted as well since it parses as YAML.
pub fn load_input(path: &Path) -> Result<CalculatorInput> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {:?}", path))?;
    if content.trim().is_empty() {
        return Ok(CalculatorInput::default());
    }
    serde_yaml::from_str(&content).with_context(|| format!("Failed to parse input from {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_factors_are_used_without_a_file() {
        let config = TrackerConfig::load(None).unwrap();
        assert_eq!(config.factor_config.schema_version, "builtin");
        assert_eq!(config.factor_config.factors, EmissionFactorTable::default());
        assert_eq!(config.deadband_tonnes(), 0.01);
    }

    #[test]
    fn invalid_factor_file_is_not_replaced_by_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "schema_version: \"1.0\"\nmodel:\n  kg_to_tonnes: 0.001").unwrap();
        let err = TrackerConfig::load(Some(file.path())).err().unwrap();
        assert!(format!("{:#}", err).contains("missing"));
    }

    #[test]
    fn empty_input_file_is_an_empty_request() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert_eq!(load_input(file.path()).unwrap(), CalculatorInput::default());
    }

    #[test]
    fn json_input_is_accepted() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"carMilesPerDay": 20, "renewablePercent": "50"}}"#).unwrap();
        let input = load_input(file.path()).unwrap();
        assert_eq!(input.car_miles_per_day, Some(20.0));
        assert_eq!(input.renewable_percent, Some(50.0));
    }
}
