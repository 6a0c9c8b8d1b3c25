use thiserror::Error;

#[derive(Debug, Error)]
pub enum FootprintError {
    #[error("Emission factor table is missing from the configuration")]
    MissingFactorTable,

    #[error("Emission factor '{factor}' has invalid value {value}")]
    InvalidFactor { factor: &'static str, value: f64 },

    #[error("Model constant '{name}' has invalid value {value}")]
    InvalidModelConstant { name: &'static str, value: f64 },

    #[error("Failed to parse emission factors from '{0}': {1}")]
    FactorFileParse(String, #[source] serde_yaml::Error),

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("Failed to process CSV file '{0}': {1}")]
    CsvError(String, #[source] csv::Error),
}

impl FootprintError {
    /// True for the fatal emission-factor configuration errors.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            FootprintError::MissingFactorTable
                | FootprintError::InvalidFactor { .. }
                | FootprintError::InvalidModelConstant { .. }
                | FootprintError::FactorFileParse(..)
        )
    }
}
