use cf_core::CfError;
use cf_sim::SimError;
use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid parameter {field}: {value} not in [{min}, {max}]")]
    InvalidParameter {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Simulation error: {0}")]
    Sim(#[from] SimError),

    #[error("Numeric error: {0}")]
    Core(#[from] CfError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
