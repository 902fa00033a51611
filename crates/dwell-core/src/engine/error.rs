use thiserror::Error;

use super::state::DriverPhase;
use super::utils::sampling::SamplingError;
use crate::core::potential::expression::ExpressionError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Force expression error: {source}")]
    Expression {
        #[from]
        source: ExpressionError,
    },

    #[error("Initial placement failed: {source}")]
    Sampling {
        #[from]
        source: SamplingError,
    },

    #[error("Driver phase violation: operation requires {expected}, but the driver is {actual}")]
    Phase {
        expected: DriverPhase,
        actual: DriverPhase,
    },

    #[error("No force attached to the engine; cannot step")]
    MissingForce,

    #[error("Position buffer holds {got} entries but {expected} particles are registered")]
    PositionCountMismatch { expected: usize, got: usize },

    #[error("Topology construction failed: {0}")]
    Topology(String),
}
