use thiserror::Error;

use oralcheck_core::models::item::ItemId;

use crate::measurement::Method;
use crate::scoring::ValidationError;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("no patient selected")]
    NoPatientSelected,

    #[error("measurement method '{method}' is not valid for item '{item}'")]
    UnknownMeasurementMethod { item: ItemId, method: Method },

    #[error("assessment is already finalized")]
    AssessmentAlreadyFinalized,

    #[error("assessment is not finalized")]
    AssessmentNotFinalized,

    #[error("invalid {method} reading: {reason}")]
    InvalidReading { method: Method, reason: String },

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("unknown instrument: {0}")]
    UnknownInstrument(String),
}
