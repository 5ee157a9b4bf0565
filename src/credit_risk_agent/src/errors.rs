// src/credit_risk_agent/errors.rs

use candid::{CandidType, Deserialize};
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the bulk upload path and the settings endpoints.
///
/// Single-applicant classification never fails; every variant here comes
/// from ingesting data or changing configuration.
#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Error)]
pub enum RiskError {
    /// A required numeric field was empty or not a number. `row` is the
    /// zero-based index of the data row (the header is not counted).
    #[error("row {row}: field '{field}' is not a usable number (got '{value}')")]
    InvalidRecord {
        row: u64,
        field: String,
        value: String,
    },

    #[error("dataset is missing required column '{0}'")]
    MissingColumn(String),

    #[error("unreadable CSV: {0}")]
    Csv(String),

    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

impl From<csv::Error> for RiskError {
    fn from(err: csv::Error) -> Self {
        RiskError::Csv(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RiskError>;
