// src/credit_risk_agent/settings.rs

use candid::{CandidType, Deserialize};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::sync::Mutex;

use crate::errors::{Result, RiskError};
use crate::types::Currency;

pub const DEFAULT_REPORT_FILE_NAME: &str = "credit_risk_report.csv";

/// Display settings shared by every endpoint. Thresholds are not configurable.
#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AgentSettings {
    pub default_currency: Currency,
    pub report_file_name: String,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            default_currency: Currency::Usd,
            report_file_name: DEFAULT_REPORT_FILE_NAME.to_string(),
        }
    }
}

impl AgentSettings {
    pub fn validate(&self) -> Result<()> {
        if self.report_file_name.trim().is_empty() {
            return Err(RiskError::InvalidSettings(
                "report_file_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Global canister settings.
static SETTINGS: Lazy<Mutex<AgentSettings>> = Lazy::new(|| Mutex::new(AgentSettings::default()));

/// Snapshot of the current settings.
pub fn current() -> AgentSettings {
    match SETTINGS.lock() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Validate and replace the current settings.
pub fn replace(settings: AgentSettings) -> Result<()> {
    settings.validate()?;
    let mut guard = match SETTINGS.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    *guard = settings;
    Ok(())
}
