// src/credit_risk_agent/classifier.rs

use crate::types::{ApplicantRecord, Icon, Presentation, RiskAssessment, RiskLevel, Severity};

/// Minimum credit score and DTI ceiling (exclusive) for low risk.
pub const LOW_RISK_MIN_SCORE: u32 = 700;
pub const LOW_RISK_MAX_DTI: f64 = 35.0;

/// Minimum credit score and DTI ceiling (exclusive) for medium risk.
pub const MEDIUM_RISK_MIN_SCORE: u32 = 600;
pub const MEDIUM_RISK_MAX_DTI: f64 = 50.0;

static LOW: Presentation = Presentation {
    label: "Low Risk",
    severity: Severity::Green,
    icon: Icon::Check,
    background: "#d4edda",
    text_color: "#155724",
};

static MEDIUM: Presentation = Presentation {
    label: "Medium Risk",
    severity: Severity::Yellow,
    icon: Icon::Warning,
    background: "#fff3cd",
    text_color: "#856404",
};

static HIGH: Presentation = Presentation {
    label: "High Risk",
    severity: Severity::Red,
    icon: Icon::Cross,
    background: "#f8d7da",
    text_color: "#721c24",
};

impl RiskLevel {
    /// Fixed cosmetic tag for this level.
    pub fn presentation(&self) -> &'static Presentation {
        match self {
            RiskLevel::LowRisk => &LOW,
            RiskLevel::MediumRisk => &MEDIUM,
            RiskLevel::HighRisk => &HIGH,
        }
    }
}

/// Debt-to-income ratio in percent. Zero income gives 0, not infinity.
pub fn compute_dti(income: f64, debt: f64) -> f64 {
    if income > 0.0 {
        (debt / income) * 100.0
    } else {
        0.0
    }
}

/// Map credit score and DTI to a risk level. Arms are checked top to bottom.
pub fn classify(credit_score: u32, dti: f64) -> RiskLevel {
    match (credit_score, dti) {
        (score, dti) if score >= LOW_RISK_MIN_SCORE && dti < LOW_RISK_MAX_DTI => RiskLevel::LowRisk,
        (score, dti) if score >= MEDIUM_RISK_MIN_SCORE && dti < MEDIUM_RISK_MAX_DTI => RiskLevel::MediumRisk,
        _ => RiskLevel::HighRisk,
    }
}

/// Score one applicant. Input ranges are not validated.
pub fn classify_applicant(record: &ApplicantRecord) -> RiskAssessment {
    let dti = compute_dti(record.income, record.debt);
    let risk_level = classify(record.credit_score, dti);

    RiskAssessment {
        debt_to_income_ratio: dti,
        risk_level,
        presentation: risk_level.presentation().into(),
    }
}

/// Score every record, one assessment per input in the same order.
pub fn classify_batch(records: &[ApplicantRecord]) -> Vec<RiskAssessment> {
    records.iter().map(classify_applicant).collect()
}
