// Import Candid serialization for Internet Computer (ICP) interfaces
use candid::{CandidType, Nat};

// Import Serde for serialization/deserialization
use serde::{Deserialize, Serialize};

use num_traits::cast::ToPrimitive;
use std::fmt;

/// Display currency for amounts. Only a label: nothing is ever converted.
#[derive(CandidType, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Currency {
    #[default]
    Usd,
    Ngn,
}

impl Currency {
    pub fn label(&self) -> &'static str {
        match self {
            Currency::Usd => "USD ($)",
            Currency::Ngn => "NGN (₦)",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One applicant as seen by the classifier.
#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ApplicantRecord {
    /// Monthly income
    pub income: f64,
    /// Monthly debt payments
    pub debt: f64,
    /// Expected in [300, 850]; not checked here
    pub credit_score: u32,
    pub loan_amount: f64,
    pub currency: Currency,
}

impl ApplicantRecord {
    pub fn new(income: f64, debt: f64, credit_score: u32) -> Self {
        Self {
            income,
            debt,
            credit_score,
            loan_amount: 0.0,
            currency: Currency::default(),
        }
    }

    pub fn with_loan_amount(mut self, loan_amount: f64) -> Self {
        self.loan_amount = loan_amount;
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }
}

/// Payload submitted by the single-entry form.
#[derive(CandidType, Serialize, Deserialize, Clone, Debug)]
pub struct ApplicantForm {
    pub name: Option<String>,
    pub income: Nat,
    pub debt: Nat,
    pub credit_score: Nat,
    pub loan_amount: Nat,
    /// Falls back to the canister's default currency when absent
    pub currency: Option<Currency>,
}

impl ApplicantForm {
    /// Convert whole-unit Nat amounts into a classifier record.
    pub fn to_record(&self, default_currency: Currency) -> ApplicantRecord {
        ApplicantRecord {
            income: self.income.0.to_f64().unwrap_or(f64::MAX),
            debt: self.debt.0.to_f64().unwrap_or(f64::MAX),
            credit_score: self.credit_score.0.to_u32().unwrap_or(u32::MAX),
            loan_amount: self.loan_amount.0.to_f64().unwrap_or(f64::MAX),
            currency: self.currency.unwrap_or(default_currency),
        }
    }
}

/// Three-tier risk outcome.
#[derive(CandidType, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RiskLevel {
    LowRisk,
    MediumRisk,
    HighRisk,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.presentation().label)
    }
}

#[derive(CandidType, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Green,
    Yellow,
    Red,
}

#[derive(CandidType, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Icon {
    Check,
    Warning,
    Cross,
}

impl Icon {
    pub fn emoji(&self) -> &'static str {
        match self {
            Icon::Check => "✅",
            Icon::Warning => "⚠️",
            Icon::Cross => "❌",
        }
    }
}

/// Cosmetic tag attached to a risk level: card/table colours and headline.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Presentation {
    pub label: &'static str,
    pub severity: Severity,
    pub icon: Icon,
    pub background: &'static str,
    pub text_color: &'static str,
}

/// Owned form of [`Presentation`] for crossing the canister boundary.
#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PresentationTag {
    pub label: String,
    pub severity: Severity,
    pub icon: Icon,
    pub emoji: String,
    pub background: String,
    pub text_color: String,
}

impl From<&Presentation> for PresentationTag {
    fn from(p: &Presentation) -> Self {
        Self {
            label: p.label.to_string(),
            severity: p.severity,
            icon: p.icon,
            emoji: p.icon.emoji().to_string(),
            background: p.background.to_string(),
            text_color: p.text_color.to_string(),
        }
    }
}

/// Classifier output for one applicant.
#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RiskAssessment {
    /// Debt-to-income ratio in percent
    pub debt_to_income_ratio: f64,
    pub risk_level: RiskLevel,
    pub presentation: PresentationTag,
}

impl RiskAssessment {
    /// Ratio rounded to two decimals with a percent sign, e.g. "66.67%".
    pub fn dti_display(&self) -> String {
        format!("{:.2}%", self.debt_to_income_ratio)
    }

    /// Emoji plus label, e.g. "✅ Low Risk".
    pub fn headline(&self) -> String {
        format!("{} {}", self.presentation.emoji, self.presentation.label)
    }
}

/// What the form endpoint hands back for rendering.
#[derive(CandidType, Serialize, Deserialize, Clone, Debug)]
pub struct AssessmentCard {
    pub name: Option<String>,
    pub headline: String,
    pub dti_display: String,
    pub credit_score: u32,
    pub monthly_income: String,
    pub monthly_debt: String,
    pub loan_amount: String,
    pub currency: Currency,
    pub assessment: RiskAssessment,
}

impl AssessmentCard {
    pub fn new(form: &ApplicantForm, record: &ApplicantRecord, assessment: RiskAssessment) -> Self {
        let label = record.currency.label();
        Self {
            name: form.name.clone(),
            headline: assessment.headline(),
            dti_display: assessment.dti_display(),
            credit_score: record.credit_score,
            monthly_income: format!("{} {}", form.income.0, label),
            monthly_debt: format!("{} {}", form.debt.0, label),
            loan_amount: format!("{} {}", form.loan_amount.0, label),
            currency: record.currency,
            assessment,
        }
    }
}

/// Annotated dataset ready for download, plus per-row results for styling.
#[derive(CandidType, Serialize, Deserialize, Clone, Debug)]
pub struct RiskReport {
    pub file_name: String,
    pub mime_type: String,
    pub csv: Vec<u8>,
    pub assessments: Vec<RiskAssessment>,
}
