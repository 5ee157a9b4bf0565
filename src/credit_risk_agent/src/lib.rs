// src/credit_risk_agent/lib.rs
use ic_cdk_macros::{init, query, update};

pub mod classifier;
pub mod dataset;
pub mod errors;
pub mod settings;
pub mod types;

use errors::RiskError;
use settings::AgentSettings;
use types::{ApplicantForm, ApplicantRecord, AssessmentCard, RiskAssessment, RiskReport};

/// Canister initialization, optionally with display settings.
#[init]
fn init(initial: Option<AgentSettings>) {
    if let Some(initial) = initial {
        if let Err(e) = settings::replace(initial) {
            ic_cdk::println!("Ignoring init settings: {}", e);
        }
    }
    let current = settings::current();
    ic_cdk::println!(
        "Credit Risk Agent initialized (currency {}, report '{}')",
        current.default_currency,
        current.report_file_name
    );
}

/// Score a single applicant submitted through the entry form.
#[query]
fn assess_applicant(form: ApplicantForm) -> AssessmentCard {
    let record = form.to_record(settings::current().default_currency);
    let assessment = classifier::classify_applicant(&record);

    ic_cdk::println!(
        "Assessed applicant: {} (DTI {}, score {})",
        assessment.risk_level,
        assessment.dti_display(),
        record.credit_score
    );

    AssessmentCard::new(&form, &record, assessment)
}

#[query]
fn classify_applicant(record: ApplicantRecord) -> RiskAssessment {
    classifier::classify_applicant(&record)
}

#[query]
fn classify_batch(records: Vec<ApplicantRecord>) -> Vec<RiskAssessment> {
    let assessments = classifier::classify_batch(&records);
    ic_cdk::println!("Classified batch of {} records", assessments.len());
    assessments
}

/// Score an uploaded CSV and return the annotated report for download.
#[update]
fn assess_dataset(csv: Vec<u8>) -> Result<RiskReport, RiskError> {
    let current = settings::current();
    match dataset::assess_dataset(&csv, &current) {
        Ok(report) => {
            ic_cdk::println!(
                "Dataset assessed: {} rows -> {} ({} bytes)",
                report.assessments.len(),
                report.file_name,
                report.csv.len()
            );
            Ok(report)
        }
        Err(e) => {
            ic_cdk::api::debug_print(format!("Dataset rejected: {}", e));
            Err(e)
        }
    }
}

#[query]
fn get_settings() -> AgentSettings {
    settings::current()
}

#[update]
fn set_settings(new_settings: AgentSettings) -> Result<(), RiskError> {
    settings::replace(new_settings.clone())?;
    ic_cdk::println!(
        "Settings updated: currency {}, report '{}'",
        new_settings.default_currency,
        new_settings.report_file_name
    );
    Ok(())
}

#[query]
fn version() -> String {
    "credit_risk_agent v0.1.0".to_string()
}

ic_cdk::export_candid!();
