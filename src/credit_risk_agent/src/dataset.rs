// src/credit_risk_agent/dataset.rs
//
// Bulk path: uploaded CSV -> applicant records -> annotated CSV report.

use crate::classifier::classify_batch;
use crate::errors::{Result, RiskError};
use crate::settings::AgentSettings;
use crate::types::{ApplicantRecord, Currency, RiskAssessment, RiskReport};

pub const INCOME_COLUMN: &str = "Income";
pub const DEBT_COLUMN: &str = "Debt";
pub const CREDIT_SCORE_COLUMN: &str = "CreditScore";
pub const LOAN_AMOUNT_COLUMN: &str = "LoanAmount";
pub const RISK_LEVEL_COLUMN: &str = "RiskLevel";
pub const REPORT_MIME_TYPE: &str = "text/csv";

/// Parsed upload: the original table plus one record per data row.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub records: Vec<ApplicantRecord>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

struct Columns {
    income: usize,
    debt: usize,
    credit_score: usize,
    loan_amount: Option<usize>,
}

impl Columns {
    fn locate(headers: &[String]) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require = |name: &str| find(name).ok_or_else(|| RiskError::MissingColumn(name.to_string()));

        Ok(Self {
            income: require(INCOME_COLUMN)?,
            debt: require(DEBT_COLUMN)?,
            credit_score: require(CREDIT_SCORE_COLUMN)?,
            loan_amount: find(LOAN_AMOUNT_COLUMN),
        })
    }
}

fn invalid(row: usize, field: &str, value: &str) -> RiskError {
    RiskError::InvalidRecord {
        row: row as u64,
        field: field.to_string(),
        value: value.to_string(),
    }
}

fn parse_amount(fields: &[String], idx: usize, row: usize, field: &str) -> Result<f64> {
    let raw = fields.get(idx).map(String::as_str).unwrap_or("");
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(invalid(row, field, raw)),
    }
}

/// Any finite number, floored and saturated into `u32`.
///
/// Flooring keeps every comparison against the integer thresholds intact:
/// `720.5` still clears 700, `-10` lands on 0.
fn parse_credit_score(fields: &[String], idx: usize, row: usize) -> Result<u32> {
    let score = parse_amount(fields, idx, row, CREDIT_SCORE_COLUMN)?;
    Ok(score.floor() as u32)
}

/// Optional numeric cell; blank or non-numeric text reads as zero.
fn parse_optional_amount(fields: &[String], idx: Option<usize>) -> f64 {
    idx.and_then(|i| fields.get(i))
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Read an uploaded CSV (header row required) into applicant records.
pub fn parse_applicants(bytes: &[u8], currency: Currency) -> Result<Dataset> {
    // Short rows must reach the field parsers so they fail with a row index.
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let columns = Columns::locate(&headers)?;

    let mut rows = Vec::new();
    let mut records = Vec::new();

    for (row, result) in reader.records().enumerate() {
        let fields: Vec<String> = result?.iter().map(str::to_string).collect();
        if fields.len() > headers.len() {
            return Err(RiskError::Csv(format!(
                "row {}: {} fields but the header has {}",
                row,
                fields.len(),
                headers.len()
            )));
        }

        let income = parse_amount(&fields, columns.income, row, INCOME_COLUMN)?;
        let debt = parse_amount(&fields, columns.debt, row, DEBT_COLUMN)?;
        let credit_score = parse_credit_score(&fields, columns.credit_score, row)?;
        let loan_amount = parse_optional_amount(&fields, columns.loan_amount);

        records.push(
            ApplicantRecord::new(income, debt, credit_score)
                .with_loan_amount(loan_amount)
                .with_currency(currency),
        );
        rows.push(fields);
    }

    Ok(Dataset { headers, rows, records })
}

/// Write the table back out with each row's risk label in `RiskLevel`.
///
/// An existing `RiskLevel` column is overwritten in place; otherwise one is
/// appended after the last column. Short rows are padded with empty cells.
pub fn annotate(dataset: &Dataset, assessments: &[RiskAssessment]) -> Result<Vec<u8>> {
    if assessments.len() != dataset.rows.len() {
        return Err(RiskError::Csv(format!(
            "{} assessments for {} rows",
            assessments.len(),
            dataset.rows.len()
        )));
    }

    let existing = dataset.headers.iter().position(|h| h.trim() == RISK_LEVEL_COLUMN);

    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut headers = dataset.headers.clone();
    if existing.is_none() {
        headers.push(RISK_LEVEL_COLUMN.to_string());
    }
    writer.write_record(&headers)?;

    for (fields, assessment) in dataset.rows.iter().zip(assessments) {
        let mut out = fields.clone();
        out.resize(dataset.headers.len(), String::new());
        let label = assessment.presentation.label.clone();
        match existing {
            Some(idx) => out[idx] = label,
            None => out.push(label),
        }
        writer.write_record(&out)?;
    }

    writer
        .into_inner()
        .map_err(|e| RiskError::Csv(e.error().to_string()))
}

/// Parse, classify and annotate an upload in one go.
pub fn assess_dataset(bytes: &[u8], settings: &AgentSettings) -> Result<RiskReport> {
    let dataset = parse_applicants(bytes, settings.default_currency)?;
    let assessments = classify_batch(&dataset.records);
    let csv = annotate(&dataset, &assessments)?;

    Ok(RiskReport {
        file_name: settings.report_file_name.clone(),
        mime_type: REPORT_MIME_TYPE.to_string(),
        csv,
        assessments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RiskLevel;

    const UPLOAD: &str = "Name,Income,Debt,CreditScore\n\
                          Ada,5000,1000,720\n\
                          Bola,4000,1800,650\n\
                          Chidi,3000,2000,580\n";

    #[test]
    fn parses_required_columns() {
        let dataset = parse_applicants(UPLOAD.as_bytes(), Currency::Usd).unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.headers, vec!["Name", "Income", "Debt", "CreditScore"]);
        assert_eq!(dataset.records[1], ApplicantRecord::new(4000.0, 1800.0, 650));
    }

    #[test]
    fn missing_column_is_reported() {
        let err = parse_applicants(b"Income,Debt\n100,10\n", Currency::Usd).unwrap_err();
        assert_eq!(err, RiskError::MissingColumn("CreditScore".to_string()));
    }

    #[test]
    fn blank_field_names_the_row() {
        let csv = "Income,Debt,CreditScore\n5000,1000,720\n4000,1800,650\n3000,2000,\n";
        let err = parse_applicants(csv.as_bytes(), Currency::Usd).unwrap_err();
        assert_eq!(
            err,
            RiskError::InvalidRecord {
                row: 2,
                field: "CreditScore".to_string(),
                value: String::new(),
            }
        );
    }

    #[test]
    fn non_numeric_income_is_rejected() {
        let csv = "Income,Debt,CreditScore\nlots,1000,720\n";
        let err = parse_applicants(csv.as_bytes(), Currency::Usd).unwrap_err();
        assert!(matches!(err, RiskError::InvalidRecord { row: 0, ref field, .. } if field == "Income"));
    }

    #[test]
    fn nan_is_not_a_usable_number() {
        let csv = "Income,Debt,CreditScore\n5000,NaN,720\n";
        let err = parse_applicants(csv.as_bytes(), Currency::Usd).unwrap_err();
        assert!(matches!(err, RiskError::InvalidRecord { ref field, .. } if field == "Debt"));
    }

    #[test]
    fn integral_decimal_credit_score() {
        let csv = "Income,Debt,CreditScore\n5000,1000,720.0\n";
        let dataset = parse_applicants(csv.as_bytes(), Currency::Usd).unwrap();
        assert_eq!(dataset.records[0].credit_score, 720);
    }

    #[test]
    fn fractional_and_negative_credit_scores_classify() {
        let csv = "Income,Debt,CreditScore\n5000,1000,720.5\n5000,1000,699.9\n5000,1000,-10\n";
        let dataset = parse_applicants(csv.as_bytes(), Currency::Usd).unwrap();
        let scores: Vec<u32> = dataset.records.iter().map(|r| r.credit_score).collect();
        assert_eq!(scores, vec![720, 699, 0]);

        let levels: Vec<RiskLevel> = classify_batch(&dataset.records).iter().map(|a| a.risk_level).collect();
        assert_eq!(levels, vec![RiskLevel::LowRisk, RiskLevel::MediumRisk, RiskLevel::HighRisk]);
    }

    #[test]
    fn loan_amount_column_is_optional() {
        let csv = "Income,Debt,CreditScore,LoanAmount\n5000,1000,720,25000\n5000,1000,720,\n";
        let dataset = parse_applicants(csv.as_bytes(), Currency::Ngn).unwrap();
        assert_eq!(dataset.records[0].loan_amount, 25000.0);
        assert_eq!(dataset.records[1].loan_amount, 0.0);
        assert_eq!(dataset.records[0].currency, Currency::Ngn);
    }

    #[test]
    fn unparseable_loan_amount_reads_as_zero() {
        let csv = "Income,Debt,CreditScore,LoanAmount\n5000,1000,720,N/A\n";
        let report = assess_dataset(csv.as_bytes(), &AgentSettings::default()).unwrap();
        assert_eq!(report.assessments[0].risk_level, RiskLevel::LowRisk);
        assert_eq!(
            String::from_utf8(report.csv).unwrap(),
            "Income,Debt,CreditScore,LoanAmount,RiskLevel\n5000,1000,720,N/A,Low Risk\n"
        );

        let dataset = parse_applicants(csv.as_bytes(), Currency::Usd).unwrap();
        assert_eq!(dataset.records[0].loan_amount, 0.0);
    }

    #[test]
    fn short_row_names_the_missing_field() {
        let csv = "Income,Debt,CreditScore\n5000,1000,720\n4000,1800\n";
        let err = parse_applicants(csv.as_bytes(), Currency::Usd).unwrap_err();
        assert_eq!(
            err,
            RiskError::InvalidRecord {
                row: 1,
                field: "CreditScore".to_string(),
                value: String::new(),
            }
        );
    }

    #[test]
    fn long_rows_are_csv_errors() {
        let csv = "Income,Debt,CreditScore\n5000,1000,720,extra\n";
        assert!(matches!(
            parse_applicants(csv.as_bytes(), Currency::Usd),
            Err(RiskError::Csv(_))
        ));
    }

    #[test]
    fn short_row_missing_only_risk_level_is_padded() {
        let csv = "Income,Debt,CreditScore,RiskLevel\n5000,1000,720\n";
        let report = assess_dataset(csv.as_bytes(), &AgentSettings::default()).unwrap();
        assert_eq!(
            String::from_utf8(report.csv).unwrap(),
            "Income,Debt,CreditScore,RiskLevel\n5000,1000,720,Low Risk\n"
        );
    }

    #[test]
    fn annotate_rejects_mismatched_assessments() {
        let dataset = parse_applicants(UPLOAD.as_bytes(), Currency::Usd).unwrap();
        let assessments = classify_batch(&dataset.records[..2]);
        assert!(matches!(annotate(&dataset, &assessments), Err(RiskError::Csv(_))));
    }

    #[test]
    fn annotate_appends_risk_level() {
        let dataset = parse_applicants(UPLOAD.as_bytes(), Currency::Usd).unwrap();
        let assessments = classify_batch(&dataset.records);
        let out = String::from_utf8(annotate(&dataset, &assessments).unwrap()).unwrap();

        let expected = "Name,Income,Debt,CreditScore,RiskLevel\n\
                        Ada,5000,1000,720,Low Risk\n\
                        Bola,4000,1800,650,Medium Risk\n\
                        Chidi,3000,2000,580,High Risk\n";
        assert_eq!(out, expected);
    }

    #[test]
    fn annotate_overwrites_existing_risk_level() {
        let csv = "Income,Debt,CreditScore,RiskLevel\n5000,1000,720,stale\n";
        let dataset = parse_applicants(csv.as_bytes(), Currency::Usd).unwrap();
        let assessments = classify_batch(&dataset.records);
        let out = String::from_utf8(annotate(&dataset, &assessments).unwrap()).unwrap();
        assert_eq!(out, "Income,Debt,CreditScore,RiskLevel\n5000,1000,720,Low Risk\n");
    }

    #[test]
    fn header_only_upload_gives_empty_report() {
        let report = assess_dataset(b"Income,Debt,CreditScore\n", &AgentSettings::default()).unwrap();
        assert!(report.assessments.is_empty());
        assert_eq!(String::from_utf8(report.csv).unwrap(), "Income,Debt,CreditScore,RiskLevel\n");
    }

    #[test]
    fn report_uses_settings() {
        let settings = AgentSettings {
            default_currency: Currency::Usd,
            report_file_name: "q3.csv".to_string(),
        };
        let report = assess_dataset(UPLOAD.as_bytes(), &settings).unwrap();
        assert_eq!(report.file_name, "q3.csv");
        assert_eq!(report.mime_type, "text/csv");
        let levels: Vec<RiskLevel> = report.assessments.iter().map(|a| a.risk_level).collect();
        assert_eq!(levels, vec![RiskLevel::LowRisk, RiskLevel::MediumRisk, RiskLevel::HighRisk]);
    }
}
