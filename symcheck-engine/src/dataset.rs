//! Dataset loading and sentence rendering.
//!
//! The corpus is a tabular file of prior cases, read entirely into memory at
//! startup. `.csv` files are parsed with the `csv` crate and `.xlsx`/`.xls`
//! with `calamine`. Schema violations are fatal: every required column must
//! be present in every loaded file.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use serde::Deserialize;
use tracing::info;

use symcheck_rag::Document;

use crate::error::{EngineError, Result};

/// Columns every dataset file must carry, in the source's naming.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "Patient_ID",
    "Reported_Symptoms",
    "Suspected_Condition",
    "Severity_Score",
    "Medications_Used",
];

/// One row of the source dataset. Immutable; read once at startup.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CaseRecord {
    /// Patient identifier.
    #[serde(rename = "Patient_ID")]
    pub patient_id: String,
    /// Reported symptoms, free text.
    #[serde(rename = "Reported_Symptoms")]
    pub reported_symptoms: String,
    /// Suspected condition, free text.
    #[serde(rename = "Suspected_Condition")]
    pub suspected_condition: String,
    /// Numeric severity score.
    #[serde(rename = "Severity_Score")]
    pub severity_score: f64,
    /// Medications used, free text.
    #[serde(rename = "Medications_Used")]
    pub medications_used: String,
}

/// Render a case record into its natural-language sentence.
///
/// The projection is deterministic and contains every field value verbatim.
pub fn render_sentence(record: &CaseRecord) -> String {
    format!(
        "This is case for Patient {}. The patient experienced symptoms like {}. \
         The suspected condition was {} with severity score {}. Medications advised: {}.",
        record.patient_id,
        record.reported_symptoms,
        record.suspected_condition,
        record.severity_score,
        record.medications_used,
    )
}

/// Project case records into retrieval documents, one per record.
///
/// Document ids are positional (`case_1`, `case_2`, ...) so duplicate
/// patient identifiers cannot collide; the patient id is kept as metadata.
pub fn to_documents(records: &[CaseRecord]) -> Vec<Document> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| Document {
            id: format!("case_{}", i + 1),
            text: render_sentence(record),
            metadata: [("patient_id".to_string(), record.patient_id.clone())].into(),
        })
        .collect()
}

/// Load all case records from a dataset file.
///
/// The format is chosen by file extension: `csv`, `xlsx`, or `xls`.
///
/// # Errors
///
/// Returns [`EngineError::Dataset`] if the file cannot be read, a required
/// column is missing, or a severity score is not numeric.
pub fn load_cases(path: impl AsRef<Path>) -> Result<Vec<CaseRecord>> {
    let path = path.as_ref();
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();

    let records = match extension.to_ascii_lowercase().as_str() {
        "csv" => load_csv(path),
        "xlsx" | "xls" => load_spreadsheet(path),
        other => Err(EngineError::Dataset(format!(
            "unsupported dataset format '{other}' for {}",
            path.display()
        ))),
    }?;

    info!(case_count = records.len(), path = %path.display(), "loaded dataset");
    Ok(records)
}

fn missing_columns(headers: &[String]) -> Vec<&'static str> {
    REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|required| !headers.iter().any(|h| h == required))
        .collect()
}

fn load_csv(path: &Path) -> Result<Vec<CaseRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| EngineError::Dataset(format!("cannot read {}: {e}", path.display())))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| EngineError::Dataset(format!("cannot read header row: {e}")))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let missing = missing_columns(&headers);
    if !missing.is_empty() {
        return Err(EngineError::Dataset(format!(
            "dataset is missing required columns: {}",
            missing.join(", ")
        )));
    }

    let mut records = Vec::new();
    for (i, row) in reader.deserialize::<CaseRecord>().enumerate() {
        let record =
            row.map_err(|e| EngineError::Dataset(format!("invalid row {}: {e}", i + 2)))?;
        records.push(record);
    }
    Ok(records)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn cell_number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn load_spreadsheet(path: &Path) -> Result<Vec<CaseRecord>> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| EngineError::Dataset(format!("cannot read {}: {e}", path.display())))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| EngineError::Dataset("workbook has no sheets".into()))?
        .map_err(|e| EngineError::Dataset(format!("cannot read first sheet: {e}")))?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .ok_or_else(|| EngineError::Dataset("dataset sheet is empty".into()))?
        .iter()
        .map(|c| cell_text(c).trim().to_string())
        .collect();
    let missing = missing_columns(&headers);
    if !missing.is_empty() {
        return Err(EngineError::Dataset(format!(
            "dataset is missing required columns: {}",
            missing.join(", ")
        )));
    }

    let column = |name: &str| headers.iter().position(|h| h == name).unwrap_or_default();
    let (id_col, symptoms_col, condition_col, severity_col, medications_col) = (
        column("Patient_ID"),
        column("Reported_Symptoms"),
        column("Suspected_Condition"),
        column("Severity_Score"),
        column("Medications_Used"),
    );

    let mut records = Vec::new();
    for (i, row) in rows.enumerate() {
        let severity_score = row.get(severity_col).and_then(cell_number).ok_or_else(|| {
            EngineError::Dataset(format!("row {}: severity score is not numeric", i + 2))
        })?;
        records.push(CaseRecord {
            patient_id: row.get(id_col).map(cell_text).unwrap_or_default(),
            reported_symptoms: row.get(symptoms_col).map(cell_text).unwrap_or_default(),
            suspected_condition: row.get(condition_col).map(cell_text).unwrap_or_default(),
            severity_score,
            medications_used: row.get(medications_col).map(cell_text).unwrap_or_default(),
        });
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn sample_record() -> CaseRecord {
        CaseRecord {
            patient_id: "P-104".into(),
            reported_symptoms: "fever, dry cough".into(),
            suspected_condition: "Influenza".into(),
            severity_score: 6.0,
            medications_used: "Paracetamol".into(),
        }
    }

    #[test]
    fn rendered_sentence_contains_every_field_verbatim() {
        let sentence = render_sentence(&sample_record());
        assert!(sentence.contains("P-104"));
        assert!(sentence.contains("fever, dry cough"));
        assert!(sentence.contains("Influenza"));
        assert!(sentence.contains("6"));
        assert!(sentence.contains("Paracetamol"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let record = sample_record();
        assert_eq!(render_sentence(&record), render_sentence(&record));
    }

    #[test]
    fn documents_get_positional_ids() {
        let docs = to_documents(&[sample_record(), sample_record()]);
        assert_eq!(docs[0].id, "case_1");
        assert_eq!(docs[1].id, "case_2");
        assert_eq!(docs[0].metadata.get("patient_id").map(String::as_str), Some("P-104"));
    }

    #[test]
    fn csv_round_trips_records() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(
            file,
            "Patient_ID,Reported_Symptoms,Suspected_Condition,Severity_Score,Medications_Used"
        )
        .unwrap();
        writeln!(file, "P-1,\"fever, cough\",Influenza,6,Paracetamol").unwrap();
        writeln!(file, "P-2,chest pain,Angina,8,Nitroglycerin").unwrap();

        let records = load_cases(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].reported_symptoms, "fever, cough");
        assert_eq!(records[1].severity_score, 8.0);
    }

    #[test]
    fn missing_column_is_a_schema_error() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "Patient_ID,Reported_Symptoms,Suspected_Condition,Severity_Score").unwrap();
        writeln!(file, "P-1,fever,Influenza,6").unwrap();

        let err = load_cases(file.path()).unwrap_err();
        assert!(matches!(err, EngineError::Dataset(_)));
        assert!(err.to_string().contains("Medications_Used"));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = load_cases("cases.parquet").unwrap_err();
        assert!(matches!(err, EngineError::Dataset(_)));
    }

    #[test]
    fn non_numeric_severity_is_rejected() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(
            file,
            "Patient_ID,Reported_Symptoms,Suspected_Condition,Severity_Score,Medications_Used"
        )
        .unwrap();
        writeln!(file, "P-1,fever,Influenza,high,Paracetamol").unwrap();

        let err = load_cases(file.path()).unwrap_err();
        assert!(matches!(err, EngineError::Dataset(_)));
    }
}
