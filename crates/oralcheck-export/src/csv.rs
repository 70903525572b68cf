use oralcheck_core::models::item::ItemId;
use oralcheck_core::models::patient::Patient;
use oralcheck_instruments::assessment::Assessment;

use crate::error::ExportError;

fn header() -> Vec<String> {
    let mut columns = vec![
        "chart_number".to_string(),
        "patient_name".to_string(),
        "assessment_date".to_string(),
        "state".to_string(),
    ];
    for item in ItemId::ALL {
        columns.push(format!("{}_method", item.key()));
        columns.push(format!("{}_value", item.key()));
        columns.push(format!("{}_affected", item.key()));
    }
    columns.push("affected_count".to_string());
    columns.push("diagnosis".to_string());
    columns
}

fn row(patient: &Patient, assessment: &Assessment) -> Vec<String> {
    let mut fields = vec![
        patient.chart_number.clone(),
        patient.name.clone(),
        assessment.assessment_date().to_string(),
        assessment.state().key().to_string(),
    ];
    for item in ItemId::ALL {
        match assessment.verdict(item) {
            Some(verdict) => {
                fields.push(verdict.method.key().to_string());
                fields.push(verdict.display.clone());
                fields.push(verdict.affected.to_string());
            }
            None => fields.extend([String::new(), String::new(), String::new()]),
        }
    }
    fields.push(assessment.affected_count().to_string());
    fields.push(assessment.diagnosis().to_string());
    fields
}

/// One row per assessment, items in clinical order. Unrecorded items leave
/// their three columns empty.
pub fn assessments_to_csv(rows: &[(Patient, Assessment)]) -> Result<String, ExportError> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());
    writer.write_record(header())?;
    for (patient, assessment) in rows {
        writer.write_record(row(patient, assessment))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.to_string()))?;
    tracing::debug!(rows = rows.len(), bytes = bytes.len(), "assessment csv written");
    String::from_utf8(bytes).map_err(|e| ExportError::Csv(e.to_string()))
}
