//! Assessment DTOs: the local JSON file and the remote table row.

use chrono::{DateTime, Utc};
use kindred_core::analysis::AnalysisResult;
use kindred_core::assessment::AssessmentRecord;
use kindred_core::error::KindredError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const ASSESSMENT_SCHEMA_VERSION: &str = "1.0.0";

/// One assessment file under `assessments/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentV1_0_0 {
    pub version: String,
    pub id: String,
    pub questions: Vec<String>,
    pub responses: Vec<String>,
    pub result: AnalysisResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&AssessmentRecord> for AssessmentV1_0_0 {
    fn from(record: &AssessmentRecord) -> Self {
        Self {
            version: ASSESSMENT_SCHEMA_VERSION.to_string(),
            id: record.id.clone(),
            questions: record.questions.clone(),
            responses: record.responses.clone(),
            result: record.result.clone(),
            user_id: record.user_id.clone(),
            created_at: record.created_at,
        }
    }
}

impl From<AssessmentV1_0_0> for AssessmentRecord {
    fn from(dto: AssessmentV1_0_0) -> Self {
        Self {
            id: dto.id,
            questions: dto.questions,
            responses: dto.responses,
            result: dto.result,
            user_id: dto.user_id,
            created_at: dto.created_at,
        }
    }
}

/// A row of the remote assessments table.
///
/// `result` is kept as raw JSON on the way in: some tables store it as a
/// jsonb object, others as a JSON-encoded string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentRow {
    pub id: String,
    #[serde(default)]
    pub questions: Vec<String>,
    #[serde(default)]
    pub responses: Vec<String>,
    pub result: Value,
    #[serde(default)]
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AssessmentRow {
    pub fn from_record(record: &AssessmentRecord) -> Result<Self, KindredError> {
        Ok(Self {
            id: record.id.clone(),
            questions: record.questions.clone(),
            responses: record.responses.clone(),
            result: serde_json::to_value(&record.result)?,
            user_id: record.user_id.clone(),
            created_at: record.created_at,
        })
    }
}

impl TryFrom<AssessmentRow> for AssessmentRecord {
    type Error = KindredError;

    fn try_from(row: AssessmentRow) -> Result<Self, Self::Error> {
        let result: AnalysisResult = match row.result {
            Value::String(encoded) => serde_json::from_str(&encoded)?,
            other => serde_json::from_value(other)?,
        };
        Ok(Self {
            id: row.id,
            questions: row.questions,
            responses: row.responses,
            result,
            user_id: row.user_id,
            created_at: row.created_at,
        })
    }
}
