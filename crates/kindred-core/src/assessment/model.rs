use crate::analysis::AnalysisResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a finished session hands to the persister.
///
/// `questions[i]` is the prompt that `responses[i]` answered; steps left
/// blank are already dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentDraft {
    pub questions: Vec<String>,
    pub responses: Vec<String>,
    pub result: AnalysisResult,
}

/// A stored assessment. Every save creates a new record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub id: String,
    pub questions: Vec<String>,
    pub responses: Vec<String>,
    pub result: AnalysisResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AssessmentRecord {
    pub fn from_draft(draft: AssessmentDraft, user_id: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            questions: draft.questions,
            responses: draft.responses,
            result: draft.result,
            user_id,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> AssessmentDraft {
        AssessmentDraft {
            questions: vec!["Q1".into()],
            responses: vec!["R1".into()],
            result: AnalysisResult::fallback(),
        }
    }

    #[test]
    fn test_from_draft_assigns_fresh_ids() {
        let a = AssessmentRecord::from_draft(draft(), None);
        let b = AssessmentRecord::from_draft(draft(), Some("user-1".into()));
        assert_ne!(a.id, b.id);
        assert_eq!(a.questions, b.questions);
        assert_eq!(b.user_id.as_deref(), Some("user-1"));
    }

    #[test]
    fn test_record_json_omits_missing_user() {
        let record = AssessmentRecord::from_draft(draft(), None);
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("user_id").is_none());
        assert_eq!(json["result"]["character"], "Marcus Aurelius");
        let back: AssessmentRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
