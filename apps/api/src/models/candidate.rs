use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Question difficulty. Serialized capitalized ("Easy") to match the
/// wire format the evaluation prompt and clients expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// The three contact fields collected before an interview can start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Name,
    Email,
    Phone,
}

impl ContactField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Phone => "phone",
        }
    }
}

/// Candidate contact details. Each field is optional: AI extraction may
/// miss any of them, in which case the chat flow fills the gaps.
/// Mutable until the interview starts, frozen afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateDetails {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl CandidateDetails {
    /// Returns the missing fields in collection order (name, email, phone).
    pub fn missing_fields(&self) -> Vec<ContactField> {
        let mut missing = Vec::new();
        if self.name.is_none() {
            missing.push(ContactField::Name);
        }
        if self.email.is_none() {
            missing.push(ContactField::Email);
        }
        if self.phone.is_none() {
            missing.push(ContactField::Phone);
        }
        missing
    }

    pub fn set(&mut self, field: ContactField, value: String) {
        match field {
            ContactField::Name => self.name = Some(value),
            ContactField::Email => self.email = Some(value),
            ContactField::Phone => self.phone = Some(value),
        }
    }

    /// Maps empty or whitespace-only strings to `None`. The extraction
    /// model occasionally returns `""` instead of `null` for absent fields.
    pub fn normalized(self) -> Self {
        fn clean(v: Option<String>) -> Option<String> {
            v.and_then(|s| {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
        }
        CandidateDetails {
            name: clean(self.name),
            email: clean(self.email),
            phone: clean(self.phone),
        }
    }
}

/// One asked-and-answered question. Appended as each question is
/// answered, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewRecord {
    pub question: String,
    pub answer: String,
    pub difficulty: Difficulty,
}

/// A completed, scored candidate record. Created once per finished
/// interview and immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub details: CandidateDetails,
    pub interview_records: Vec<InterviewRecord>,
    pub final_score: Option<u32>,
    pub final_summary: String,
}

impl CandidateProfile {
    /// Assigns id and timestamp at creation.
    pub fn new(
        details: CandidateDetails,
        interview_records: Vec<InterviewRecord>,
        final_score: Option<u32>,
        final_summary: String,
    ) -> Self {
        CandidateProfile {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            details,
            interview_records,
            final_score,
            final_summary,
        }
    }
}

/// Result of a successful transcript evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationOutcome {
    pub score: Option<u32>,
    pub summary: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationStatus {
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// Outcome of the most recent scoring call. Overwritten on each run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentEvaluation {
    pub status: EvaluationStatus,
    pub data: Option<EvaluationOutcome>,
    pub error: Option<String>,
}

impl Default for CurrentEvaluation {
    fn default() -> Self {
        CurrentEvaluation {
            status: EvaluationStatus::Idle,
            data: None,
            error: None,
        }
    }
}

impl CurrentEvaluation {
    pub fn loading() -> Self {
        CurrentEvaluation {
            status: EvaluationStatus::Loading,
            data: None,
            error: None,
        }
    }

    pub fn succeeded(outcome: EvaluationOutcome) -> Self {
        CurrentEvaluation {
            status: EvaluationStatus::Succeeded,
            data: Some(outcome),
            error: None,
        }
    }

    pub fn failed(message: String) -> Self {
        CurrentEvaluation {
            status: EvaluationStatus::Failed,
            data: None,
            error: Some(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_order_is_name_email_phone() {
        let details = CandidateDetails::default();
        assert_eq!(
            details.missing_fields(),
            vec![ContactField::Name, ContactField::Email, ContactField::Phone]
        );
    }

    #[test]
    fn test_missing_fields_empty_when_complete() {
        let details = CandidateDetails {
            name: Some("Ada Lovelace".to_string()),
            email: Some("ada@example.com".to_string()),
            phone: Some("+44 20 7946 0000".to_string()),
        };
        assert!(details.missing_fields().is_empty());
    }

    #[test]
    fn test_normalized_maps_blank_strings_to_none() {
        let details = CandidateDetails {
            name: Some("  ".to_string()),
            email: Some("".to_string()),
            phone: Some(" +1 555 0100 ".to_string()),
        };
        let normalized = details.normalized();
        assert_eq!(normalized.name, None);
        assert_eq!(normalized.email, None);
        assert_eq!(normalized.phone, Some("+1 555 0100".to_string()));
    }

    #[test]
    fn test_details_deserialize_with_nulls_and_missing_keys() {
        let details: CandidateDetails =
            serde_json::from_str(r#"{"name": "Ada Lovelace", "email": null}"#).unwrap();
        assert_eq!(details.name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(details.email, None);
        assert_eq!(details.phone, None);
    }

    #[test]
    fn test_difficulty_serializes_capitalized() {
        assert_eq!(
            serde_json::to_string(&Difficulty::Easy).unwrap(),
            r#""Easy""#
        );
        let parsed: Difficulty = serde_json::from_str(r#""Medium""#).unwrap();
        assert_eq!(parsed, Difficulty::Medium);
    }

    #[test]
    fn test_evaluation_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&EvaluationStatus::Succeeded).unwrap(),
            r#""succeeded""#
        );
    }

    #[test]
    fn test_current_evaluation_default_is_idle() {
        let eval = CurrentEvaluation::default();
        assert_eq!(eval.status, EvaluationStatus::Idle);
        assert!(eval.data.is_none());
        assert!(eval.error.is_none());
    }
}
