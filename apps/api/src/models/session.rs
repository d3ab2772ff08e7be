use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::candidate::{
    CandidateDetails, CandidateProfile, ContactField, CurrentEvaluation, Difficulty,
    EvaluationOutcome, InterviewRecord,
};

/// The interviewee wizard steps, in order. Serialized camelCase
/// ("collectingInfo") to match the persisted-blob format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WizardStep {
    Upload,
    CollectingInfo,
    Ready,
    Interviewing,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatSender {
    Bot,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: ChatSender,
    pub text: String,
}

impl ChatMessage {
    pub fn bot(text: impl Into<String>) -> Self {
        ChatMessage {
            sender: ChatSender::Bot,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        ChatMessage {
            sender: ChatSender::User,
            text: text.into(),
        }
    }
}

/// The currently posed question. The per-question countdown is a
/// wall-clock deadline (`asked_at + duration_secs`) rather than a ticking
/// interval, enforced lazily on reads and submissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveQuestion {
    pub text: String,
    pub difficulty: Difficulty,
    pub asked_at: DateTime<Utc>,
    pub duration_secs: u32,
}

impl ActiveQuestion {
    pub fn deadline(&self) -> DateTime<Utc> {
        self.asked_at + Duration::seconds(i64::from(self.duration_secs))
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.deadline()
    }

    pub fn remaining_secs(&self, now: DateTime<Utc>) -> u32 {
        let remaining = (self.deadline() - now).num_seconds();
        remaining.clamp(0, i64::from(u32::MAX)) as u32
    }
}

/// Snapshot of the wizard state for the single in-progress session.
/// Replaced on every relevant change; cleared on successful completion.
/// `interview_records.len()` doubles as the current question index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InProgressInterview {
    pub step: WizardStep,
    pub details: CandidateDetails,
    pub interview_records: Vec<InterviewRecord>,
    pub missing_fields: Vec<ContactField>,
    pub chat_messages: Vec<ChatMessage>,
    pub active_question: Option<ActiveQuestion>,
}

/// The whole persisted application state: one JSON blob under a fixed
/// key in the KV store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSnapshot {
    pub profiles: Vec<CandidateProfile>,
    pub in_progress: Option<InProgressInterview>,
    pub current_evaluation: CurrentEvaluation,
}

impl AppSnapshot {
    /// Records a finished interview: prepends the profile (the list is
    /// most-recent-first), marks the evaluation succeeded, and clears the
    /// in-progress session.
    pub fn add_profile(&mut self, profile: CandidateProfile) {
        self.current_evaluation = CurrentEvaluation::succeeded(EvaluationOutcome {
            score: profile.final_score,
            summary: profile.final_summary.clone(),
        });
        self.profiles.insert(0, profile);
        self.in_progress = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn question_at(asked_at: DateTime<Utc>, duration_secs: u32) -> ActiveQuestion {
        ActiveQuestion {
            text: "What is ownership in Rust?".to_string(),
            difficulty: Difficulty::Easy,
            asked_at,
            duration_secs,
        }
    }

    #[test]
    fn test_question_expires_exactly_at_deadline() {
        let asked = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let q = question_at(asked, 30);
        assert!(!q.is_expired(asked + Duration::seconds(29)));
        assert!(q.is_expired(asked + Duration::seconds(30)));
    }

    #[test]
    fn test_remaining_secs_clamps_at_zero() {
        let asked = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let q = question_at(asked, 30);
        assert_eq!(q.remaining_secs(asked + Duration::seconds(10)), 20);
        assert_eq!(q.remaining_secs(asked + Duration::seconds(90)), 0);
    }

    #[test]
    fn test_add_profile_prepends_and_clears_session() {
        let mut snap = AppSnapshot::default();
        snap.in_progress = Some(InProgressInterview {
            step: WizardStep::Finished,
            details: CandidateDetails::default(),
            interview_records: vec![],
            missing_fields: vec![],
            chat_messages: vec![],
            active_question: None,
        });

        let first = CandidateProfile::new(CandidateDetails::default(), vec![], Some(70), "ok".into());
        let second =
            CandidateProfile::new(CandidateDetails::default(), vec![], Some(90), "great".into());
        let second_id = second.id;

        snap.add_profile(first);
        snap.add_profile(second);

        assert_eq!(snap.profiles.len(), 2);
        assert_eq!(snap.profiles[0].id, second_id, "newest profile comes first");
        assert!(snap.in_progress.is_none());
        assert_eq!(
            snap.current_evaluation.data.as_ref().and_then(|d| d.score),
            Some(90)
        );
    }

    #[test]
    fn test_wizard_step_serializes_camel_case() {
        assert_eq!(
            serde_json::to_string(&WizardStep::CollectingInfo).unwrap(),
            r#""collectingInfo""#
        );
        let step: WizardStep = serde_json::from_str(r#""interviewing""#).unwrap();
        assert_eq!(step, WizardStep::Interviewing);
    }

    #[test]
    fn test_snapshot_deserializes_from_empty_object() {
        // A fresh KV key holds nothing; an empty blob must decode to defaults.
        let snap: AppSnapshot = serde_json::from_str("{}").unwrap();
        assert!(snap.profiles.is_empty());
        assert!(snap.in_progress.is_none());
    }
}
