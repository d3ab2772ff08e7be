//! The interviewee wizard — a linear state machine:
//! upload → collectingInfo → ready → interviewing → finished.
//!
//! Everything here is pure transition logic over `InProgressInterview`;
//! handlers own the LLM calls and persistence around it.

use chrono::{DateTime, Utc};

use crate::errors::AppError;
use crate::interview::questions::{QuestionSlot, QUESTION_PLAN};
use crate::models::candidate::{CandidateDetails, InterviewRecord};
use crate::models::session::{ActiveQuestion, ChatMessage, InProgressInterview, WizardStep};

/// Opening bot message when contact details are incomplete.
pub const COLLECTING_INFO_GREETING: &str = "Thanks for the resume. I just need a bit more info.";

/// What the caller must do after an answer is recorded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Advance {
    /// Ask the next question from this plan slot.
    Next(QuestionSlot),
    /// The plan is exhausted; the interview is finished.
    Finished,
}

/// Starts a session from extracted candidate details. Complete details go
/// straight to `ready`; any missing field routes to `collectingInfo` with
/// the missing field names and an opening bot message.
pub fn begin_session(details: CandidateDetails) -> InProgressInterview {
    let missing_fields = details.missing_fields();
    let (step, chat_messages) = if missing_fields.is_empty() {
        (WizardStep::Ready, Vec::new())
    } else {
        (
            WizardStep::CollectingInfo,
            vec![ChatMessage::bot(COLLECTING_INFO_GREETING)],
        )
    };
    InProgressInterview {
        step,
        details,
        interview_records: Vec::new(),
        missing_fields,
        chat_messages,
        active_question: None,
    }
}

/// One chat submission fills the first remaining missing field. When none
/// remain, the session moves to `ready`.
pub fn submit_contact_reply(
    session: &mut InProgressInterview,
    input: &str,
) -> Result<(), AppError> {
    if session.step != WizardStep::CollectingInfo {
        return Err(AppError::Validation(
            "No contact details are being collected.".to_string(),
        ));
    }
    let input = input.trim();
    if input.is_empty() {
        return Err(AppError::Validation("Message cannot be empty.".to_string()));
    }
    if session.missing_fields.is_empty() {
        // collectingInfo with nothing missing cannot be reached via the
        // transitions above; treat it as ready rather than erroring.
        session.step = WizardStep::Ready;
        return Ok(());
    }

    let field = session.missing_fields.remove(0);
    session.chat_messages.push(ChatMessage::user(input));
    session.details.set(field, input.to_string());

    if session.missing_fields.is_empty() {
        session.step = WizardStep::Ready;
    }
    Ok(())
}

/// Moves a `ready` session into `interviewing` and returns the first plan
/// slot to pose. Details are frozen from this point on.
pub fn start_interview(session: &mut InProgressInterview) -> Result<QuestionSlot, AppError> {
    if session.step != WizardStep::Ready {
        return Err(AppError::Validation(
            "The interview cannot be started from this step.".to_string(),
        ));
    }
    session.step = WizardStep::Interviewing;
    Ok(QUESTION_PLAN[0])
}

/// Poses a generated question against a plan slot, starting its deadline.
pub fn pose_question(
    session: &mut InProgressInterview,
    text: String,
    slot: QuestionSlot,
    now: DateTime<Utc>,
) {
    session.active_question = Some(ActiveQuestion {
        text,
        difficulty: slot.difficulty,
        asked_at: now,
        duration_secs: slot.duration_secs,
    });
}

/// Records the answer to the posed question and advances: either the next
/// plan slot, or `finished` once the configured question count is reached.
pub fn submit_answer(
    session: &mut InProgressInterview,
    answer: &str,
) -> Result<Advance, AppError> {
    if session.step != WizardStep::Interviewing {
        return Err(AppError::Validation(
            "No interview is in progress.".to_string(),
        ));
    }
    let question = session
        .active_question
        .take()
        .ok_or_else(|| AppError::Validation("No question is currently posed.".to_string()))?;

    session.interview_records.push(InterviewRecord {
        question: question.text,
        answer: answer.to_string(),
        difficulty: question.difficulty,
    });

    let next_index = session.interview_records.len();
    if next_index < QUESTION_PLAN.len() {
        Ok(Advance::Next(QUESTION_PLAN[next_index]))
    } else {
        session.step = WizardStep::Finished;
        Ok(Advance::Finished)
    }
}

/// Deadline enforcement: a question past its deadline auto-submits with
/// the draft answer supplied so far, exactly as a manual submission.
/// Returns `None` when nothing is overdue.
pub fn expire_question(
    session: &mut InProgressInterview,
    draft: &str,
    now: DateTime<Utc>,
) -> Result<Option<Advance>, AppError> {
    let overdue = session.step == WizardStep::Interviewing
        && session
            .active_question
            .as_ref()
            .is_some_and(|q| q.is_expired(now));
    if !overdue {
        return Ok(None);
    }
    submit_answer(session, draft).map(Some)
}
