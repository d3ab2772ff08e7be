//! HTTP surface of the interviewee wizard. Handlers orchestrate the pure
//! transitions in `wizard` with the LLM calls and the persisted store:
//! load snapshot, act, save snapshot.

use axum::extract::{Multipart, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::interview::questions::{self, QUESTION_PLAN};
use crate::interview::wizard::{self, Advance};
use crate::interview::{evaluation, extraction};
use crate::llm_client::Llm;
use crate::models::candidate::{
    CandidateDetails, CandidateProfile, ContactField, CurrentEvaluation, Difficulty,
    EvaluationStatus, InterviewRecord,
};
use crate::models::session::{AppSnapshot, ChatMessage, WizardStep};
use crate::state::AppState;
use crate::store::SessionStore;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    /// The answer text. Clients submitting on deadline expiry send the
    /// draft typed so far; it may be empty.
    #[serde(default)]
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct QuestionView {
    pub text: String,
    pub difficulty: Difficulty,
    /// 1-based position in the plan.
    pub number: usize,
    pub total: usize,
    pub remaining_secs: u32,
}

/// The wizard snapshot returned by every session endpoint.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub step: WizardStep,
    pub details: CandidateDetails,
    pub missing_fields: Vec<ContactField>,
    pub chat_messages: Vec<ChatMessage>,
    pub interview_records: Vec<InterviewRecord>,
    pub question: Option<QuestionView>,
    pub current_evaluation: CurrentEvaluation,
}

impl SessionView {
    pub fn from_snapshot(snap: &AppSnapshot, now: DateTime<Utc>) -> Self {
        match &snap.in_progress {
            Some(session) => SessionView {
                step: session.step,
                details: session.details.clone(),
                missing_fields: session.missing_fields.clone(),
                chat_messages: session.chat_messages.clone(),
                interview_records: session.interview_records.clone(),
                question: session.active_question.as_ref().map(|q| QuestionView {
                    text: q.text.clone(),
                    difficulty: q.difficulty,
                    number: session.interview_records.len() + 1,
                    total: QUESTION_PLAN.len(),
                    remaining_secs: q.remaining_secs(now),
                }),
                current_evaluation: snap.current_evaluation.clone(),
            },
            // No session: the wizard sits at the upload screen.
            None => SessionView {
                step: WizardStep::Upload,
                details: CandidateDetails::default(),
                missing_fields: Vec::new(),
                chat_messages: Vec::new(),
                interview_records: Vec::new(),
                question: None,
                current_evaluation: snap.current_evaluation.clone(),
            },
        }
    }
}

/// GET /api/v1/session
/// Applies lazy deadline enforcement before reporting the snapshot.
pub async fn handle_get_session(
    State(state): State<AppState>,
) -> Result<Json<SessionView>, AppError> {
    let mut snap = state.store.load().await?;
    if settle_expired(&state, &mut snap, Utc::now()).await? {
        state.store.save(&snap).await?;
    }
    Ok(Json(SessionView::from_snapshot(&snap, Utc::now())))
}

/// POST /api/v1/session/resume — multipart PDF upload.
/// Invalid uploads are rejected with no state transition.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<SessionView>, AppError> {
    let mut snap = state.store.load().await?;
    if snap.in_progress.is_some() {
        return Err(AppError::Validation(
            "An interview is already in progress.".to_string(),
        ));
    }

    let mut upload: Option<(Option<String>, Option<String>, bytes::Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid upload: {e}")))?
    {
        if field.name() == Some("file") {
            let content_type = field.content_type().map(str::to_string);
            let file_name = field.file_name().map(str::to_string);
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Invalid upload: {e}")))?;
            upload = Some((content_type, file_name, data));
        }
    }

    let (content_type, file_name, data) =
        upload.ok_or_else(|| AppError::Validation("No file provided.".to_string()))?;
    if data.is_empty() {
        return Err(AppError::Validation("No file provided.".to_string()));
    }
    if !is_pdf_upload(content_type.as_deref(), file_name.as_deref()) {
        return Err(AppError::Validation("Invalid file type.".to_string()));
    }

    let text = extraction::extract_pdf_text(&data)?;
    let details = extraction::extract_details(state.llm.as_ref(), &text).await?;
    info!(
        "Resume parsed: name={} email={} phone={}",
        details.name.is_some(),
        details.email.is_some(),
        details.phone.is_some()
    );

    snap.in_progress = Some(wizard::begin_session(details));
    state.store.save(&snap).await?;
    Ok(Json(SessionView::from_snapshot(&snap, Utc::now())))
}

/// POST /api/v1/session/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<SessionView>, AppError> {
    let mut snap = state.store.load().await?;
    let session = snap
        .in_progress
        .as_mut()
        .ok_or_else(|| AppError::Validation("No interview session in progress.".to_string()))?;
    wizard::submit_contact_reply(session, &req.message)?;
    state.store.save(&snap).await?;
    Ok(Json(SessionView::from_snapshot(&snap, Utc::now())))
}

/// POST /api/v1/session/start
pub async fn handle_start(State(state): State<AppState>) -> Result<Json<SessionView>, AppError> {
    let mut snap = state.store.load().await?;
    let session = snap
        .in_progress
        .as_mut()
        .ok_or_else(|| AppError::Validation("No interview session in progress.".to_string()))?;
    let slot = wizard::start_interview(session)?;
    // On generation failure nothing is saved: the session stays at `ready`
    // and the user retries the start action.
    let text = questions::generate_question(state.llm.as_ref(), slot.difficulty).await?;
    wizard::pose_question(session, text, slot, Utc::now());
    state.store.save(&snap).await?;
    Ok(Json(SessionView::from_snapshot(&snap, Utc::now())))
}

/// POST /api/v1/session/answer
/// A submission arriving past the deadline records the same entry the
/// auto-submit path would, so no separate handling is needed here.
pub async fn handle_answer(
    State(state): State<AppState>,
    Json(req): Json<AnswerRequest>,
) -> Result<Json<SessionView>, AppError> {
    let mut snap = state.store.load().await?;
    let session = snap
        .in_progress
        .as_mut()
        .ok_or_else(|| AppError::Validation("No interview is in progress.".to_string()))?;
    let advance = wizard::submit_answer(session, &req.answer)?;

    match advance {
        Advance::Next(slot) => {
            let text =
                questions::generate_question(state.llm.as_ref(), slot.difficulty).await?;
            if let Some(session) = snap.in_progress.as_mut() {
                wizard::pose_question(session, text, slot, Utc::now());
            }
        }
        Advance::Finished => {
            run_evaluation(state.llm.as_ref(), &mut snap).await;
        }
    }

    state.store.save(&snap).await?;
    Ok(Json(SessionView::from_snapshot(&snap, Utc::now())))
}

/// POST /api/v1/session/evaluate — re-runs a failed evaluation.
pub async fn handle_evaluate(State(state): State<AppState>) -> Result<Json<SessionView>, AppError> {
    let mut snap = state.store.load().await?;
    let finished = snap
        .in_progress
        .as_ref()
        .is_some_and(|s| s.step == WizardStep::Finished);
    if !finished || snap.current_evaluation.status != EvaluationStatus::Failed {
        return Err(AppError::Validation(
            "No failed evaluation to retry.".to_string(),
        ));
    }
    run_evaluation(state.llm.as_ref(), &mut snap).await;
    state.store.save(&snap).await?;
    Ok(Json(SessionView::from_snapshot(&snap, Utc::now())))
}

/// DELETE /api/v1/session — discards the in-progress snapshot. The last
/// evaluation result stays until the next interview overwrites it.
pub async fn handle_reset(State(state): State<AppState>) -> Result<Json<SessionView>, AppError> {
    let mut snap = state.store.load().await?;
    snap.in_progress = None;
    state.store.save(&snap).await?;
    Ok(Json(SessionView::from_snapshot(&snap, Utc::now())))
}

/// Lazy deadline enforcement: an overdue question auto-submits with an
/// empty answer and the flow advances exactly as a manual submission
/// would. Returns whether the snapshot changed.
async fn settle_expired(
    state: &AppState,
    snap: &mut AppSnapshot,
    now: DateTime<Utc>,
) -> Result<bool, AppError> {
    let advance = match snap.in_progress.as_mut() {
        Some(session) => wizard::expire_question(session, "", now)?,
        None => None,
    };
    let Some(advance) = advance else {
        return Ok(false);
    };

    match advance {
        Advance::Next(slot) => {
            let text =
                questions::generate_question(state.llm.as_ref(), slot.difficulty).await?;
            if let Some(session) = snap.in_progress.as_mut() {
                wizard::pose_question(session, text, slot, Utc::now());
            }
        }
        Advance::Finished => {
            run_evaluation(state.llm.as_ref(), snap).await;
        }
    }
    Ok(true)
}

/// Fires the single evaluation call for a finished interview. Success
/// prepends a profile and clears the session; failure is recorded in
/// `current_evaluation` for an explicit retry.
async fn run_evaluation(llm: &dyn Llm, snap: &mut AppSnapshot) {
    let (details, records) = match snap.in_progress.as_ref() {
        Some(s) if !s.interview_records.is_empty() => {
            (s.details.clone(), s.interview_records.clone())
        }
        _ => return,
    };

    snap.current_evaluation = CurrentEvaluation::loading();
    match evaluation::evaluate_transcript(llm, &records).await {
        Ok(outcome) => {
            let profile =
                CandidateProfile::new(details, records, outcome.score, outcome.summary);
            info!(
                "Interview evaluated: profile={} score={:?}",
                profile.id, profile.final_score
            );
            snap.add_profile(profile);
        }
        Err(e) => {
            warn!("Evaluation failed: {e}");
            snap.current_evaluation = CurrentEvaluation::failed(e.to_string());
        }
    }
}

fn is_pdf_upload(content_type: Option<&str>, file_name: Option<&str>) -> bool {
    match content_type {
        Some(ct) => ct == "application/pdf",
        // Some clients omit the part's content type; fall back to the name.
        None => file_name.is_some_and(|n| n.to_lowercase().ends_with(".pdf")),
    }
}
