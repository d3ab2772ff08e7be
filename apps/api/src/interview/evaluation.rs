//! Transcript evaluation — the one scoring call fired when an interview
//! reaches `finished`.

use serde::Deserialize;

use crate::errors::AppError;
use crate::interview::prompts::EVALUATION_PROMPT_TEMPLATE;
use crate::llm_client::{self, Llm};
use crate::models::candidate::{EvaluationOutcome, InterviewRecord};

/// Summary text used when the model omits one.
pub const FALLBACK_SUMMARY: &str = "No summary available.";

/// Raw evaluation reply. The score arrives as a JSON number and may be
/// fractional; it is rounded and clamped to 0–100.
#[derive(Debug, Deserialize)]
struct EvaluationReply {
    score: Option<f64>,
    summary: Option<String>,
}

/// Renders the interview records as the transcript block the evaluation
/// prompt expects.
pub fn build_transcript(records: &[InterviewRecord]) -> String {
    records
        .iter()
        .map(|r| {
            format!(
                "Question ({}): {}\nAnswer: {}",
                r.difficulty.as_str(),
                r.question,
                r.answer
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Scores a finished interview. One call per finished interview; the
/// caller decides what happens on failure.
pub async fn evaluate_transcript(
    llm: &dyn Llm,
    records: &[InterviewRecord],
) -> Result<EvaluationOutcome, AppError> {
    let transcript = build_transcript(records);
    let prompt = EVALUATION_PROMPT_TEMPLATE.replace("{transcript}", &transcript);
    let raw = llm
        .generate(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Failed to evaluate: {e}")))?;
    let reply: EvaluationReply = llm_client::parse_json_reply(&raw)
        .map_err(|e| AppError::Llm(format!("Failed to evaluate: {e}")))?;

    Ok(EvaluationOutcome {
        score: reply.score.map(|s| s.round().clamp(0.0, 100.0) as u32),
        summary: reply
            .summary
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_SUMMARY.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::candidate::Difficulty;

    fn record(question: &str, answer: &str, difficulty: Difficulty) -> InterviewRecord {
        InterviewRecord {
            question: question.to_string(),
            answer: answer.to_string(),
            difficulty,
        }
    }

    #[test]
    fn test_transcript_format_matches_prompt_shape() {
        let records = vec![
            record("What is JSX?", "A syntax extension.", Difficulty::Easy),
            record("Explain the event loop.", "", Difficulty::Medium),
        ];
        let transcript = build_transcript(&records);
        assert_eq!(
            transcript,
            "Question (Easy): What is JSX?\nAnswer: A syntax extension.\n\n\
             Question (Medium): Explain the event loop.\nAnswer: "
        );
    }

    #[test]
    fn test_transcript_empty_records() {
        assert_eq!(build_transcript(&[]), "");
    }

    #[test]
    fn test_reply_with_fractional_score_rounds() {
        let reply: EvaluationReply =
            serde_json::from_str(r#"{"score": 87.6, "summary": "Solid."}"#).unwrap();
        let score = reply.score.map(|s| s.round().clamp(0.0, 100.0) as u32);
        assert_eq!(score, Some(88));
    }

    #[test]
    fn test_reply_without_score_or_summary_deserializes() {
        let reply: EvaluationReply = serde_json::from_str("{}").unwrap();
        assert!(reply.score.is_none());
        assert!(reply.summary.is_none());
    }
}
