//! The fixed interview question plan and the question-generation call.

use crate::errors::AppError;
use crate::interview::prompts::QUESTION_PROMPT_TEMPLATE;
use crate::llm_client::Llm;
use crate::models::candidate::Difficulty;

/// One slot in the interview plan: the difficulty asked and the seconds
/// the candidate gets to answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionSlot {
    pub difficulty: Difficulty,
    pub duration_secs: u32,
}

/// The shipped interview plan: two questions, Easy then Medium.
/// An interview reaches `finished` after exactly this many answers.
pub const QUESTION_PLAN: &[QuestionSlot] = &[
    QuestionSlot {
        difficulty: Difficulty::Easy,
        duration_secs: 30,
    },
    QuestionSlot {
        difficulty: Difficulty::Medium,
        duration_secs: 60,
    },
];

/// Generates one interview question at the given difficulty.
pub async fn generate_question(
    llm: &dyn Llm,
    difficulty: Difficulty,
) -> Result<String, AppError> {
    let prompt = QUESTION_PROMPT_TEMPLATE.replace("{difficulty}", difficulty.as_str());
    let question = llm
        .generate(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Failed to generate question: {e}")))?;
    if question.is_empty() {
        return Err(AppError::Llm(
            "Could not generate a question.".to_string(),
        ));
    }
    Ok(question)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_has_two_questions_easy_then_medium() {
        assert_eq!(QUESTION_PLAN.len(), 2);
        assert_eq!(QUESTION_PLAN[0].difficulty, Difficulty::Easy);
        assert_eq!(QUESTION_PLAN[0].duration_secs, 30);
        assert_eq!(QUESTION_PLAN[1].difficulty, Difficulty::Medium);
        assert_eq!(QUESTION_PLAN[1].duration_secs, 60);
    }
}
