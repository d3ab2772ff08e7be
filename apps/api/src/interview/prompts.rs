// All LLM prompt constants for the interview flow.
// Templates use `{placeholder}` replacement before sending.

/// Résumé field-extraction prompt. Replace `{resume_text}` before sending.
/// The model must answer with a JSON object carrying name/email/phone.
pub const EXTRACT_DETAILS_PROMPT_TEMPLATE: &str = r#"From the following resume text, extract the full name, email address, and phone number. Return a JSON object with keys "name", "email", and "phone". Use null for any field that is not present. Do NOT include any text outside the JSON object.

Text: "{resume_text}""#;

/// Question-generation prompt. Replace `{difficulty}` before sending.
pub const QUESTION_PROMPT_TEMPLATE: &str = "Generate one {difficulty}-level interview question \
    for a full stack developer role focusing on React and Node.js. \
    Provide only the question text, with no extra words.";

/// Transcript-evaluation prompt. Replace `{transcript}` before sending.
pub const EVALUATION_PROMPT_TEMPLATE: &str = r#"As a senior technical interviewer, evaluate the following transcript for a full stack developer role. Provide a final score out of 100 and a concise 2-sentence summary. Return a JSON object with keys "score" and "summary". Do NOT include any text outside the JSON object.

Transcript:
{transcript}"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_carry_their_placeholders() {
        assert!(EXTRACT_DETAILS_PROMPT_TEMPLATE.contains("{resume_text}"));
        assert!(QUESTION_PROMPT_TEMPLATE.contains("{difficulty}"));
        assert!(EVALUATION_PROMPT_TEMPLATE.contains("{transcript}"));
    }
}
