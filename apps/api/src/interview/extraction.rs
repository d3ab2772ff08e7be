//! Résumé text extraction and AI field extraction.
//!
//! The uploaded PDF is converted to text server-side (pdf-extract), then
//! the text is handed to the LLM to pull out name/email/phone.

use crate::errors::AppError;
use crate::interview::prompts::EXTRACT_DETAILS_PROMPT_TEMPLATE;
use crate::llm_client::{self, Llm};
use crate::models::candidate::CandidateDetails;

/// Résumé text beyond this many characters is not sent to the model.
/// Contact details sit at the top of a résumé; the tail adds only cost.
pub const MAX_RESUME_PROMPT_CHARS: usize = 4000;

/// Extracts the full text of a PDF from its raw bytes.
pub fn extract_pdf_text(data: &[u8]) -> Result<String, AppError> {
    let text = pdf_extract::extract_text_from_mem(data)
        .map_err(|e| AppError::UnprocessableEntity(format!("Error parsing your PDF file: {e}")))?;
    if text.trim().is_empty() {
        return Err(AppError::UnprocessableEntity(
            "The PDF contains no extractable text.".to_string(),
        ));
    }
    Ok(text)
}

/// Asks the LLM to pull name/email/phone out of the résumé text.
/// Blank strings in the reply are normalized to `None`.
pub async fn extract_details(
    llm: &dyn Llm,
    resume_text: &str,
) -> Result<CandidateDetails, AppError> {
    let excerpt = truncate_chars(resume_text, MAX_RESUME_PROMPT_CHARS);
    let prompt = EXTRACT_DETAILS_PROMPT_TEMPLATE.replace("{resume_text}", excerpt);
    let reply = llm
        .generate(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Failed to extract details: {e}")))?;
    let details: CandidateDetails = llm_client::parse_json_reply(&reply)
        .map_err(|e| AppError::Llm(format!("Failed to extract details: {e}")))?;
    Ok(details.normalized())
}

/// Truncates on a char boundary; byte slicing could split a code point.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_shorter_text_untouched() {
        assert_eq!(truncate_chars("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_cuts_at_char_count() {
        assert_eq!(truncate_chars("hello world", 5), "hello");
    }

    #[test]
    fn test_truncate_respects_multibyte_boundaries() {
        let text = "héllo wörld";
        let cut = truncate_chars(text, 6);
        assert_eq!(cut, "héllo ");
    }

    #[test]
    fn test_extract_pdf_text_rejects_garbage_bytes() {
        let err = extract_pdf_text(b"this is not a pdf").unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }
}
