use serde::Deserialize;
use serde_json::json;

use crate::{error::AppError, utils::config::AppConfig};

/// Preamble the hosted model sometimes insists on despite the prompt's tone
/// constraints. Stripped when the answer opens with it.
const KNOWN_PREAMBLE: &str = "Based on the provided text:";

/// Client for the Gemini `generateContent` endpoint: one prompt in, one
/// generated text out.
#[derive(Clone)]
pub struct GenerationClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GenerationClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
            model: config.gemini_model.clone(),
            api_key: config.gemini_api_key.clone(),
        }
    }

    /// Sends a single-turn prompt and returns the first candidate's cleaned
    /// text. A non-success status is terminal, there is no retry.
    pub async fn generate(&self, prompt: &str) -> Result<String, AppError> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let response = self
            .http
            .post(&url)
            .json(&json!({ "contents": [ { "parts": [ { "text": prompt } ] } ] }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(%status, "Gemini request failed");
            return Err(AppError::Generation("Gemini request failed".to_string()));
        }

        let body: GenerateResponse = response.json().await?;
        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| {
                AppError::Generation("Gemini response contained no candidates".to_string())
            })?;

        Ok(clean_answer(&text))
    }
}

/// Trims the generated text and drops the known preamble when the answer
/// starts with it. Narrow string cleanup, not general post-processing.
pub fn clean_answer(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.to_lowercase().starts_with("based on the provided") {
        trimmed.replacen(KNOWN_PREAMBLE, "", 1).trim().to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_parsing_takes_first_candidate_part() {
        let body = r#"{
            "candidates": [
                { "content": { "parts": [ { "text": "Answer one." }, { "text": "extra" } ] } },
                { "content": { "parts": [ { "text": "Answer two." } ] } }
            ]
        }"#;

        let parsed: GenerateResponse = serde_json::from_str(body).expect("parse");
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text);
        assert_eq!(text.as_deref(), Some("Answer one."));
    }

    #[test]
    fn empty_candidate_list_parses_as_empty() {
        let parsed: GenerateResponse = serde_json::from_str("{}").expect("parse");
        assert!(parsed.candidates.is_empty());
    }

    #[test]
    fn clean_answer_trims_whitespace() {
        assert_eq!(clean_answer("  The answer.  \n"), "The answer.");
    }

    #[test]
    fn clean_answer_strips_known_preamble() {
        assert_eq!(
            clean_answer("Based on the provided text: The answer."),
            "The answer."
        );
    }

    #[test]
    fn clean_answer_leaves_other_openings_alone() {
        assert_eq!(clean_answer("The answer is 42."), "The answer is 42.");
        // Preamble in the middle is not touched
        assert_eq!(
            clean_answer("See below. Based on the provided text: x"),
            "See below. Based on the provided text: x"
        );
    }
}
