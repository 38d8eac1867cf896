use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use common::{search::SearchHit, storage::types::project::Project};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::{api_state::ApiState, error::ApiError};

/// How many ranked hits feed the prompt.
const SEARCH_RESULT_LIMIT: usize = 5;
/// Per-hit context budget, in characters.
const CONTEXT_CHARS: usize = 2000;
/// Per-hit evidence snippet budget, in characters.
const SNIPPET_CHARS: usize = 300;
const CONTEXT_SEPARATOR: &str = "\n\n---\n\n";
const NO_HITS_ANSWER: &str = "No relevant information found.";

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query: Option<String>,
}

/// Answers a natural-language question over the project's index: keyword
/// search, prompt assembly, one generation call, response shaping.
pub async fn query_index(
    State(state): State<ApiState>,
    Extension(project): Extension<Project>,
    Json(input): Json<QueryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let question = input
        .query
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| ApiError::ValidationError("Missing API key or query".to_string()))?;

    let hits = state
        .search
        .search(&project.index_name, &question, SEARCH_RESULT_LIMIT)
        .await?;

    info!(
        project_id = %project.id,
        index_name = %project.index_name,
        hit_count = hits.len(),
        "Query search completed"
    );

    if hits.is_empty() {
        return Ok((StatusCode::OK, Json(json!({ "answer": NO_HITS_ANSWER }))));
    }

    let (context, evidence_snippets) = build_context(&hits);
    let prompt = build_prompt(&question, &context);

    let answer = state.generation.generate(&prompt).await?;

    let source_list: Vec<&str> = hits.iter().map(|h| h.source.filename.as_str()).collect();

    Ok((
        StatusCode::OK,
        Json(json!({
            "answer": answer,
            "sources": hits.len(),
            "source_list": source_list,
            "evidence_snippets": evidence_snippets
        })),
    ))
}

/// Builds the joined context string and the evidence snippets, keeping the
/// search service's ranking order. Sources are 1-indexed.
fn build_context(hits: &[SearchHit]) -> (String, Vec<String>) {
    let mut sections = Vec::with_capacity(hits.len());
    let mut snippets = Vec::with_capacity(hits.len());

    for (i, hit) in hits.iter().enumerate() {
        let ordinal = i.saturating_add(1);
        let text = &hit.source.content;
        let filename = &hit.source.filename;

        let snippet = truncate_chars(text, SNIPPET_CHARS).trim().replace('\n', " ");
        snippets.push(format!("[Source {ordinal}: {filename}] {snippet}..."));

        sections.push(format!(
            "[Source {ordinal}: {filename}]\n{}",
            truncate_chars(text, CONTEXT_CHARS)
        ));
    }

    (sections.join(CONTEXT_SEPARATOR), snippets)
}

fn build_prompt(question: &str, context: &str) -> String {
    format!(
        r#"You are Codexa — an intelligent document understanding assistant.

Your task:
- Provide a **direct, confident answer first**, based on the given context.
- If the answer isn't stated directly but can be clearly inferred, explain the reasoning briefly.
- Mention relevant evidence only if it strengthens the answer.
- If the document truly lacks information, say: "That detail isn’t covered in the provided document."

Style:
- Write in clear, natural English — no robotic phrasing.
- Avoid meta-comments like "based on the provided text".
- Keep it professional, concise, and easy to read.

Question:
{question}

Context:
{context}"#
    )
}

/// Truncates to at most `max` characters without splitting a code point.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text.get(..idx).unwrap_or(text),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::search::DocumentSource;

    fn hit(content: &str, filename: &str) -> SearchHit {
        SearchHit {
            source: DocumentSource {
                content: content.to_string(),
                filename: filename.to_string(),
            },
        }
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("ééééé", 3), "ééé");
    }

    #[test]
    fn context_sections_are_one_indexed_and_ordered() {
        let hits = vec![
            hit("alpha body", "a.txt"),
            hit("beta body", "b.pdf"),
            hit("gamma body", "c.txt"),
        ];

        let (context, snippets) = build_context(&hits);

        assert_eq!(snippets.len(), 3);
        assert!(snippets[0].starts_with("[Source 1: a.txt]"));
        assert!(snippets[1].starts_with("[Source 2: b.pdf]"));
        assert!(snippets[2].starts_with("[Source 3: c.txt]"));

        let sections: Vec<&str> = context.split(CONTEXT_SEPARATOR).collect();
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0], "[Source 1: a.txt]\nalpha body");
        assert_eq!(sections[2], "[Source 3: c.txt]\ngamma body");
    }

    #[test]
    fn snippets_flatten_newlines_and_truncate() {
        let long_body = "line one\nline two ".repeat(50);
        let hits = vec![hit(&long_body, "doc.txt")];

        let (_, snippets) = build_context(&hits);
        let snippet = &snippets[0];

        assert!(!snippet.contains('\n'));
        assert!(snippet.ends_with("..."));
        // "[Source 1: doc.txt] " prefix + 300 chars + "..." is the ceiling
        assert!(snippet.chars().count() <= "[Source 1: doc.txt] ".len() + SNIPPET_CHARS + 3);
    }

    #[test]
    fn context_blocks_are_capped_at_2000_chars() {
        let long_body = "x".repeat(5000);
        let hits = vec![hit(&long_body, "big.txt")];

        let (context, _) = build_context(&hits);
        let body = context
            .strip_prefix("[Source 1: big.txt]\n")
            .expect("section header");
        assert_eq!(body.chars().count(), CONTEXT_CHARS);
    }

    #[test]
    fn prompt_interpolates_question_and_context() {
        let prompt = build_prompt("What is the refund policy?", "[Source 1: a.txt]\npolicy text");

        assert!(prompt.starts_with("You are Codexa"));
        assert!(prompt.contains("Question:\nWhat is the refund policy?"));
        assert!(prompt.contains("Context:\n[Source 1: a.txt]\npolicy text"));
    }
}
