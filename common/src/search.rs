use serde::Deserialize;
use serde_json::json;

use crate::{error::AppError, utils::config::AppConfig};

/// Thin client for the Elasticsearch REST API: index creation, document
/// indexing and keyword search. Ranking and storage stay on the service side.
#[derive(Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// One keyword-search result in the service's ranking order.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SearchHit {
    #[serde(rename = "_source")]
    pub source: DocumentSource,
}

/// The indexed document shape: extracted text plus the original filename.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DocumentSource {
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_filename")]
    pub filename: String,
}

fn default_filename() -> String {
    "document.txt".to_string()
}

#[derive(Deserialize)]
struct SearchResponse {
    hits: HitsEnvelope,
}

#[derive(Deserialize)]
struct HitsEnvelope {
    #[serde(default)]
    hits: Vec<SearchHit>,
}

impl SearchClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.elastic_url.trim_end_matches('/').to_string(),
            api_key: config.elastic_api_key.clone(),
        }
    }

    fn auth_header(&self) -> String {
        format!("ApiKey {}", self.api_key)
    }

    /// Creates the named index. An index that already exists counts as
    /// success, so provisioning can be re-invoked safely.
    pub async fn ensure_index(&self, index_name: &str) -> Result<(), AppError> {
        let url = format!("{}/{index_name}", self.base_url);
        let response = self
            .http
            .put(&url)
            .header("Authorization", self.auth_header())
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        if status == reqwest::StatusCode::BAD_REQUEST
            && body.contains("resource_already_exists_exception")
        {
            tracing::debug!(index_name, "Index already exists, treating as created");
            return Ok(());
        }

        Err(AppError::SearchService(format!(
            "index creation failed ({status}): {body}"
        )))
    }

    /// Indexes one `{content, filename}` record into the project's index.
    pub async fn index_document(
        &self,
        index_name: &str,
        content: &str,
        filename: &str,
    ) -> Result<(), AppError> {
        let url = format!("{}/{index_name}/_doc", self.base_url);
        let response = self
            .http
            .post(&url)
            .header("Authorization", self.auth_header())
            .json(&json!({ "content": content, "filename": filename }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::SearchService(format!(
                "document indexing failed ({status}): {body}"
            )));
        }

        Ok(())
    }

    /// Keyword match on the `content` field, at most `size` hits, ranked by
    /// the service's default relevance scoring.
    pub async fn search(
        &self,
        index_name: &str,
        query: &str,
        size: usize,
    ) -> Result<Vec<SearchHit>, AppError> {
        let url = format!("{}/{index_name}/_search", self.base_url);
        let response = self
            .http
            .post(&url)
            .header("Authorization", self.auth_header())
            .json(&json!({
                "size": size,
                "query": { "match": { "content": query } }
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::SearchService(format!(
                "search failed ({status}): {body}"
            )));
        }

        let body: SearchResponse = response.json().await?;
        Ok(body.hits.hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_response_preserves_ranking_order() {
        let body = r#"{
            "took": 3,
            "hits": {
                "total": { "value": 3 },
                "hits": [
                    { "_score": 2.4, "_source": { "content": "first", "filename": "a.txt" } },
                    { "_score": 1.9, "_source": { "content": "second", "filename": "b.pdf" } },
                    { "_score": 0.2, "_source": { "content": "third", "filename": "c.txt" } }
                ]
            }
        }"#;

        let parsed: SearchResponse = serde_json::from_str(body).expect("parse");
        let filenames: Vec<_> = parsed
            .hits
            .hits
            .iter()
            .map(|h| h.source.filename.as_str())
            .collect();
        assert_eq!(filenames, ["a.txt", "b.pdf", "c.txt"]);
    }

    #[test]
    fn missing_source_fields_fall_back_to_defaults() {
        let body = r#"{ "hits": { "hits": [ { "_source": {} } ] } }"#;

        let parsed: SearchResponse = serde_json::from_str(body).expect("parse");
        let hit = parsed.hits.hits.first().expect("one hit");
        assert_eq!(hit.source.content, "");
        assert_eq!(hit.source.filename, "document.txt");
    }

    #[test]
    fn empty_hit_list_parses() {
        let body = r#"{ "hits": { "hits": [] } }"#;

        let parsed: SearchResponse = serde_json::from_str(body).expect("parse");
        assert!(parsed.hits.hits.is_empty());
    }
}
