use crate::{
    error::AppError,
    storage::db::SurrealDbClient,
    stored_object,
    utils::filename::{random_hex, slugify},
};
use uuid::Uuid;

/// Prefix shared by every remote index this gateway provisions.
const INDEX_NAME_PREFIX: &str = "codexa";

stored_object!(Project, "project", {
    name: String,
    index_name: String,
    api_key: String,
    category: String
});

/// The admin listing shape: name and credential, nothing else.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectSummary {
    pub name: String,
    pub api_key: String,
}

impl Project {
    /// Builds a new project record with a freshly derived index name and API
    /// key. The random suffix keeps same-named projects on distinct indexes.
    pub fn new(name: &str, category: &str) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            name: name.to_string(),
            index_name: format!("{INDEX_NAME_PREFIX}-{}-{}", slugify(name), random_hex(8)),
            api_key: random_hex(32),
            category: category.to_string(),
        }
    }

    pub async fn find_by_api_key(
        api_key: &str,
        db: &SurrealDbClient,
    ) -> Result<Option<Self>, AppError> {
        let project: Option<Project> = db
            .client
            .query("SELECT * FROM project WHERE api_key = $api_key LIMIT 1")
            .bind(("api_key", api_key.to_string()))
            .await?
            .take(0)?;

        Ok(project)
    }

    pub async fn list_summaries(db: &SurrealDbClient) -> Result<Vec<ProjectSummary>, AppError> {
        let summaries: Vec<ProjectSummary> = db
            .client
            .query("SELECT name, api_key FROM project")
            .await?
            .take(0)?;

        Ok(summaries)
    }
}
