use std::sync::Arc;

use common::{
    generation::GenerationClient, search::SearchClient, storage::db::SurrealDbClient,
    utils::config::AppConfig,
};

#[derive(Clone)]
pub struct ApiState {
    pub db: Arc<SurrealDbClient>,
    pub config: AppConfig,
    pub search: SearchClient,
    pub generation: GenerationClient,
}

impl ApiState {
    pub fn new(db: Arc<SurrealDbClient>, config: &AppConfig) -> Self {
        Self {
            db,
            search: SearchClient::new(config),
            generation: GenerationClient::new(config),
            config: config.clone(),
        }
    }
}
