use crate::analyzer::EmotionAnalyzer;
use crate::config::Config;
use crate::db::DbPool;
use std::sync::Arc;
use tera::Tera;

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<Config>,
    pub analyzer: Arc<dyn EmotionAnalyzer>,
    pub tera: Arc<Tera>,
}
