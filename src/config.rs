use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub upload_folder: PathBuf,
    pub static_dir: PathBuf,
    pub template_dir: PathBuf,
    pub analyzer_url: String,
    pub analyzer_timeout: Duration,
    pub max_upload_bytes: usize,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        dotenvy::dotenv().ok();

        let base_dir = std::env::current_dir()?;
        Ok(Self::from_lookup(base_dir, |key| std::env::var(key).ok()))
    }

    /// Builds the config from any key lookup, resolving relative folders
    /// against `base_dir`.
    pub fn from_lookup<F>(base_dir: PathBuf, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database_url = var("DATABASE_URL", "sqlite://database.db?mode=rwc");

        let upload_folder = base_dir.join(var("UPLOAD_FOLDER", "static/uploads"));
        let static_dir = base_dir.join(var("STATIC_DIR", "static"));
        let template_dir = base_dir.join(var("TEMPLATE_DIR", "templates"));

        let analyzer_url = var("ANALYZER_URL", "http://127.0.0.1:5005")
            .trim_end_matches('/')
            .to_string();
        let analyzer_timeout = Duration::from_secs(
            var("ANALYZER_TIMEOUT_SECS", "60").parse().unwrap_or(60),
        );

        let max_upload_mb: usize = var("MAX_UPLOAD_MB", "16").parse().unwrap_or(16);

        let host = var("HOST", "0.0.0.0");
        let port: u16 = var("PORT", "5000").parse().unwrap_or(5000);

        Self {
            database_url,
            upload_folder,
            static_dir,
            template_dir,
            analyzer_url,
            analyzer_timeout,
            max_upload_bytes: max_upload_mb.saturating_mul(1024 * 1024),
            host,
            port,
        }
    }
}
