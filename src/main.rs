use moodform::{analyzer, build_router, config, db, storage, templates, AppState};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moodform=info,tower_http=info".into()),
        )
        .init();

    let config = config::Config::from_env()?;
    let config = Arc::new(config);

    storage::ensure_dirs(&config.upload_folder)?;

    let pool = db::create_pool(&config.database_url).await?;
    db::run_migrations(pool.as_ref()).await?;

    let analyzer = analyzer::DeepFaceClient::new(&config.analyzer_url, config.analyzer_timeout)?;
    tracing::info!("Using emotion analyzer at {}", config.analyzer_url);

    let state = Arc::new(AppState {
        pool,
        config: config.clone(),
        analyzer: Arc::new(analyzer),
        tera: Arc::new(templates::load(&config.template_dir)?),
    });

    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("moodform listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
