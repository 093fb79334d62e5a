use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

use super::{AnalyzerError, EmotionAnalyzer, FaceEmotion};

#[derive(Debug, Serialize)]
struct AnalyzeRequest {
    img: String,
    actions: Vec<&'static str>,
    enforce_detection: bool,
}

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    results: Vec<FaceEmotion>,
}

#[derive(Debug, Deserialize)]
struct AnalyzeFailure {
    error: Option<String>,
}

/// Client for a DeepFace-compatible REST service (`POST /analyze`).
pub struct DeepFaceClient {
    client: Client,
    analyze_url: String,
}

impl DeepFaceClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            analyze_url: format!("{}/analyze", base_url.trim_end_matches('/')),
        })
    }

    async fn encode_image(image: &Path) -> Result<String, AnalyzerError> {
        let bytes = tokio::fs::read(image).await?;
        let mime = mime_guess::from_path(image).first_or_octet_stream();
        Ok(format!("data:{};base64,{}", mime.essence_str(), STANDARD.encode(bytes)))
    }
}

#[async_trait]
impl EmotionAnalyzer for DeepFaceClient {
    async fn analyze(&self, image: &Path) -> Result<Vec<FaceEmotion>, AnalyzerError> {
        let body = AnalyzeRequest {
            img: Self::encode_image(image).await?,
            actions: vec!["emotion"],
            enforce_detection: false,
        };

        debug!("Posting {} to {}", image.display(), self.analyze_url);
        let response = self.client.post(&self.analyze_url).json(&body).send().await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<AnalyzeFailure>(&text)
                .ok()
                .and_then(|f| f.error)
                .unwrap_or(text);
            warn!("Analyzer rejected {}: {} {}", image.display(), status, message);
            return Err(AnalyzerError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: AnalyzeResponse = serde_json::from_str(&text)?;
        Ok(parsed.results)
    }
}
