mod deepface;

pub use deepface::DeepFaceClient;

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// One analyzed face as reported by the external service.
#[derive(Debug, Clone, Deserialize)]
pub struct FaceEmotion {
    #[serde(default)]
    pub dominant_emotion: Option<String>,
    #[serde(default)]
    pub emotion: BTreeMap<String, f64>,
}

impl FaceEmotion {
    /// The reported dominant label, or the best-scoring one when the
    /// service left it out.
    pub fn top_label(&self) -> Option<&str> {
        if let Some(label) = self.dominant_emotion.as_deref().filter(|l| !l.is_empty()) {
            return Some(label);
        }
        self.emotion
            .iter()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(label, _)| label.as_str())
    }
}

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("could not read image: {0}")]
    Io(#[from] std::io::Error),

    #[error("analyzer request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("analyzer returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("unexpected analyzer response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("no face or emotion found in the analyzer response")]
    NoFace,
}

/// Facial emotion recognition backend.
#[async_trait]
pub trait EmotionAnalyzer: Send + Sync {
    /// Runs the "emotion" action on the image with face-detection
    /// enforcement off. Results are ordered as the backend ranks faces.
    async fn analyze(&self, image: &Path) -> Result<Vec<FaceEmotion>, AnalyzerError>;
}

/// Outcome of analyzing one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Analysis {
    Detected(String),
    Failed(String),
}

impl fmt::Display for Analysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Analysis::Detected(label) => f.write_str(label),
            Analysis::Failed(reason) => write!(f, "Error detecting emotion: {}", reason),
        }
    }
}

pub async fn classify(analyzer: &dyn EmotionAnalyzer, image: &Path) -> Analysis {
    let outcome = analyzer.analyze(image).await.and_then(|faces| {
        faces
            .first()
            .and_then(FaceEmotion::top_label)
            .map(str::to_string)
            .ok_or(AnalyzerError::NoFace)
    });

    match outcome {
        Ok(label) => {
            info!("Detected emotion '{}' for {}", label, image.display());
            Analysis::Detected(label)
        }
        Err(e) => {
            warn!("Emotion analysis failed for {}: {}", image.display(), e);
            Analysis::Failed(e.to_string())
        }
    }
}
