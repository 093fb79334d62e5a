use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::analyzer::Analysis;

#[derive(Debug, Clone, FromRow)]
pub struct Submission {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub image_path: String,
    pub emotion: Option<String>,
    pub analysis_error: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Submission {
    /// The stored outcome. A row always carries exactly one of the two
    /// columns; a failure reason wins if both were ever present.
    pub fn analysis(&self) -> Analysis {
        match (&self.analysis_error, &self.emotion) {
            (Some(reason), _) => Analysis::Failed(reason.clone()),
            (None, Some(label)) => Analysis::Detected(label.clone()),
            (None, None) => Analysis::Failed("no analysis recorded".to_string()),
        }
    }
}

#[derive(Debug)]
pub struct NewSubmission<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub image_path: &'a str,
    pub analysis: &'a Analysis,
}
