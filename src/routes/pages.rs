use axum::{
    extract::{Multipart, State},
    response::{Html, IntoResponse},
};
use std::sync::Arc;
use tera::Context;

use crate::analyzer::{classify, Analysis};
use crate::db::{insert_submission, NewSubmission};
use crate::error::AppError;
use crate::state::AppState;
use crate::storage::{save_upload, storage_key};

pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let mut ctx = Context::new();
    ctx.insert("title", "Emotion Detector");
    Ok(Html(state.tera.render("index.html", &ctx)?))
}

struct UploadedImage {
    filename: String,
    content_type: Option<String>,
    data: Vec<u8>,
}

#[derive(Default)]
struct PredictForm {
    name: Option<String>,
    email: Option<String>,
    image: Option<UploadedImage>,
}

impl PredictForm {
    async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = PredictForm::default();

        while let Some(field) = multipart.next_field().await? {
            let field_name = field.name().unwrap_or("").to_string();
            match field_name.as_str() {
                "name" => form.name = Some(field.text().await?),
                "email" => form.email = Some(field.text().await?),
                "image" => {
                    let filename = field.file_name().unwrap_or("").to_string();
                    let content_type = field.content_type().map(str::to_string);
                    let data = field.bytes().await?.to_vec();
                    form.image = Some(UploadedImage {
                        filename,
                        content_type,
                        data,
                    });
                }
                _ => {}
            }
        }

        Ok(form)
    }

    /// All three fields present and non-empty; an image part without a
    /// client filename counts as missing.
    fn complete(self) -> Option<(String, String, UploadedImage)> {
        let name = self.name.filter(|v| !v.is_empty())?;
        let email = self.email.filter(|v| !v.is_empty())?;
        let image = self.image.filter(|img| !img.filename.is_empty())?;
        Some((name, email, image))
    }
}

fn greeting(name: &str, analysis: &Analysis) -> String {
    format!("Hi {}, your detected emotion is: {}", name, analysis)
}

pub async fn predict(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let (name, email, image) = PredictForm::read(multipart)
        .await?
        .complete()
        .ok_or(AppError::MissingFields)?;

    let key = storage_key(&image.filename, image.content_type.as_deref());
    let image_path = save_upload(&state.config.upload_folder, &key, &image.data).await?;
    tracing::info!("Saved upload {} ({} bytes)", image_path.display(), image.data.len());

    let analysis = classify(state.analyzer.as_ref(), &image_path).await;

    let stored_path = image_path.to_string_lossy();
    let inserted = insert_submission(
        state.pool.as_ref(),
        &NewSubmission {
            name: &name,
            email: &email,
            image_path: &stored_path,
            analysis: &analysis,
        },
    )
    .await;
    let id = match inserted {
        Ok(id) => id,
        Err(e) => {
            // No row means no record of the file either.
            if let Err(rm) = tokio::fs::remove_file(&image_path).await {
                tracing::warn!("Could not remove orphaned upload {}: {}", image_path.display(), rm);
            }
            return Err(e.into());
        }
    };
    tracing::info!("Recorded submission {}", id);

    Ok(greeting(&name, &analysis))
}
