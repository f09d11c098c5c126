//! Upload handler - classify a CSV of flow records

use axum::{
    body::Bytes,
    extract::{Multipart, State},
    Json,
};

use crate::models::ClassificationResponse;
use crate::{AppError, AppResult, AppState};

/// Multipart form: `file` (CSV) and `username` (alert recipient)
pub async fn classify(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<ClassificationResponse>> {
    let mut file: Option<Bytes> = None;
    let mut username: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => file = Some(field.bytes().await?),
            Some("username") => username = Some(field.text().await?.trim().to_string()),
            _ => {}
        }
    }

    let file = file.ok_or_else(|| AppError::ValidationError("Missing 'file' field".to_string()))?;
    let username = username
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::ValidationError("Missing 'username' field".to_string()))?;

    tracing::info!("Classifying upload from {} ({} bytes)", username, file.len());

    // Inference is CPU-bound; keep it off the async workers
    let detector = state.detector.clone();
    let analysis = tokio::task::spawn_blocking(move || detector.analyze(&file, &username))
        .await
        .map_err(|e| AppError::InternalError(format!("classification task failed: {}", e)))??;

    Ok(Json(ClassificationResponse::from(&analysis.verdict)))
}
