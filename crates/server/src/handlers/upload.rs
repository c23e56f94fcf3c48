//! Font upload and subsetting handler.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::body::Body;
use axum::extract::{Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use bytes::Bytes;
use glyphpress_subset::GeneratedSubset;
use tracing::instrument;

/// Multipart field carrying font files.
const FONT_FIELD: &str = "font";
/// Multipart field carrying subset identifiers, repeated per subset.
const SUBSETS_FIELD: &str = "subsets";

/// POST /file - validate uploaded fonts and generate the requested subsets.
///
/// Responds with the last generated (or cached) artifact as an attachment;
/// any failure aborts the whole request with one classified status.
#[instrument(skip_all)]
pub async fn upload_font(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Response> {
    let max_files = state.config.limits.max_files;
    let mut fonts: Vec<Bytes> = Vec::new();
    let mut subset_ids: Vec<String> = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some(FONT_FIELD) => {
                // Counted before buffering so an over-limit request cannot
                // make us read one file too many.
                if fonts.len() == max_files {
                    return Err(ApiError::RequestTooLarge(format!(
                        "at most {max_files} font files per request"
                    )));
                }
                fonts.push(field.bytes().await?);
            }
            Some(SUBSETS_FIELD) => {
                subset_ids.push(field.text().await?);
            }
            _ => {}
        }
    }

    if fonts.is_empty() {
        return Err(ApiError::BadRequest("no font file provided".to_string()));
    }

    let mut last: Option<GeneratedSubset> = None;
    for payload in fonts {
        let generated = state.pipeline.process(payload, &subset_ids).await?;
        last = generated.into_iter().next_back();
    }

    let subset = last.ok_or_else(|| ApiError::BadRequest("no subsets requested".to_string()))?;
    attachment(&subset).await
}

/// Stream one artifact back as a `font/woff2` attachment.
async fn attachment(subset: &GeneratedSubset) -> ApiResult<Response> {
    let data = tokio::fs::read(&subset.path).await.map_err(|err| {
        tracing::error!(
            path = %subset.path.display(),
            error = %err,
            "failed to read generated artifact"
        );
        ApiError::Internal("failed to read generated artifact".to_string())
    })?;

    let file_name = subset
        .path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("subset.woff2");

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "font/woff2")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{file_name}\""),
        )
        .body(Body::from(data))
        .map_err(|err| ApiError::Internal(format!("failed to build response: {err}")))
}
