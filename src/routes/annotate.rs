use crate::{annotations::StoreError, server::SharedState};
use axum::{
    extract::{
        multipart::{Multipart, MultipartError},
        State,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Cursor;
use std::time::Instant;
use tracing::instrument;

const ROUTE: &str = "/api/image/annotate";

#[derive(Serialize, Deserialize)]
pub struct AnnotateResponse {
    /// Base64-encoded JPEG of the annotated upload.
    pub image: String,
    /// Distinct labels matched for this upload, in no particular order.
    pub report: Vec<String>,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(thiserror::Error, Debug)]
pub enum AnnotateError {
    #[error("No image uploaded.")]
    MissingImage,
    #[error("Failed to read multipart body: {0}")]
    Multipart(#[from] MultipartError),
    #[error("Uploaded file is not a decodable image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Reference data error: {0}")]
    Store(#[from] StoreError),
    #[error("Failed to encode annotated image: {0}")]
    Encode(image::ImageError),
}

impl IntoResponse for AnnotateError {
    fn into_response(self) -> Response {
        let status = match self {
            AnnotateError::MissingImage | AnnotateError::Multipart(_) => StatusCode::BAD_REQUEST,
            AnnotateError::Decode(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AnnotateError::Store(_) | AnnotateError::Encode(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

#[instrument(skip(state, multipart))]
pub async fn annotate_image(
    State(state): State<SharedState>,
    multipart: Multipart,
) -> Result<Json<AnnotateResponse>, AnnotateError> {
    let start = Instant::now();
    state.metrics.record_request(ROUTE);

    let (file_name, data) = extract_image_field(multipart)
        .await?
        .ok_or(AnnotateError::MissingImage)?;

    let mut image = image::load_from_memory(&data)?.to_rgb8();

    let key = strip_extension(&file_name);
    let annotations = state.store.lookup(key)?;
    tracing::debug!(key, matches = annotations.len(), "annotation lookup");

    state.renderer.render(&mut image, &annotations);

    let report: Vec<String> = annotations
        .iter()
        .map(|a| a.label.clone())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();

    let mut jpeg = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut jpeg), image::ImageFormat::Jpeg)
        .map_err(AnnotateError::Encode)?;

    state.metrics.record_annotations_drawn(annotations.len() as u64, ROUTE);
    state.metrics.record_annotate_duration(start.elapsed().as_millis() as u64, ROUTE);

    Ok(Json(AnnotateResponse {
        image: BASE64.encode(&jpeg),
        report,
    }))
}

/// Walks the multipart fields looking for one named `image`; returns its
/// filename and raw bytes. Fields with other names are skipped.
async fn extract_image_field(
    mut multipart: Multipart,
) -> Result<Option<(String, Bytes)>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("image") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await?;
        return Ok(Some((file_name, data)));
    }
    Ok(None)
}

/// Drops the last `.`-delimited suffix of a filename, the same way
/// `os.path.splitext` does: only one suffix goes, and a name that is
/// nothing but a leading dot keeps it.
fn strip_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(idx) if idx > 0 => &file_name[..idx],
        _ => file_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_extension_removes_only_the_last_suffix() {
        assert_eq!(strip_extension("IMG001.jpg"), "IMG001");
        assert_eq!(strip_extension("sample.leaf.jpg"), "sample.leaf");
    }

    #[test]
    fn strip_extension_leaves_names_without_suffix_alone() {
        assert_eq!(strip_extension("IMG001"), "IMG001");
        assert_eq!(strip_extension(""), "");
        assert_eq!(strip_extension(".bashrc"), ".bashrc");
    }
}
