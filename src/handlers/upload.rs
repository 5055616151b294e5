//! Image upload: one multipart `file` field stored under the name sent in `img`.

use axum::{
    body::Bytes,
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::handlers::http::AppState;

pub const UPLOAD_CONFIRMATION: &str = "Image has been uploaded successfully!";

const FILE_FIELD: &str = "file";
const NAME_FIELD: &str = "img";

/// POST /api/upload
///
/// Fields may arrive in any order; the file is buffered until the target name
/// is known. The upload directory is expected to exist already.
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<&'static str>)> {
    let mut file: Option<Bytes> = None;
    let mut target: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(FILE_FIELD) => {
                if file.is_some() {
                    return Err(AppError::Validation(
                        "only one `file` field is accepted".to_string(),
                    ));
                }
                file = Some(field.bytes().await?);
            }
            Some(NAME_FIELD) => target = Some(field.text().await?),
            other if field.file_name().is_some() => {
                return Err(AppError::Validation(format!(
                    "unexpected file field {:?}",
                    other.unwrap_or_default()
                )));
            }
            other => debug!(field = ?other, "ignoring multipart field"),
        }
    }

    let bytes = file.ok_or_else(|| AppError::Validation("missing `file` field".to_string()))?;
    let target = target.ok_or_else(|| AppError::Validation("missing `img` field".to_string()))?;
    let file_name = checked_file_name(&target)?;

    let path = state.upload_dir().join(file_name);
    tokio::fs::write(&path, &bytes).await?;
    info!(path = %path.display(), bytes = bytes.len(), "image uploaded");

    Ok((StatusCode::OK, Json(UPLOAD_CONFIRMATION)))
}

/// Accept the client-supplied name only if it is a single plain path
/// component. Overwriting an existing file with the same name is allowed.
pub fn checked_file_name(raw: &str) -> AppResult<&str> {
    let invalid = raw.trim().is_empty()
        || raw == "."
        || raw == ".."
        || raw.contains(['/', '\\', '\0']);
    if invalid {
        return Err(AppError::Validation(format!("invalid image name {:?}", raw)));
    }
    Ok(raw)
}
