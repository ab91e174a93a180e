use std::path::{Path, PathBuf};

use docchat_logging::chat_warn;
use reqwest::multipart::{Form, Part};
use reqwest::Body;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::fs::File;
use tokio_util::io::ReaderStream;

use crate::{FailureKind, RequestError};

/// Multipart field repeated once per uploaded file.
pub(crate) const UPLOAD_FIELD: &str = "files";
/// Multipart field carrying the question text.
pub(crate) const QUERY_FIELD: &str = "query";

/// Extensions the backend extracts text from. Anything else is accepted by
/// the endpoint but contributes no chunks.
pub const INDEXABLE_EXTENSIONS: &[&str] = &["pdf", "docx", "pptx", "txt"];

pub fn is_indexable(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            INDEXABLE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// Opens every file and packs it as one `files` part.
///
/// File contents are streamed while the request is sent. Files that cannot be
/// opened fail the whole upload before anything goes on the wire.
pub(crate) async fn upload_form(files: &[PathBuf]) -> Result<Form, RequestError> {
    let mut form = Form::new();
    for path in files {
        let unreadable = |err: std::io::Error| {
            RequestError::new(
                FailureKind::UnreadableFile,
                format!("{}: {err}", path.display()),
            )
        };
        let file = File::open(path).await.map_err(unreadable)?;
        let metadata = file.metadata().await.map_err(unreadable)?;
        if !metadata.is_file() {
            return Err(RequestError::new(
                FailureKind::UnreadableFile,
                format!("{}: not a regular file", path.display()),
            ));
        }
        if !is_indexable(path) {
            chat_warn!(
                "{} has an extension the backend does not index; sending anyway",
                path.display()
            );
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        let body = Body::wrap_stream(ReaderStream::new(file));
        let part = Part::stream_with_length(body, metadata.len())
            .file_name(file_name)
            .mime_str(mime.essence_str())
            .map_err(|err| RequestError::new(FailureKind::UnreadableFile, err.to_string()))?;
        form = form.part(UPLOAD_FIELD, part);
    }
    Ok(form)
}

pub(crate) fn query_form(question: &str) -> Form {
    Form::new().text(QUERY_FIELD, question.to_string())
}

/// Decodes a JSON response body that must carry `expected_field`.
///
/// A body with an `error` string in place of the expected field is reported
/// as [`FailureKind::Backend`] with the backend's message.
pub fn decode_response<T: DeserializeOwned>(
    body: &[u8],
    expected_field: &str,
) -> Result<T, RequestError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|err| RequestError::new(FailureKind::MalformedResponse, err.to_string()))?;

    if value.get(expected_field).is_none() {
        if let Some(message) = value.get("error").and_then(Value::as_str) {
            return Err(RequestError::new(FailureKind::Backend, message));
        }
        return Err(RequestError::new(
            FailureKind::MalformedResponse,
            format!("missing field `{expected_field}`"),
        ));
    }

    serde_json::from_value(value)
        .map_err(|err| RequestError::new(FailureKind::MalformedResponse, err.to_string()))
}
