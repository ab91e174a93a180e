//! Upload controller: file selection and batch submission.

use docchat_logging::{chat_debug, chat_info, chat_warn};

use crate::{
    AppState, Effect, FileBatch, FileHandle, Notice, RequestFailure, RequestId, RequestKind,
    UploadError, UploadReceipt, ValidationError,
};

pub(crate) fn select_files(state: &mut AppState, handles: Vec<FileHandle>) -> Vec<Effect> {
    chat_debug!("Selection replaced with {} file(s)", handles.len());
    state.set_selection(FileBatch::new(handles));
    Vec::new()
}

pub(crate) fn submit(state: &mut AppState) -> Vec<Effect> {
    if state.is_busy() {
        chat_debug!("Upload ignored: a request is already in flight");
        return Vec::new();
    }
    if state.selection().is_empty() {
        return vec![Effect::Fail(ValidationError::EmptySelection.into())];
    }

    let Some(request_id) = state.busy_mut().try_acquire(RequestKind::Upload) else {
        return Vec::new();
    };
    state.mark_dirty();
    let files = state.selection().clone();
    chat_info!(
        "Upload request {} accepted with {} file(s)",
        request_id,
        files.len()
    );
    vec![Effect::Upload { request_id, files }]
}

pub(crate) fn settle(
    state: &mut AppState,
    request_id: RequestId,
    result: Result<UploadReceipt, RequestFailure>,
) -> Vec<Effect> {
    if !state.busy_mut().release(request_id, RequestKind::Upload) {
        chat_warn!("Ignoring settlement of unknown upload request {}", request_id);
        return Vec::new();
    }
    state.mark_dirty();

    match result {
        Ok(receipt) => {
            chat_info!(
                "Upload request {} indexed {} chunk(s)",
                request_id,
                receipt.documents_added
            );
            vec![Effect::Notify(Notice::DocumentsIndexed {
                count: receipt.documents_added,
            })]
        }
        Err(failure) => {
            chat_warn!("Upload request {} failed: {}", request_id, failure);
            vec![Effect::Fail(UploadError { failure }.into())]
        }
    }
}
