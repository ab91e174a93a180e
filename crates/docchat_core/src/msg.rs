use crate::{FileHandle, RequestFailure, RequestId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadReceipt {
    /// Number of chunks the backend indexed from the batch.
    pub documents_added: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked a new set of files; replaces the previous selection.
    FilesSelected(Vec<FileHandle>),
    /// User asked to upload the current selection.
    UploadClicked,
    /// Backend settled an upload.
    UploadSettled {
        request_id: RequestId,
        result: Result<UploadReceipt, RequestFailure>,
    },
    /// User edited the question input.
    DraftChanged(String),
    /// User asked the current draft.
    AskClicked,
    /// Backend settled a query.
    QuerySettled {
        request_id: RequestId,
        result: Result<String, RequestFailure>,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
