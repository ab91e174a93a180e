use std::fmt;

use crate::{ControllerError, FileBatch, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// POST the batch to the indexing endpoint.
    Upload {
        request_id: RequestId,
        files: FileBatch,
    },
    /// POST the question to the query endpoint.
    Query {
        request_id: RequestId,
        question: String,
    },
    /// Confirmation for the user.
    Notify(Notice),
    /// Failure the front end must surface; validation failures block.
    Fail(ControllerError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    DocumentsIndexed { count: u64 },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::DocumentsIndexed { count } => {
                write!(f, "Uploaded {count} chunks successfully!")
            }
        }
    }
}
