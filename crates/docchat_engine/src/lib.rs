//! Docchat engine: HTTP client for the retrieval backend and the request worker.
mod client;
mod engine;
mod payload;
mod types;

pub use client::{Backend, BackendSettings, ReqwestBackend, DEFAULT_BACKEND_URL};
pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use payload::{decode_response, is_indexable, INDEXABLE_EXTENSIONS};
pub use types::{
    EngineEvent, FailureKind, QueryResponse, RequestError, RequestId, UploadResponse,
};
