use std::io;
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use docchat_logging::{chat_debug, chat_error, chat_info, chat_warn};

use crate::client::Backend;
use crate::{EngineEvent, FailureKind, RequestError, RequestId};

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

enum EngineCommand {
    Upload {
        request_id: RequestId,
        files: Vec<PathBuf>,
    },
    Query {
        request_id: RequestId,
        question: String,
    },
}

impl EngineCommand {
    fn request_id(&self) -> RequestId {
        match self {
            EngineCommand::Upload { request_id, .. } | EngineCommand::Query { request_id, .. } => {
                *request_id
            }
        }
    }

    /// Completion event reporting `error` for this command.
    fn failed(&self, error: RequestError) -> EngineEvent {
        match self {
            EngineCommand::Upload { request_id, .. } => EngineEvent::UploadCompleted {
                request_id: *request_id,
                result: Err(error),
            },
            EngineCommand::Query { request_id, .. } => EngineEvent::QueryCompleted {
                request_id: *request_id,
                result: Err(error),
            },
        }
    }
}

/// Handle to the request worker.
///
/// The worker runs a single-threaded runtime and executes one request at a
/// time, in submission order. Every accepted command produces exactly one
/// completion event on the sink, success or failure. A request whose task
/// panics completes with [`FailureKind::Unavailable`] and the worker moves on
/// to the next command. There is no way to cancel a request once submitted.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    sink: Arc<dyn EventSink>,
}

impl EngineHandle {
    pub fn new(backend: Arc<dyn Backend>, sink: Arc<dyn EventSink>) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();
        let worker_sink = sink.clone();

        thread::Builder::new()
            .name("docchat-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let request_id = command.request_id();
                    let fallback = command.failed(RequestError::new(
                        FailureKind::Unavailable,
                        "request worker failed while handling the request",
                    ));
                    let task = runtime.spawn(handle_command(
                        backend.clone(),
                        command,
                        worker_sink.clone(),
                    ));
                    if let Err(err) = runtime.block_on(task) {
                        chat_error!("Request {} aborted: {}", request_id, err);
                        worker_sink.emit(fallback);
                    }
                }
                chat_debug!("Engine command channel closed; worker exiting");
            })?;

        Ok(Self { cmd_tx, sink })
    }

    pub fn upload(&self, request_id: RequestId, files: Vec<PathBuf>) {
        self.submit(EngineCommand::Upload { request_id, files });
    }

    pub fn query(&self, request_id: RequestId, question: impl Into<String>) {
        self.submit(EngineCommand::Query {
            request_id,
            question: question.into(),
        });
    }

    fn submit(&self, command: EngineCommand) {
        if let Err(mpsc::SendError(command)) = self.cmd_tx.send(command) {
            // Still settle the request so the caller never waits forever.
            chat_warn!("Engine worker is gone; failing request immediately");
            self.sink.emit(command.failed(RequestError::new(
                FailureKind::Unavailable,
                "engine worker is not running",
            )));
        }
    }
}

async fn handle_command(
    backend: Arc<dyn Backend>,
    command: EngineCommand,
    sink: Arc<dyn EventSink>,
) {
    match command {
        EngineCommand::Upload { request_id, files } => {
            let _context = docchat_logging::enter_request(request_id);
            chat_info!("POST upload with {} file(s)", files.len());
            let result = backend.upload(&files).await;
            match &result {
                Ok(response) => chat_info!("Indexed {} chunk(s)", response.documents_added),
                Err(err) => chat_warn!("Upload failed: {}", err),
            }
            sink.emit(EngineEvent::UploadCompleted { request_id, result });
        }
        EngineCommand::Query {
            request_id,
            question,
        } => {
            let _context = docchat_logging::enter_request(request_id);
            chat_info!("POST query ({} chars)", question.chars().count());
            let result = backend.query(&question).await;
            match &result {
                Ok(response) => {
                    chat_info!("Answer received ({} chars)", response.answer.chars().count())
                }
                Err(err) => chat_warn!("Query failed: {}", err),
            }
            sink.emit(EngineEvent::QueryCompleted { request_id, result });
        }
    }
}
