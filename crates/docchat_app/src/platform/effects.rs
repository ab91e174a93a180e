use std::path::PathBuf;
use std::sync::{mpsc, Arc};

use anyhow::Context;
use docchat_core::{
    ControllerError, Effect, FailureKind, Msg, Notice, RequestFailure, UploadReceipt,
};
use docchat_engine::{
    BackendSettings, EngineEvent, EngineHandle, EventSink, ReqwestBackend, RequestError,
};
use docchat_logging::{chat_debug, chat_info};

/// Effect outcome the front end has to show the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Surface {
    Notice(Notice),
    Failure(ControllerError),
}

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    /// Starts the request worker. Settlements come back on `msg_tx`.
    pub fn new(settings: BackendSettings, msg_tx: mpsc::Sender<Msg>) -> anyhow::Result<Self> {
        chat_info!("Backend base url {}", settings.base_url);
        let backend = ReqwestBackend::new(settings).context("invalid backend settings")?;
        let engine = EngineHandle::new(Arc::new(backend), Arc::new(MsgSink { msg_tx }))
            .context("failed to start the request worker")?;
        Ok(Self { engine })
    }

    /// Hands network effects to the worker and returns the rest for display.
    pub fn run(&self, effects: Vec<Effect>) -> Vec<Surface> {
        let mut surfaced = Vec::new();
        for effect in effects {
            match effect {
                Effect::Upload { request_id, files } => {
                    let paths: Vec<PathBuf> =
                        files.iter().map(|file| file.path().to_path_buf()).collect();
                    self.engine.upload(request_id, paths);
                }
                Effect::Query {
                    request_id,
                    question,
                } => self.engine.query(request_id, question),
                Effect::Notify(notice) => surfaced.push(Surface::Notice(notice)),
                Effect::Fail(err) => {
                    chat_debug!("Surfacing failure: {}", err);
                    surfaced.push(Surface::Failure(err));
                }
            }
        }
        surfaced
    }
}

struct MsgSink {
    msg_tx: mpsc::Sender<Msg>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.msg_tx.send(map_event(event));
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::UploadCompleted { request_id, result } => Msg::UploadSettled {
            request_id,
            result: result
                .map(|response| UploadReceipt {
                    documents_added: response.documents_added,
                })
                .map_err(map_failure),
        },
        EngineEvent::QueryCompleted { request_id, result } => Msg::QuerySettled {
            request_id,
            result: result.map(|response| response.answer).map_err(map_failure),
        },
    }
}

fn map_failure(err: RequestError) -> RequestFailure {
    use docchat_engine::FailureKind as Engine;

    let kind = match err.kind {
        Engine::InvalidUrl => FailureKind::InvalidRequest,
        Engine::UnreadableFile => FailureKind::LocalFile,
        Engine::HttpStatus(code) => FailureKind::HttpStatus(code),
        Engine::Timeout => FailureKind::Timeout,
        Engine::Network | Engine::Unavailable => FailureKind::Network,
        Engine::MalformedResponse => FailureKind::ResponseFormat,
        Engine::Backend => FailureKind::Rejected,
    };
    RequestFailure::new(kind, err.message)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::Duration;

    use docchat_core::{update, AppState, FileHandle, Phase, Role};
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const WAIT: Duration = Duration::from_secs(10);

    struct Harness {
        state: AppState,
        runner: EffectRunner,
        msg_rx: mpsc::Receiver<Msg>,
    }

    impl Harness {
        fn new(server: &MockServer) -> Self {
            let (msg_tx, msg_rx) = mpsc::channel();
            let settings = BackendSettings {
                base_url: server.uri(),
                ..BackendSettings::default()
            };
            Self {
                state: AppState::new(),
                runner: EffectRunner::new(settings, msg_tx).unwrap(),
                msg_rx,
            }
        }

        fn dispatch(&mut self, msg: Msg) -> Vec<Surface> {
            let (state, effects) = update(std::mem::take(&mut self.state), msg);
            self.state = state;
            self.runner.run(effects)
        }

        fn settle(&mut self) -> Vec<Surface> {
            let msg = self.msg_rx.recv_timeout(WAIT).expect("settlement");
            self.dispatch(msg)
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn upload_round_trip_notifies_chunk_count() {
        docchat_logging::initialize_for_tests();
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/upload"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"status": "success", "documents_added": 7}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let files: Vec<FileHandle> = ["fileA.pdf", "fileB.txt"]
            .iter()
            .map(|name| {
                let path = dir.path().join(name);
                fs::write(&path, name).unwrap();
                FileHandle::new(path)
            })
            .collect();

        let mut harness = Harness::new(&server);
        assert!(harness.dispatch(Msg::FilesSelected(files)).is_empty());
        assert!(harness.dispatch(Msg::UploadClicked).is_empty());
        assert_eq!(harness.state.view().upload_label(), "Uploading...");

        let surfaced = harness.settle();
        assert_eq!(
            surfaced,
            vec![Surface::Notice(Notice::DocumentsIndexed { count: 7 })]
        );
        assert_eq!(harness.state.phase(), Phase::Idle);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn query_round_trip_appends_answer() {
        docchat_logging::initialize_for_tests();
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/query"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"query": "What is X?", "answer": "X is Y"}"#,
            ))
            .mount(&server)
            .await;

        let mut harness = Harness::new(&server);
        harness.dispatch(Msg::DraftChanged("What is X?".to_string()));
        harness.dispatch(Msg::AskClicked);
        assert!(harness.state.is_busy());

        assert!(harness.settle().is_empty());
        let roles: Vec<(Role, &str)> = harness
            .state
            .log()
            .iter()
            .map(|message| (message.role(), message.text()))
            .collect();
        assert_eq!(roles, vec![(Role::User, "What is X?"), (Role::Bot, "X is Y")]);
        assert_eq!(harness.state.draft(), "");
        assert!(!harness.state.is_busy());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn failed_query_surfaces_error_and_keeps_draft() {
        docchat_logging::initialize_for_tests();
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/query"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut harness = Harness::new(&server);
        harness.dispatch(Msg::DraftChanged("Q".to_string()));
        harness.dispatch(Msg::AskClicked);

        let surfaced = harness.settle();
        match surfaced.as_slice() {
            [Surface::Failure(err)] => {
                assert_eq!(
                    err.failure().map(|failure| failure.kind.clone()),
                    Some(FailureKind::HttpStatus(500))
                );
            }
            other => panic!("unexpected surface {other:?}"),
        }
        assert_eq!(harness.state.log().len(), 1);
        assert_eq!(harness.state.draft(), "Q");
        assert!(!harness.state.is_busy());
    }

    #[test]
    fn engine_failures_map_onto_core_kinds() {
        use docchat_engine::FailureKind as Engine;

        let cases = [
            (Engine::Backend, FailureKind::Rejected),
            (Engine::MalformedResponse, FailureKind::ResponseFormat),
            (Engine::UnreadableFile, FailureKind::LocalFile),
            (Engine::Unavailable, FailureKind::Network),
            (Engine::HttpStatus(404), FailureKind::HttpStatus(404)),
        ];
        for (engine_kind, core_kind) in cases {
            let event = EngineEvent::QueryCompleted {
                request_id: 1,
                result: Err(test_error(engine_kind)),
            };
            match map_event(event) {
                Msg::QuerySettled { result, .. } => {
                    let failure = result.unwrap_err();
                    assert_eq!(failure.kind, core_kind);
                    assert_eq!(failure.message, "boom");
                }
                other => panic!("unexpected msg {other:?}"),
            }
        }
    }

    fn test_error(kind: docchat_engine::FailureKind) -> RequestError {
        RequestError {
            kind,
            message: "boom".to_string(),
        }
    }
}
