use std::sync::Once;

use docchat_core::{
    update, AppState, ControllerError, Effect, FailureKind, FileHandle, Msg, Notice, Phase,
    RequestFailure, RequestKind, UploadError, UploadReceipt, ValidationError,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(docchat_logging::initialize_for_tests);
}

fn select(state: AppState, names: &[&str]) -> AppState {
    let handles = names.iter().map(|name| FileHandle::new(*name)).collect();
    let (state, effects) = update(state, Msg::FilesSelected(handles));
    assert!(effects.is_empty());
    state
}

fn upload_request_id(effects: &[Effect]) -> u64 {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::Upload { request_id, .. } => Some(*request_id),
            _ => None,
        })
        .expect("upload effect")
}

#[test]
fn selection_replaces_previous_batch() {
    init_logging();
    let state = select(AppState::new(), &["a.pdf", "b.docx"]);
    assert_eq!(state.view().selection, vec!["a.pdf", "b.docx"]);

    let state = select(state, &["c.txt"]);
    assert_eq!(state.view().selection, vec!["c.txt"]);

    let state = select(state, &[]);
    assert!(state.selection().is_empty());
    assert_eq!(state.phase(), Phase::Idle);
}

#[test]
fn upload_success_notifies_chunk_count_and_releases() {
    init_logging();
    let state = select(AppState::new(), &["fileA.pdf", "fileB.txt"]);

    let (mut state, effects) = update(state, Msg::UploadClicked);
    assert_eq!(state.phase(), Phase::Submitting(RequestKind::Upload));
    assert!(state.consume_dirty());
    let request_id = upload_request_id(&effects);
    match &effects[..] {
        [Effect::Upload { files, .. }] => {
            let names: Vec<_> = files.iter().map(|f| f.display_name()).collect();
            assert_eq!(names, vec!["fileA.pdf", "fileB.txt"]);
        }
        other => panic!("unexpected effects: {other:?}"),
    }

    let (state, effects) = update(
        state,
        Msg::UploadSettled {
            request_id,
            result: Ok(UploadReceipt { documents_added: 7 }),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::Notify(Notice::DocumentsIndexed { count: 7 })]
    );
    assert!(!state.is_busy());
    // Selection survives the upload.
    assert_eq!(state.selection().len(), 2);
}

#[test]
fn indexed_notice_reports_count() {
    let notice = Notice::DocumentsIndexed { count: 7 };
    assert_eq!(notice.to_string(), "Uploaded 7 chunks successfully!");
}

#[test]
fn upload_with_empty_selection_is_a_validation_failure() {
    init_logging();
    let mut state = AppState::new();
    state.consume_dirty();

    let (mut state, effects) = update(state, Msg::UploadClicked);

    assert_eq!(
        effects,
        vec![Effect::Fail(ControllerError::Validation(
            ValidationError::EmptySelection
        ))]
    );
    assert!(!state.is_busy());
    assert!(!state.consume_dirty());
}

#[test]
fn upload_failure_surfaces_error_and_releases() {
    init_logging();
    let state = select(AppState::new(), &["a.pdf"]);
    let (state, effects) = update(state, Msg::UploadClicked);
    let request_id = upload_request_id(&effects);

    let failure = RequestFailure::new(FailureKind::HttpStatus(500), "500 Internal Server Error");
    let (state, effects) = update(
        state,
        Msg::UploadSettled {
            request_id,
            result: Err(failure.clone()),
        },
    );

    assert_eq!(
        effects,
        vec![Effect::Fail(ControllerError::Upload(UploadError { failure }))]
    );
    assert_eq!(state.phase(), Phase::Idle);
    assert!(state.log().is_empty());
}

#[test]
fn upload_while_busy_is_noop() {
    init_logging();
    let state = select(AppState::new(), &["a.pdf"]);
    let (state, _effects) = update(state, Msg::UploadClicked);
    let before = state.clone();

    let (state, effects) = update(state, Msg::UploadClicked);

    assert!(effects.is_empty());
    assert_eq!(state, before);
}

#[test]
fn stale_upload_settlement_is_ignored() {
    init_logging();
    let state = select(AppState::new(), &["a.pdf"]);
    let (state, effects) = update(state, Msg::UploadClicked);
    let request_id = upload_request_id(&effects);

    let (state, effects) = update(
        state,
        Msg::UploadSettled {
            request_id: request_id + 10,
            result: Ok(UploadReceipt { documents_added: 1 }),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.phase(), Phase::Submitting(RequestKind::Upload));
}
