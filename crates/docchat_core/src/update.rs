use crate::{conversation, upload, AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FilesSelected(handles) => upload::select_files(&mut state, handles),
        Msg::UploadClicked => upload::submit(&mut state),
        Msg::UploadSettled { request_id, result } => {
            upload::settle(&mut state, request_id, result)
        }
        Msg::DraftChanged(text) => conversation::update_draft(&mut state, text),
        Msg::AskClicked => conversation::ask(&mut state),
        Msg::QuerySettled { request_id, result } => {
            conversation::settle(&mut state, request_id, result)
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
