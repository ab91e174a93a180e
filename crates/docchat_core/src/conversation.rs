//! Conversation controller: owns the draft and appends to the log.
//!
//! The user message is appended as soon as a question is accepted and is
//! never rolled back, even if the query later fails. After a failure the
//! draft is left as it was so the same question can be asked again.

use docchat_logging::{chat_debug, chat_info, chat_warn};

use crate::{AppState, Effect, Message, QueryError, RequestFailure, RequestId, RequestKind};

pub(crate) fn update_draft(state: &mut AppState, text: String) -> Vec<Effect> {
    state.set_draft(text);
    Vec::new()
}

pub(crate) fn ask(state: &mut AppState) -> Vec<Effect> {
    if state.is_busy() {
        chat_debug!("Question ignored: a request is already in flight");
        return Vec::new();
    }
    // Empty questions are dropped without telling the user.
    if state.draft().trim().is_empty() {
        return Vec::new();
    }

    let question = state.draft().to_string();
    state.append_message(Message::user(question.clone()));
    let Some(request_id) = state.busy_mut().try_acquire(RequestKind::Query) else {
        return Vec::new();
    };
    chat_info!(
        "Query request {} accepted ({} chars)",
        request_id,
        question.chars().count()
    );
    vec![Effect::Query {
        request_id,
        question,
    }]
}

pub(crate) fn settle(
    state: &mut AppState,
    request_id: RequestId,
    result: Result<String, RequestFailure>,
) -> Vec<Effect> {
    if !state.busy_mut().release(request_id, RequestKind::Query) {
        chat_warn!("Ignoring settlement of unknown query request {}", request_id);
        return Vec::new();
    }
    state.mark_dirty();

    match result {
        Ok(answer) => {
            chat_info!("Query request {} answered", request_id);
            state.append_message(Message::bot(answer));
            state.set_draft(String::new());
            Vec::new()
        }
        Err(failure) => {
            chat_warn!("Query request {} failed: {}", request_id, failure);
            vec![Effect::Fail(QueryError { failure }.into())]
        }
    }
}
