use docchat_core::{AppViewModel, ControllerError, Phase, RequestKind, Role};

use super::constants::*;
use crate::platform::effects::Surface;

/// One line of terminal output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Transient state, written to stderr.
    Status(String),
    /// Conversation content and confirmations, written to stdout.
    Output(String),
    /// Blocking notifications, written to stderr.
    Failure(String),
}

impl Line {
    pub fn print(&self) {
        match self {
            Line::Output(text) => println!("{text}"),
            Line::Status(text) | Line::Failure(text) => eprintln!("{text}"),
        }
    }
}

/// Turns successive view models into the lines that changed.
///
/// User messages are never echoed; the user just typed them.
#[derive(Debug, Default)]
pub struct Renderer {
    shown_messages: usize,
    last_phase: Phase,
}

impl Renderer {
    pub fn render(&mut self, view: &AppViewModel) -> Vec<Line> {
        let mut lines = Vec::new();

        if view.phase != self.last_phase {
            if let Phase::Submitting(kind) = view.phase {
                let label = match kind {
                    RequestKind::Upload => view.upload_label(),
                    RequestKind::Query => view.ask_label(),
                };
                lines.push(Line::Status(label.to_string()));
            }
            self.last_phase = view.phase;
        }

        lines.extend(
            view.messages
                .iter()
                .skip(self.shown_messages)
                .filter(|message| message.role == Role::Bot)
                .map(|message| Line::Output(format!("{BOT_PREFIX}{}", message.text))),
        );
        self.shown_messages = view.messages.len();

        lines
    }
}

pub fn render_history(view: &AppViewModel) -> Vec<Line> {
    if view.messages.is_empty() {
        return vec![Line::Status("No messages yet.".to_string())];
    }
    view.messages
        .iter()
        .map(|message| {
            let prefix = match message.role {
                Role::User => USER_PREFIX,
                Role::Bot => BOT_PREFIX,
            };
            Line::Output(format!("{prefix}{}", message.text))
        })
        .collect()
}

pub fn render_surface(surface: &Surface) -> Vec<Line> {
    match surface {
        Surface::Notice(notice) => vec![Line::Output(format!("{NOTICE_PREFIX}{notice}"))],
        Surface::Failure(err) => {
            let mut lines = vec![Line::Failure(format!("{FAILURE_PREFIX}{err}"))];
            if err.is_validation() {
                lines.push(Line::Status(SELECT_HINT.to_string()));
            } else if matches!(err, ControllerError::Query(_)) {
                lines.push(Line::Status(RETRY_HINT.to_string()));
            }
            lines
        }
    }
}

#[cfg(test)]
mod tests {
    use docchat_core::{
        FailureKind, MessageView, Notice, QueryError, RequestFailure, UploadError,
        ValidationError,
    };

    use super::*;

    fn view(phase: Phase, messages: &[(Role, &str)]) -> AppViewModel {
        AppViewModel {
            phase,
            messages: messages
                .iter()
                .map(|(role, text)| MessageView {
                    role: *role,
                    text: text.to_string(),
                })
                .collect(),
            ..AppViewModel::default()
        }
    }

    #[test]
    fn shows_busy_label_once_then_answer() {
        let mut renderer = Renderer::default();

        let asking = view(Phase::Submitting(RequestKind::Query), &[(Role::User, "Q")]);
        assert_eq!(
            renderer.render(&asking),
            vec![Line::Status("Thinking...".to_string())]
        );
        assert!(renderer.render(&asking).is_empty());

        let answered = view(Phase::Idle, &[(Role::User, "Q"), (Role::Bot, "A")]);
        assert_eq!(
            renderer.render(&answered),
            vec![Line::Output("bot> A".to_string())]
        );
        assert!(renderer.render(&answered).is_empty());
    }

    #[test]
    fn upload_uses_its_own_label() {
        let mut renderer = Renderer::default();
        let uploading = view(Phase::Submitting(RequestKind::Upload), &[]);
        assert_eq!(
            renderer.render(&uploading),
            vec![Line::Status("Uploading...".to_string())]
        );
    }

    #[test]
    fn history_prefixes_roles() {
        let lines = render_history(&view(Phase::Idle, &[(Role::User, "Q"), (Role::Bot, "A")]));
        assert_eq!(
            lines,
            vec![
                Line::Output("you> Q".to_string()),
                Line::Output("bot> A".to_string()),
            ]
        );
    }

    #[test]
    fn surfaces_render_notice_and_failures() {
        let notice = Surface::Notice(Notice::DocumentsIndexed { count: 7 });
        assert_eq!(
            render_surface(&notice),
            vec![Line::Output("* Uploaded 7 chunks successfully!".to_string())]
        );

        let validation = Surface::Failure(ValidationError::EmptySelection.into());
        assert_eq!(
            render_surface(&validation),
            vec![
                Line::Failure("! Select a file first!".to_string()),
                Line::Status(SELECT_HINT.to_string()),
            ]
        );

        let upload = Surface::Failure(
            UploadError {
                failure: RequestFailure::new(FailureKind::HttpStatus(500), "500 Internal Server Error"),
            }
            .into(),
        );
        assert_eq!(render_surface(&upload).len(), 1);

        let query = Surface::Failure(
            QueryError {
                failure: RequestFailure::new(FailureKind::Timeout, "timed out"),
            }
            .into(),
        );
        let lines = render_surface(&query);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], Line::Status(RETRY_HINT.to_string()));
    }
}
