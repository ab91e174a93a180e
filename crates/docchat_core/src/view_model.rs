use crate::{Phase, RequestKind, Role};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub phase: Phase,
    /// Display names of the selected files, in selection order.
    pub selection: Vec<String>,
    pub draft: String,
    pub messages: Vec<MessageView>,
    pub dirty: bool,
}

impl AppViewModel {
    /// Both triggering actions are disabled while a request is outstanding.
    pub fn actions_enabled(&self) -> bool {
        self.phase == Phase::Idle
    }

    pub fn upload_label(&self) -> &'static str {
        match self.phase {
            Phase::Submitting(RequestKind::Upload) => "Uploading...",
            _ => "Upload Documents",
        }
    }

    pub fn ask_label(&self) -> &'static str {
        match self.phase {
            Phase::Submitting(RequestKind::Query) => "Thinking...",
            _ => "Ask",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub role: Role,
    pub text: String,
}
