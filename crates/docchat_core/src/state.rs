use crate::view_model::{AppViewModel, MessageView};
use crate::{BusyFlag, ConversationLog, FileBatch, Message, Phase};

/// Session state owned by the front end and threaded through [`crate::update`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    selection: FileBatch,
    draft: String,
    log: ConversationLog,
    busy: BusyFlag,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            phase: self.busy.phase(),
            selection: self.selection.iter().map(|f| f.display_name()).collect(),
            draft: self.draft.clone(),
            messages: self
                .log
                .iter()
                .map(|message| MessageView {
                    role: message.role(),
                    text: message.text().to_string(),
                })
                .collect(),
            dirty: self.dirty,
        }
    }

    pub fn selection(&self) -> &FileBatch {
        &self.selection
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    pub fn busy(&self) -> &BusyFlag {
        &self.busy
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    pub fn phase(&self) -> Phase {
        self.busy.phase()
    }

    /// Returns whether anything visible changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_selection(&mut self, selection: FileBatch) {
        self.selection = selection;
        self.mark_dirty();
    }

    pub(crate) fn set_draft(&mut self, draft: String) {
        if self.draft != draft {
            self.draft = draft;
            self.mark_dirty();
        }
    }

    pub(crate) fn append_message(&mut self, message: Message) {
        self.log.push(message);
        self.mark_dirty();
    }

    pub(crate) fn busy_mut(&mut self) -> &mut BusyFlag {
        &mut self.busy
    }
}
