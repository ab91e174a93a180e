//! Docchat core: pure upload/conversation state machine and view-model helpers.
mod batch;
mod busy;
mod conversation;
mod effect;
mod error;
mod message;
mod msg;
mod state;
mod update;
mod upload;
mod view_model;

pub use batch::{FileBatch, FileHandle};
pub use busy::{BusyFlag, InFlight, Phase, RequestId, RequestKind};
pub use effect::{Effect, Notice};
pub use error::{
    ControllerError, FailureKind, QueryError, RequestFailure, UploadError, ValidationError,
};
pub use message::{ConversationLog, Message, Role};
pub use msg::{Msg, UploadReceipt};
pub use state::AppState;
pub use update::update;
pub use view_model::{AppViewModel, MessageView};
