use std::path::PathBuf;
use std::str::FromStr;

use docchat_core::{FileHandle, Msg};
use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Commands recognized when an input line starts with a slash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum SlashCommand {
    /// Replace the file selection
    Select,
    /// Upload the selection, optionally selecting files first
    Upload,
    /// Ask the current draft again
    Retry,
    /// Print the whole conversation
    History,
    /// Show help
    Help,
    /// Leave the session
    Quit,
}

impl SlashCommand {
    pub fn command(self) -> &'static str {
        self.into()
    }

    pub fn usage(self) -> String {
        match self {
            SlashCommand::Select => format!("/{} <file>...", self.command()),
            SlashCommand::Upload => format!("/{} [file]...", self.command()),
            _ => format!("/{}", self.command()),
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SlashCommand::Select => "choose the files for the next upload",
            SlashCommand::Upload => "send the selected files for indexing",
            SlashCommand::Retry => "ask the last unanswered question again",
            SlashCommand::History => "print the conversation so far",
            SlashCommand::Help => "show available commands",
            SlashCommand::Quit => "exit once nothing is in flight",
        }
    }
}

/// One line of user input, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Anything that is not a slash command is a question.
    Ask(String),
    Select(Vec<PathBuf>),
    Upload(Vec<PathBuf>),
    Retry,
    History,
    Help,
    Quit,
    Unknown(String),
}

impl Input {
    /// Whether this input triggers a request and so needs an idle session.
    pub fn needs_idle(&self) -> bool {
        matches!(self, Input::Ask(_) | Input::Upload(_) | Input::Retry)
    }

    /// Messages to feed to the core for this input, in order.
    pub fn into_msgs(self) -> Vec<Msg> {
        match self {
            // A blank line leaves a retained draft alone so /retry still works.
            Input::Ask(text) if text.trim().is_empty() => Vec::new(),
            Input::Ask(text) => vec![Msg::DraftChanged(text), Msg::AskClicked],
            Input::Select(paths) => vec![Msg::FilesSelected(handles(paths))],
            Input::Upload(paths) if paths.is_empty() => vec![Msg::UploadClicked],
            Input::Upload(paths) => vec![Msg::FilesSelected(handles(paths)), Msg::UploadClicked],
            Input::Retry => vec![Msg::AskClicked],
            Input::History | Input::Help | Input::Quit | Input::Unknown(_) => Vec::new(),
        }
    }
}

fn handles(paths: Vec<PathBuf>) -> Vec<FileHandle> {
    paths.into_iter().map(FileHandle::from).collect()
}

pub fn parse_line(line: &str) -> Input {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(rest) = line.trim_start().strip_prefix('/') else {
        return Input::Ask(line.to_string());
    };

    let mut parts = rest.split_whitespace();
    let head = parts.next().unwrap_or_default();
    let paths: Vec<PathBuf> = parts.map(PathBuf::from).collect();

    let command = SlashCommand::from_str(head)
        .ok()
        .or_else(|| match head.to_lowercase().as_str() {
            "q" | "exit" | "bye" => Some(SlashCommand::Quit),
            "h" | "?" => Some(SlashCommand::Help),
            _ => None,
        });

    match command {
        Some(SlashCommand::Select) => Input::Select(paths),
        Some(SlashCommand::Upload) => Input::Upload(paths),
        Some(SlashCommand::Retry) => Input::Retry,
        Some(SlashCommand::History) => Input::History,
        Some(SlashCommand::Help) => Input::Help,
        Some(SlashCommand::Quit) => Input::Quit,
        None => Input::Unknown(head.to_string()),
    }
}

pub fn help_text() -> String {
    let mut help = String::from("Type a question and press enter to ask it.\n\nCommands:\n");
    for command in SlashCommand::iter() {
        help.push_str(&format!("  {:<20} {}\n", command.usage(), command.description()));
    }
    help.push_str("\nAliases: /q and /exit for /quit, /h for /help.");
    help
}
