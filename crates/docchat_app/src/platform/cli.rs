use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Upload documents to a retrieval backend and ask questions about them.
#[derive(Debug, Parser)]
#[command(name = "docchat", version, about)]
pub struct Cli {
    /// Backend base URL; overrides the config file
    #[arg(long, env = "DOCCHAT_BACKEND_URL", value_name = "URL")]
    pub backend_url: Option<String>,

    /// Path to a RON config file (defaults to ./docchat.ron when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Mirror the log to the terminal
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Interactive session (the default)
    Chat,
    /// Upload files for indexing, then exit
    Upload {
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,
    },
    /// Ask a single question, print the answer, then exit
    Ask {
        #[arg(required = true, num_args = 1.., value_name = "QUESTION")]
        question: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_is_the_default() {
        let cli = Cli::try_parse_from(["docchat"]).unwrap();
        assert_eq!(cli.command, None);
        assert!(!cli.verbose);
    }

    #[test]
    fn upload_requires_files() {
        assert!(Cli::try_parse_from(["docchat", "upload"]).is_err());
        let cli = Cli::try_parse_from(["docchat", "upload", "a.pdf", "b.txt"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Upload {
                files: vec![PathBuf::from("a.pdf"), PathBuf::from("b.txt")],
            })
        );
    }

    #[test]
    fn ask_collects_words_and_flags() {
        let cli = Cli::try_parse_from([
            "docchat",
            "--backend-url",
            "http://rag.local:9000",
            "-v",
            "ask",
            "What",
            "is",
            "X?",
        ])
        .unwrap();
        assert_eq!(cli.backend_url.as_deref(), Some("http://rag.local:9000"));
        assert!(cli.verbose);
        assert_eq!(
            cli.command,
            Some(Command::Ask {
                question: vec!["What".into(), "is".into(), "X?".into()],
            })
        );
    }

    #[test]
    fn command_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
