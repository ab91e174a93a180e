pub const PROMPT: &str = "> ";
pub const BOT_PREFIX: &str = "bot> ";
pub const USER_PREFIX: &str = "you> ";
pub const FAILURE_PREFIX: &str = "! ";
pub const NOTICE_PREFIX: &str = "* ";
pub const BANNER: &str = "RAG Document Search. Type a question, or /help for commands.";
pub const BUSY_HINT: &str = "Still waiting on the previous request; input was not sent.";
pub const WAITING_TO_QUIT: &str = "Waiting for the in-flight request to settle before exiting...";
pub const RETRY_HINT: &str = "Type /retry to ask the same question again.";
pub const SELECT_HINT: &str = "Choose files with /select <file>... or /upload <file>..., then try again.";
