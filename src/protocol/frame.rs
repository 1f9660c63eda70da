use std::collections::HashMap;

pub const CONNECT: &str = "CONNECT";
pub const CONNECTED: &str = "CONNECTED";
pub const SUBSCRIBE: &str = "SUBSCRIBE";
pub const UNSUBSCRIBE: &str = "UNSUBSCRIBE";
pub const SEND: &str = "SEND";
pub const MESSAGE: &str = "MESSAGE";
pub const ERROR: &str = "ERROR";

/// Returns true when `command` is part of the protocol vocabulary.
///
/// Commands outside the vocabulary are tolerated silently; recognized verbs
/// arriving at the wrong time are answered with an ERROR frame instead.
pub fn is_known_command(command: &str) -> bool {
    matches!(
        command,
        CONNECT | CONNECTED | SUBSCRIBE | UNSUBSCRIBE | SEND | MESSAGE | ERROR
    )
}

/// One unit of the protocol: a command, unique headers, and a body.
///
/// Headers are looked up by exact, case-sensitive name; an absent header
/// reads as the empty string rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub command: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl Frame {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            headers: HashMap::new(),
            body: String::new(),
        }
    }

    /// Builder-style header setter, replacing any previous value.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Exact-match header lookup; absent headers read as `""`.
    pub fn header(&self, name: &str) -> &str {
        self.headers.get(name).map(String::as_str).unwrap_or("")
    }

    /// The CONNECTED reply carrying the session identifier.
    pub fn connected(session_id: &str) -> Self {
        Frame::new(CONNECTED).with_header("session-id", session_id)
    }

    /// An ERROR frame whose body describes what went wrong.
    pub fn error(body: impl Into<String>) -> Self {
        Frame::new(ERROR).with_body(body)
    }
}
