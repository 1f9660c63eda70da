//! Error types for the broker core and the wire codec.
//!
//! Protocol errors are never fatal: each one is answered to the offending
//! session as an ERROR frame whose body is the `Display` string below, and
//! the connection stays open.

use thiserror::Error;

use crate::protocol::Frame;

/// A command that could not be honored in the session's current state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// A recognized verb other than CONNECT arrived before CONNECT.
    #[error("Please connect before sending '{0}'")]
    NotConnected(String),

    /// UNSUBSCRIBE or SEND named a queue the session is not a member of.
    #[error("You are not subscribed to queue '{0}'")]
    NotSubscribed(String),
}

impl ProtocolError {
    /// The ERROR frame answered to the offending session.
    pub fn into_frame(self) -> Frame {
        Frame::error(self.to_string())
    }
}

/// A wire payload that could not be decoded into a frame.
///
/// Parse failures are a transport concern: they are logged and dropped, never
/// answered with a protocol ERROR.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("frame is missing a command line")]
    MissingCommand,

    #[error("malformed header line: '{0}'")]
    MalformedHeader(String),
}
