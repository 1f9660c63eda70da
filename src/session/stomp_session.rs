use std::collections::HashMap;

use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;
use uuid::Uuid;

use crate::protocol::Frame;

pub type SessionId = String;

/// Server-side state for one connected client.
///
/// A session starts unconnected; the first accepted CONNECT flips
/// `connected` and the id is echoed back in the CONNECTED reply.
/// `subscriptions` maps each destination the session is a member of to the
/// subscription id it supplied (empty string when none was given).
#[derive(Debug)]
pub struct Session {
    /// Opaque unique identifier, assigned when the connection is accepted.
    pub id: SessionId,

    /// False until a CONNECT frame has been accepted.
    pub connected: bool,

    /// Destination name → client-chosen subscription id.
    pub subscriptions: HashMap<String, String>,

    // Single-slot delivery sink, set at construction and never reassigned.
    sender: UnboundedSender<Frame>,
}

impl Session {
    pub fn new(sender: UnboundedSender<Frame>) -> Self {
        Self {
            id: format!("session-{}", Uuid::new_v4()),
            connected: false,
            subscriptions: HashMap::new(),
            sender,
        }
    }

    /// Queues a frame on the session's outbound channel.
    ///
    /// Never blocks; a closed channel (the connection is going away) is
    /// logged and otherwise ignored.
    pub fn send(&self, frame: Frame) {
        if let Err(e) = self.sender.send(frame) {
            warn!("Failed to queue frame for {}: {}", self.id, e);
        }
    }
}
