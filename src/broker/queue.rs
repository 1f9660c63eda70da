use crate::session::SessionId;

/// A named destination and its current members.
///
/// Members are `(session id, subscription id)` pairs kept in subscription
/// order; a session appears at most once. The broker drops a queue the
/// moment its member list becomes empty, so a registered queue always has
/// at least one member.
#[derive(Debug, Default)]
pub struct Queue {
    pub address: String,
    pub clients: Vec<(SessionId, String)>,
}

impl Queue {
    pub fn new(address: &str) -> Self {
        Self {
            address: address.to_string(),
            clients: Vec::new(),
        }
    }

    /// Adds a member, or updates its subscription id if it is already one.
    pub fn subscribe(&mut self, session: SessionId, subscription_id: String) {
        if let Some(entry) = self.clients.iter_mut().find(|(id, _)| *id == session) {
            entry.1 = subscription_id;
        } else {
            self.clients.push((session, subscription_id));
        }
    }

    /// Removes a member. Unknown sessions are ignored.
    pub fn unsubscribe(&mut self, session: &SessionId) {
        self.clients.retain(|(id, _)| id != session);
    }

    pub fn contains(&self, session: &SessionId) -> bool {
        self.clients.iter().any(|(id, _)| id == session)
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
