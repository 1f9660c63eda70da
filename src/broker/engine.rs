//! Broker engine
//!
//! This module contains the in-memory broker implementation responsible for:
//! - tracking every attached session and its protocol state
//! - managing the queue registry (lazy creation, empty-queue removal)
//! - dispatching inbound frames through the connection state machine
//! - fanning published messages out to every member of a queue
//!
//! Concurrency and usage notes:
//! - The public API here is synchronous and designed to be held behind a
//!   lock (for example `Arc<Mutex<Broker>>`) by the transport layer.
//!   Outbound delivery is a channel handoff, so no caller ever holds the
//!   broker lock across network I/O.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::broker::queue::Queue;
use crate::protocol::{self, Frame};
use crate::session::{Session, SessionId};
use crate::utils::error::ProtocolError;

#[derive(Debug, Default)]
pub struct Broker {
    pub queues: HashMap<String, Queue>,
    pub sessions: HashMap<SessionId, Session>,
}

impl Broker {
    pub fn new() -> Self {
        Self {
            queues: HashMap::new(),
            sessions: HashMap::new(),
        }
    }

    /// Registers a freshly accepted connection.
    ///
    /// Called by the transport when the listener reports a new connection;
    /// the session arrives unconnected and stays that way until it sends
    /// CONNECT.
    pub fn on_connect(&mut self, session: Session) {
        debug!("Session {} attached", session.id);
        self.sessions.insert(session.id.clone(), session);
    }

    /// Unconditional cleanup when a connection goes away.
    ///
    /// Removes the session from every queue it was subscribed to and drops
    /// any queue left without members. Dropping the session releases its
    /// outbound channel, which ends the connection's writer task.
    pub fn on_close(&mut self, session_id: &SessionId) {
        let Some(session) = self.sessions.remove(session_id) else {
            return;
        };

        for destination in session.subscriptions.keys() {
            if let Some(queue) = self.queues.get_mut(destination) {
                queue.unsubscribe(session_id);
                if queue.is_empty() {
                    self.queues.remove(destination);
                    debug!("Queue '{}' removed, no subscribers left", destination);
                }
            }
        }

        info!("Session {} closed", session_id);
    }

    /// Routes one inbound frame through the connection state machine.
    ///
    /// Before CONNECT is accepted, the only recognized verb that is honored
    /// is CONNECT itself; other recognized verbs are answered with an ERROR
    /// frame. Commands outside the protocol vocabulary are ignored in every
    /// state.
    pub fn handle_frame(&mut self, session_id: &SessionId, frame: Frame) {
        let Some(session) = self.sessions.get(session_id) else {
            warn!("Dropping frame from unknown session {}", session_id);
            return;
        };

        if !session.connected && frame.command != protocol::CONNECT {
            if protocol::frame::is_known_command(&frame.command) {
                session.send(ProtocolError::NotConnected(frame.command).into_frame());
            }
            return;
        }

        match frame.command.as_str() {
            protocol::CONNECT => self.connect(session_id),
            protocol::SUBSCRIBE => self.subscribe(session_id, &frame),
            protocol::UNSUBSCRIBE => self.unsubscribe(session_id, &frame),
            protocol::SEND => self.publish(session_id, &frame),
            other => debug!("Ignoring unrecognized command '{}' from {}", other, session_id),
        }
    }

    /// Accepts a CONNECT and confirms the session id.
    ///
    /// A repeated CONNECT is idempotent: the same CONNECTED reply is emitted
    /// again.
    fn connect(&mut self, session_id: &SessionId) {
        if let Some(session) = self.sessions.get_mut(session_id) {
            session.connected = true;
            session.send(Frame::connected(&session.id));
            info!("Session {} connected", session_id);
        }
    }

    /// Adds the session to the destination's queue, creating the queue on
    /// first use. Re-subscribing updates the stored subscription id without
    /// duplicating membership.
    fn subscribe(&mut self, session_id: &SessionId, frame: &Frame) {
        let destination = frame.header("destination").to_string();
        let subscription_id = frame.header("id").to_string();

        let Some(session) = self.sessions.get_mut(session_id) else {
            return;
        };

        let queue = self
            .queues
            .entry(destination.clone())
            .or_insert_with(|| Queue::new(&destination));
        queue.subscribe(session_id.clone(), subscription_id.clone());

        session.subscriptions.insert(destination.clone(), subscription_id);
        debug!("Session {} subscribed to '{}'", session_id, destination);
    }

    /// Removes the session from the destination's queue, dropping the queue
    /// when it loses its last member. A session that is not a member gets a
    /// `NotSubscribed` ERROR and nothing changes.
    fn unsubscribe(&mut self, session_id: &SessionId, frame: &Frame) {
        let destination = frame.header("destination").to_string();

        let Some(session) = self.sessions.get_mut(session_id) else {
            return;
        };

        if !session.subscriptions.contains_key(&destination)
            || !self.queues.contains_key(&destination)
        {
            session.send(ProtocolError::NotSubscribed(destination).into_frame());
            return;
        }

        session.subscriptions.remove(&destination);
        if let Some(queue) = self.queues.get_mut(&destination) {
            queue.unsubscribe(session_id);
            if queue.is_empty() {
                self.queues.remove(&destination);
                debug!("Queue '{}' removed, no subscribers left", destination);
            }
        }
    }

    /// Fans a SEND out to every current member of the destination's queue,
    /// the sender included. Each member's MESSAGE frame carries the
    /// destination, the member's own subscription id, and any user headers
    /// from the SEND frame.
    ///
    /// Publishing is gated on membership: a sender that is not subscribed to
    /// the destination gets a `NotSubscribed` ERROR and nothing is delivered.
    fn publish(&mut self, session_id: &SessionId, frame: &Frame) {
        let destination = frame.header("destination").to_string();

        let Some(sender) = self.sessions.get(session_id) else {
            return;
        };

        let Some(queue) = self.queues.get(&destination) else {
            sender.send(ProtocolError::NotSubscribed(destination).into_frame());
            return;
        };
        if !queue.contains(session_id) {
            sender.send(ProtocolError::NotSubscribed(destination).into_frame());
            return;
        }

        for (member_id, subscription_id) in &queue.clients {
            let Some(member) = self.sessions.get(member_id) else {
                warn!("No session registered with id {}", member_id);
                continue;
            };

            let mut headers = frame.headers.clone();
            headers.insert("destination".to_string(), destination.clone());
            headers.insert("subscription".to_string(), subscription_id.clone());
            member.send(Frame {
                command: protocol::MESSAGE.to_string(),
                headers,
                body: frame.body.clone(),
            });
        }

        debug!(
            "Session {} published to '{}' ({} subscriber(s))",
            session_id,
            destination,
            queue.clients.len()
        );
    }
}
