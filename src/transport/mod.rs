//! The `transport` module is responsible for handling network communication
//! with clients, primarily via WebSockets.
//!
//! It accepts connections, decodes WebSocket text payloads into protocol
//! frames, and forwards them to the broker; outbound frames travel back
//! through each session's channel and are serialized onto the socket here.

pub mod websocket;

#[cfg(test)]
mod tests;
