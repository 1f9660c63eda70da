//! The `protocol` module defines the unit of the text protocol — the `Frame` —
//! and the wire-level parser/serializer that turns WebSocket text payloads
//! into frames and back.
//!
//! Everything above this module works on fully-constructed `Frame` values and
//! never touches raw wire text.

pub mod frame;
pub mod parser;

pub use frame::Frame;
pub use frame::{CONNECT, CONNECTED, ERROR, MESSAGE, SEND, SUBSCRIBE, UNSUBSCRIBE};
