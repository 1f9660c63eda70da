//! # stomplite
//!
//! `stomplite` is a minimalist, in-memory message broker speaking a
//! STOMP-like text protocol over WebSockets. Clients connect, subscribe to
//! named queues, and publish messages that are fanned out to every current
//! subscriber of the queue.
//!
//! ## Core Modules
//!
//! The library is structured into several modules, each with a distinct responsibility:
//!
//! - `protocol`: The frame data model and the wire-level parser/serializer.
//! - `session`: Per-connection state: identity, connect status, subscriptions.
//! - `broker`: The queue registry, command dispatch, and message fan-out.
//! - `transport`: The WebSocket server gluing connections to the broker.
//! - `config`: Handles loading and managing server configuration.
//! - `utils`: Contains shared utilities, such as error handling and logging.

pub mod broker;
pub mod config;
pub mod protocol;
pub mod session;
pub mod transport;
pub mod utils;
