use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::spawn;
use tokio::sync::mpsc;
use tokio_tungstenite::accept_async;
use tracing::{debug, error, info, warn};
use tungstenite::protocol::Message as WsMessage;

use std::sync::{Arc, Mutex};

use crate::broker::Broker;
use crate::config::BrokerSettings;
use crate::protocol::{Frame, parser};
use crate::session::Session;

pub async fn start_websocket_server(
    addr: &str,
    broker: Arc<Mutex<Broker>>,
    settings: BrokerSettings,
) {
    let listener = TcpListener::bind(addr).await.expect("Can't bind");

    info!("STOMP server listening on ws://{}", addr);

    while let Ok((stream, _)) = listener.accept().await {
        let broker = broker.clone();
        let settings = settings.clone();

        tokio::spawn(async move {
            let ws_stream = match accept_async(stream).await {
                Ok(ws) => ws,
                Err(e) => {
                    error!("WebSocket handshake error: {}", e);
                    return;
                }
            };

            let (mut ws_sender, mut ws_receiver) = ws_stream.split();

            // Channel carrying outbound frames for this connection
            let (tx, mut rx) = mpsc::unbounded_channel::<Frame>();
            let session = Session::new(tx);
            let session_id = session.id.clone();

            // Register the session before doing anything else
            {
                let mut broker = broker.lock().unwrap();
                if broker.sessions.len() >= settings.max_connections {
                    warn!(
                        "Refusing connection, {} sessions already attached",
                        broker.sessions.len()
                    );
                    return;
                }
                broker.on_connect(session);
            }

            // Spawn a task to forward frames from broker → client
            let writer_id = session_id.clone();
            spawn(async move {
                while let Some(frame) = rx.recv().await {
                    let text = parser::serialize(&frame);
                    if let Err(e) = ws_sender.send(WsMessage::text(text)).await {
                        warn!("Failed to send frame to {}: {}", writer_id, e);
                        break;
                    }
                }
                debug!("Send loop closed for {}", writer_id);
            });

            // Handle incoming frames from the client
            while let Some(Ok(msg)) = ws_receiver.next().await {
                if !msg.is_text() {
                    continue;
                }
                let text = msg.to_text().unwrap();
                if text.len() > settings.max_frame_bytes {
                    warn!(
                        "Dropping oversized frame ({} bytes) from {}",
                        text.len(),
                        session_id
                    );
                    continue;
                }
                match parser::parse(text) {
                    Ok(frame) => {
                        let mut broker = broker.lock().unwrap();
                        broker.handle_frame(&session_id, frame);
                    }
                    Err(e) => {
                        warn!("Invalid frame from {}: {}", session_id, e);
                    }
                }
            }

            debug!("{} disconnected", session_id);

            // Clean up the disconnected session
            {
                let mut broker = broker.lock().unwrap();
                broker.on_close(&session_id);
            }
        });
    }
}
