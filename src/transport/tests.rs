use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tungstenite::protocol::Message as WsMessage;

use crate::broker::Broker;
use crate::config::BrokerSettings;
use crate::protocol::{Frame, parser};
use crate::session::{Session, SessionId};
use crate::transport::websocket::start_websocket_server;

// This helper mirrors the per-message handling of the websocket server:
// decode the text payload and feed the broker under its lock.
fn handle_text(broker: &Arc<Mutex<Broker>>, session_id: &SessionId, text: &str) {
    if let Ok(frame) = parser::parse(text) {
        broker.lock().unwrap().handle_frame(session_id, frame);
    }
}

fn attach_session(broker: &Arc<Mutex<Broker>>) -> (SessionId, UnboundedReceiver<Frame>) {
    let (tx, rx) = mpsc::unbounded_channel::<Frame>();
    let session = Session::new(tx);
    let id = session.id.clone();
    broker.lock().unwrap().on_connect(session);
    (id, rx)
}

#[tokio::test]
async fn test_wire_subscribe_reaches_broker() {
    let broker = Arc::new(Mutex::new(Broker::new()));
    let (id, mut rx) = attach_session(&broker);

    handle_text(&broker, &id, "CONNECT\n\n\u{0}");
    assert_eq!(rx.try_recv().unwrap().command, "CONNECTED");

    handle_text(&broker, &id, "SUBSCRIBE\ndestination:/wire\nid:7\n\n\u{0}");

    let broker = broker.lock().unwrap();
    let queue = broker.queues.get("/wire").unwrap();
    assert!(queue.contains(&id));
}

#[tokio::test]
async fn test_wire_send_fans_out() {
    let broker = Arc::new(Mutex::new(Broker::new()));
    let (id, mut rx) = attach_session(&broker);

    handle_text(&broker, &id, "CONNECT\n\n\u{0}");
    rx.try_recv().unwrap();
    handle_text(&broker, &id, "SUBSCRIBE\ndestination:/wire\n\n\u{0}");
    handle_text(&broker, &id, "SEND\ndestination:/wire\n\nover the wire\u{0}");

    let message = rx.try_recv().unwrap();
    assert_eq!(message.command, "MESSAGE");
    assert_eq!(message.header("destination"), "/wire");
    assert_eq!(message.body, "over the wire");
}

#[tokio::test]
async fn test_invalid_wire_frame_is_ignored() {
    let broker = Arc::new(Mutex::new(Broker::new()));
    let (id, mut rx) = attach_session(&broker);

    handle_text(&broker, &id, "");
    handle_text(&broker, &id, "\u{0}");

    assert!(rx.try_recv().is_err());
    assert!(broker.lock().unwrap().queues.is_empty());
}

async fn next_frame(ws: &mut WebSocketStream<MaybeTlsStream<TcpStream>>) -> Frame {
    let msg = tokio::time::timeout(Duration::from_secs(5), ws.next())
        .await
        .expect("timed out waiting for a frame");
    match msg {
        Some(Ok(WsMessage::Text(text))) => parser::parse(text.as_str()).unwrap(),
        other => panic!("Expected a text frame, got {:?}", other),
    }
}

#[tokio::test]
async fn integration_stomp_pubsub_end_to_end() {
    let broker = Arc::new(Mutex::new(Broker::new()));
    let addr = "127.0.0.1:9021";
    let settings = BrokerSettings {
        max_connections: 16,
        max_frame_bytes: 65536,
    };

    let server_broker = broker.clone();
    tokio::spawn(async move {
        start_websocket_server(addr, server_broker, settings).await;
    });

    tokio::time::sleep(Duration::from_millis(300)).await;

    let (mut ws_a, _) = connect_async("ws://127.0.0.1:9021")
        .await
        .expect("client A connect");
    let (mut ws_b, _) = connect_async("ws://127.0.0.1:9021")
        .await
        .expect("client B connect");

    ws_a.send(WsMessage::text("CONNECT\n\n\u{0}")).await.unwrap();
    let connected = next_frame(&mut ws_a).await;
    assert_eq!(connected.command, "CONNECTED");
    assert!(!connected.header("session-id").is_empty());

    ws_b.send(WsMessage::text("CONNECT\n\n\u{0}")).await.unwrap();
    next_frame(&mut ws_b).await;

    ws_a.send(WsMessage::text(
        "SUBSCRIBE\ndestination:/chat\nid:123\n\n\u{0}",
    ))
    .await
    .unwrap();
    ws_b.send(WsMessage::text(
        "SUBSCRIBE\ndestination:/chat\nid:456\n\n\u{0}",
    ))
    .await
    .unwrap();

    tokio::time::sleep(Duration::from_millis(200)).await;

    ws_a.send(WsMessage::text("SEND\ndestination:/chat\n\nhello world\u{0}"))
        .await
        .unwrap();

    let to_a = next_frame(&mut ws_a).await;
    assert_eq!(to_a.command, "MESSAGE");
    assert_eq!(to_a.header("destination"), "/chat");
    assert_eq!(to_a.header("subscription"), "123");
    assert_eq!(to_a.body, "hello world");

    let to_b = next_frame(&mut ws_b).await;
    assert_eq!(to_b.command, "MESSAGE");
    assert_eq!(to_b.header("subscription"), "456");
    assert_eq!(to_b.body, "hello world");
}
