use std::sync::{Arc, Mutex};

use stomplite::broker::Broker;
use stomplite::config::load_config;
use stomplite::transport::websocket::start_websocket_server;
use stomplite::utils::logging;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    logging::init(&level);

    let config = load_config().expect("Failed to load configuration");
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let broker = Arc::new(Mutex::new(Broker::new()));
    start_websocket_server(&addr, broker, config.broker).await;
}
