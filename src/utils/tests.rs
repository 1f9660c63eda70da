use super::error::ProtocolError;
use super::logging;

#[test]
fn test_logging_init_accepts_levels() {
    // Should not panic
    logging::init("info");
    logging::init("debug");
    logging::init("warn");
}

#[test]
fn test_protocol_error_frames_carry_exact_bodies() {
    let frame = ProtocolError::NotConnected("SUBSCRIBE".to_string()).into_frame();
    assert_eq!(frame.command, "ERROR");
    assert_eq!(frame.body, "Please connect before sending 'SUBSCRIBE'");

    let frame = ProtocolError::NotSubscribed("/test2".to_string()).into_frame();
    assert_eq!(frame.command, "ERROR");
    assert_eq!(frame.body, "You are not subscribed to queue '/test2'");
}
