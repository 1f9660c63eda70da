//! Wire codec for text frames.
//!
//! A frame on the wire is the command line, zero or more `name:value` header
//! lines, a blank line, the body, and a NUL terminator:
//!
//! ```text
//! SEND
//! destination:/queue/test
//!
//! hello\0
//! ```

use std::collections::HashMap;

use crate::protocol::Frame;
use crate::utils::error::ParseError;

/// Parses one wire frame. The trailing NUL terminator is optional so that
/// hand-written client frames are accepted too.
///
/// The command line must be non-empty and every header line must contain a
/// `:`. When a header name repeats, the first occurrence wins. The body is
/// preserved verbatim.
pub fn parse(input: &str) -> Result<Frame, ParseError> {
    let input = input.trim_end_matches('\u{0}');

    let (head, body) = match input.split_once("\n\n") {
        Some((head, body)) => (head, body),
        None => (input, ""),
    };

    let mut lines = head.lines();
    let command = lines
        .next()
        .map(str::trim)
        .filter(|command| !command.is_empty())
        .ok_or(ParseError::MissingCommand)?;

    let mut headers = HashMap::new();
    for line in lines {
        if line.is_empty() {
            continue;
        }
        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| ParseError::MalformedHeader(line.to_string()))?;
        headers
            .entry(name.trim().to_string())
            .or_insert_with(|| value.trim().to_string());
    }

    Ok(Frame {
        command: command.to_string(),
        headers,
        body: body.to_string(),
    })
}

/// Serializes a frame back into its wire form, NUL-terminated.
pub fn serialize(frame: &Frame) -> String {
    let mut out = String::new();
    out.push_str(&frame.command);
    out.push('\n');
    for (name, value) in &frame.headers {
        out.push_str(name);
        out.push(':');
        out.push_str(value);
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&frame.body);
    out.push('\u{0}');
    out
}
