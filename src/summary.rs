//! Per-message header summary

use crate::esp::{EspLabel, classify_esp};
use crate::relay::relay_path;
use crate::segment::{HeaderField, header_field};
use crate::types::RelayPath;
use serde::Serialize;
use std::borrow::Cow;
use tracing::{debug, trace};

/// Sender, recipient, relay path and provider of one message
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct EmailHeaderSummary {
    /// Raw `From` value
    #[serde(rename = "fromEmail")]
    pub from_email: Option<String>,

    /// Raw `To` value
    #[serde(rename = "toEmail")]
    pub to_email: Option<String>,

    /// Hosts the message passed through, oldest first
    pub servers: RelayPath,

    #[serde(rename = "ESP")]
    pub esp: EspLabel,
}

impl EmailHeaderSummary {
    /// Render as the JSON object handed to API callers
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!(self)
    }
}

/// Summarize a raw header block
///
/// Never fails: empty or malformed input gives absent addresses, an empty
/// path and [`EspLabel::Unknown`].
#[must_use]
pub fn summarize_headers(headers: &str) -> EmailHeaderSummary {
    trace!("Summarizing headers:\n{headers}");

    let summary = EmailHeaderSummary {
        from_email: header_field(headers, HeaderField::From).map(str::to_string),
        to_email: header_field(headers, HeaderField::To).map(str::to_string),
        servers: relay_path(headers),
        esp: classify_esp(headers),
    };

    debug!(
        "Summarized message from {:?}: {} via {}",
        summary.from_email, summary.esp, summary.servers
    );
    summary
}

/// Header section of a raw RFC 5322 message, up to the blank separator line
///
/// Falls back to the whole input when the header section cannot be parsed.
#[must_use]
pub fn header_block(raw: &[u8]) -> Cow<'_, str> {
    let end = mailparse::parse_headers(raw).map_or(raw.len(), |(_, offset)| offset);
    String::from_utf8_lossy(&raw[..end])
}

/// Summarize a complete raw message
#[must_use]
pub fn summarize_message(raw: &[u8]) -> EmailHeaderSummary {
    summarize_headers(&header_block(raw))
}
