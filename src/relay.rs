//! Relay path reconstruction from `Received` trace fields

use crate::segment::{TraceBlock, trace_blocks};
use crate::types::RelayPath;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use tracing::debug;

static FROM_CLAUSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bfrom\s+([^\s(;\[]+)").unwrap());

static BY_CLAUSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bby\s+([^\s(;\[]+)").unwrap());

/// One relay hop as recorded by a single trace field
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct Hop {
    /// Host named after `from`, the side that handed the message over
    pub origin: Option<String>,

    /// Host named after `by`, the side that accepted it
    pub relay: Option<String>,
}

impl Hop {
    /// Read the `from` and `by` hosts out of a trace field
    ///
    /// Hosts are returned raw; see [`normalize_host`].
    #[must_use]
    pub fn parse(block: &TraceBlock) -> Self {
        Self {
            origin: first_token(&FROM_CLAUSE, block.as_str()),
            relay: first_token(&BY_CLAUSE, block.as_str()),
        }
    }
}

fn first_token(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
}

/// Canonical form of a host token
///
/// Trims whitespace, drops trailing `;`, `.` and `,`, unwraps an IP literal
/// from its brackets, then drops one final period.
#[must_use]
pub fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches([';', '.', ',']);
    let host = host.strip_prefix('[').unwrap_or(host);
    let host = host.strip_suffix(']').unwrap_or(host);
    host.strip_suffix('.').unwrap_or(host).to_string()
}

/// Build the oldest-to-newest host path from trace fields in source order
///
/// The path starts at the earliest hop's origin and then follows each hop's
/// relay. Origins of later hops are not added.
#[must_use]
pub fn build_relay_path(blocks: &[TraceBlock]) -> RelayPath {
    let hops: Vec<Hop> = blocks.iter().rev().map(Hop::parse).collect();
    let mut path = RelayPath::new();

    if let Some(origin) = hops.first().and_then(|hop| hop.origin.as_deref()) {
        path.push_unique(normalize_host(origin));
    }

    for relay in hops.iter().filter_map(|hop| hop.relay.as_deref()) {
        path.push_unique(normalize_host(relay));
    }

    debug!("Built relay path of {} hosts from {} hops", path.len(), hops.len());
    path
}

/// Segment a raw header block and build its relay path
#[must_use]
pub fn relay_path(headers: &str) -> RelayPath {
    build_relay_path(&trace_blocks(headers))
}
