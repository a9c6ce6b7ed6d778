//! Header block segmentation
//!
//! Splits a raw header block into logical fields, undoing line folding, and
//! pulls out the `Received` trace fields in the order they appear.

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

/// One `Received` field with its continuation lines joined by single spaces
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct TraceBlock(String);

impl TraceBlock {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TraceBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Header fields read directly off the raw text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderField {
    From,
    To,
    ReturnPath,
    DkimSignature,
}

static FROM_FIELD: LazyLock<Regex> = LazyLock::new(|| field_pattern(HeaderField::From));
static TO_FIELD: LazyLock<Regex> = LazyLock::new(|| field_pattern(HeaderField::To));
static RETURN_PATH_FIELD: LazyLock<Regex> =
    LazyLock::new(|| field_pattern(HeaderField::ReturnPath));
static DKIM_SIGNATURE_FIELD: LazyLock<Regex> =
    LazyLock::new(|| field_pattern(HeaderField::DkimSignature));

fn field_pattern(field: HeaderField) -> Regex {
    Regex::new(&format!(r"(?im)^{}: ([^\r\n]+)", regex::escape(field.name()))).unwrap()
}

impl HeaderField {
    /// Field name as it appears before the colon
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::From => "From",
            Self::To => "To",
            Self::ReturnPath => "Return-Path",
            Self::DkimSignature => "DKIM-Signature",
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            Self::From => &FROM_FIELD,
            Self::To => &TO_FIELD,
            Self::ReturnPath => &RETURN_PATH_FIELD,
            Self::DkimSignature => &DKIM_SIGNATURE_FIELD,
        }
    }
}

impl fmt::Display for HeaderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Value of the first physical line `Name: value` for the given field
///
/// The field name is matched case-insensitively at a line start and must be
/// followed by a colon and a single space. Continuation lines are not joined.
#[must_use]
pub fn header_field(headers: &str, field: HeaderField) -> Option<&str> {
    field
        .pattern()
        .captures(headers)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str())
}

/// Value of the first field named `name`, with folded lines joined
#[must_use]
pub fn unfolded_field(headers: &str, name: &str) -> Option<String> {
    scan_fields(headers, name, true)
        .into_iter()
        .next()
        .map(|field| field[name.len() + 1..].trim().to_string())
}

/// All `Received` fields, in source order (newest hop first)
///
/// A header block without any yields an empty list.
#[must_use]
pub fn trace_blocks(headers: &str) -> Vec<TraceBlock> {
    scan_fields(headers, "Received", false)
        .into_iter()
        .map(TraceBlock)
        .collect()
}

fn starts_field(line: &str, name: &str) -> bool {
    line.get(..name.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(name))
        && line[name.len()..].starts_with(':')
}

/// Collect every field called `name`, each joined into one logical line
///
/// A field opens on a line starting with `name:`, absorbs the whitespace-led
/// lines that follow, and closes on any other line.
fn scan_fields(headers: &str, name: &str, first_only: bool) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current: Option<String> = None;

    for line in headers.lines() {
        if starts_field(line, name) {
            if let Some(field) = current.take() {
                fields.push(field.trim().to_string());
            }
            current = Some(line.trim().to_string());
        } else if line.starts_with(char::is_whitespace)
            && let Some(field) = current.as_mut()
        {
            field.push(' ');
            field.push_str(line.trim());
        } else if let Some(field) = current.take() {
            fields.push(field.trim().to_string());
        }

        if first_only && !fields.is_empty() {
            return fields;
        }
    }

    if let Some(field) = current {
        fields.push(field.trim().to_string());
    }
    fields
}
