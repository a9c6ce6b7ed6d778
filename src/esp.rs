//! Email Service Provider fingerprinting
//!
//! Classification walks an ordered rule table. Each rule reads one signal
//! from the header text and checks it against its needles in order; the
//! first containment hit decides the label. Signals are ordered from most
//! to least trustworthy: the bounce address, then the DKIM signer, then a
//! search over the whole header block.

use crate::segment::{HeaderField, header_field, unfolded_field};
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use tracing::debug;

/// Provider that sent a message
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq, Hash)]
pub enum EspLabel {
    #[serde(rename = "Amazon SES")]
    AmazonSes,
    #[serde(rename = "SendGrid")]
    SendGrid,
    #[serde(rename = "Mailgun")]
    Mailgun,
    #[serde(rename = "Zoho Mail")]
    ZohoMail,
    #[serde(rename = "Gmail / Google Workspace")]
    Google,
    #[serde(rename = "Outlook / Office365")]
    Outlook,
    #[default]
    #[serde(rename = "Unknown")]
    Unknown,
}

impl EspLabel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AmazonSes => "Amazon SES",
            Self::SendGrid => "SendGrid",
            Self::Mailgun => "Mailgun",
            Self::ZohoMail => "Zoho Mail",
            Self::Google => "Gmail / Google Workspace",
            Self::Outlook => "Outlook / Office365",
            Self::Unknown => "Unknown",
        }
    }

    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for EspLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Part of the header text a rule inspects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Value of the `Return-Path` field
    ReturnPath,
    /// Signing domain (`d=` tag) of the first `DKIM-Signature` field
    DkimDomain,
    /// The entire header block
    Anywhere,
}

impl Signal {
    fn read(self, headers: &str) -> Option<Cow<'_, str>> {
        match self {
            Self::ReturnPath => header_field(headers, HeaderField::ReturnPath).map(Cow::Borrowed),
            Self::DkimDomain => dkim_domain(headers).map(Cow::Owned),
            Self::Anywhere => Some(Cow::Borrowed(headers)),
        }
    }
}

/// A signal and the provider needles tried against it, in priority order
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub signal: Signal,
    pub needles: &'static [(&'static str, EspLabel)],
}

/// Classification rules, evaluated top to bottom
pub static RULES: &[Rule] = &[
    Rule {
        signal: Signal::ReturnPath,
        needles: &[
            ("amazonses.com", EspLabel::AmazonSes),
            ("sendgrid.net", EspLabel::SendGrid),
            ("mailgun.org", EspLabel::Mailgun),
            ("zoho.com", EspLabel::ZohoMail),
        ],
    },
    Rule {
        signal: Signal::DkimDomain,
        needles: &[
            ("amazonses", EspLabel::AmazonSes),
            ("sendgrid", EspLabel::SendGrid),
            ("mailgun", EspLabel::Mailgun),
            ("zoho", EspLabel::ZohoMail),
            ("google", EspLabel::Google),
            ("outlook", EspLabel::Outlook),
            ("microsoft", EspLabel::Outlook),
        ],
    },
    Rule {
        signal: Signal::Anywhere,
        needles: &[
            ("smtp-out.amazonses.com", EspLabel::AmazonSes),
            ("outlook.com", EspLabel::Outlook),
            ("office365.com", EspLabel::Outlook),
            ("protection.outlook.com", EspLabel::Outlook),
            ("google.com", EspLabel::Google),
            ("zoho.com", EspLabel::ZohoMail),
        ],
    },
];

impl Rule {
    /// Label of the first needle found in this rule's signal, if any
    #[must_use]
    pub fn evaluate(&self, headers: &str) -> Option<EspLabel> {
        let value = self.signal.read(headers)?.to_ascii_lowercase();
        self.needles
            .iter()
            .find(|(needle, _)| value.contains(needle))
            .map(|&(_, label)| label)
    }
}

/// Signing domain of the first `DKIM-Signature` field, lower-cased
#[must_use]
pub fn dkim_domain(headers: &str) -> Option<String> {
    let signature = unfolded_field(headers, HeaderField::DkimSignature.name())?;
    signature
        .split(';')
        .filter_map(|tag| tag.split_once('='))
        .find(|(name, _)| name.trim() == "d")
        .and_then(|(_, value)| value.split_whitespace().next())
        .map(str::to_ascii_lowercase)
}

/// Classify the sending provider of a header block
///
/// Always yields a label; [`EspLabel::Unknown`] when no rule matches.
#[must_use]
pub fn classify_esp(headers: &str) -> EspLabel {
    let label = RULES
        .iter()
        .find_map(|rule| rule.evaluate(headers))
        .unwrap_or_default();
    debug!("Classified ESP as {label}");
    label
}
