// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]
#![allow(clippy::significant_drop_tightening)]

//! Email relay-chain reconstruction and ESP fingerprinting
//!
//! Given the raw header block of one message, rebuilds the chain of hosts it
//! travelled through from its `Received` trace fields and guesses which
//! Email Service Provider sent it.
//!
//! # Features
//!
//! - Unfolding and segmentation of `Received` fields
//! - Oldest-to-newest relay path with normalized, de-duplicated hosts
//! - Layered ESP classification (Return-Path, DKIM signer, full-text)
//! - Subject lookup over a pluggable mail store with an explicit session state
//!
//! # Example
//!
//! ```rust
//! use email_hops::{EspLabel, summarize_headers};
//!
//! let headers = "Received: from mx.example.net by mail.example.com;\r\n\
//!                Received: from o1.sendgrid.net by mx.example.net;\r\n\
//!                Return-Path: <bounces@sendgrid.net>\r\n\
//!                From: sender@example.org\r\n";
//! let summary = summarize_headers(headers);
//!
//! assert_eq!(summary.esp, EspLabel::SendGrid);
//! assert_eq!(
//!     summary.servers.hosts(),
//!     ["o1.sendgrid.net", "mx.example.net", "mail.example.com"]
//! );
//! println!("{}", summary.to_json());
//! ```

mod config;
mod error;
mod esp;
mod mailbox;
mod relay;
mod segment;
mod summary;
mod types;

pub use config::ServiceConfig;
pub use error::{Result, RetrievalError};
pub use esp::{EspLabel, RULES, Rule, Signal, classify_esp, dkim_domain};
pub use mailbox::{
    ConnectionState, FetchedMessage, HeaderService, MemoryMailbox, MessageSource, Session,
};
pub use relay::{Hop, build_relay_path, normalize_host, relay_path};
pub use segment::{HeaderField, TraceBlock, header_field, trace_blocks, unfolded_field};
pub use summary::{EmailHeaderSummary, header_block, summarize_headers, summarize_message};
pub use types::RelayPath;
