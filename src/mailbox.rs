//! Message retrieval boundary
//!
//! Header analysis only needs header text. This module defines what it
//! expects from a mail store ([`MessageSource`]), keeps the connection state
//! of one shared session explicit, and serializes lookups through it.

use crate::config::ServiceConfig;
use crate::error::{Result, RetrievalError};
use crate::summary::{EmailHeaderSummary, summarize_headers};
use mailparse::MailHeaderMap;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, error, warn};

/// A message as returned by a mail store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedMessage {
    /// Raw header section
    pub headers: String,

    /// Full raw source, when requested
    pub source: Option<Vec<u8>>,
}

/// A mail store that can look messages up by subject
pub trait MessageSource {
    /// Open a session
    fn connect(&mut self) -> Result<()>;

    /// Most recent message in `mailbox` whose subject contains `subject`
    ///
    /// `Ok(None)` means nothing matched; errors are reserved for store or
    /// session failures.
    fn latest_by_subject(
        &mut self,
        mailbox: &str,
        subject: &str,
        include_source: bool,
    ) -> Result<Option<FetchedMessage>>;

    /// Close the session
    fn logout(&mut self) -> Result<()>;
}

/// Lifecycle of a mail session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

/// A message source together with its connection state
///
/// Connects lazily on first use and falls back to
/// [`ConnectionState::Disconnected`] after any failure, so the next call
/// reconnects.
#[derive(Debug)]
pub struct Session<S> {
    source: S,
    state: ConnectionState,
}

impl<S: MessageSource> Session<S> {
    pub const fn new(source: S) -> Self {
        Self {
            source,
            state: ConnectionState::Disconnected,
        }
    }

    #[must_use]
    pub const fn state(&self) -> ConnectionState {
        self.state
    }

    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    pub fn ensure_connected(&mut self) -> Result<()> {
        if self.state == ConnectionState::Connected {
            return Ok(());
        }

        self.state = ConnectionState::Connecting;
        match self.source.connect() {
            Ok(()) => {
                debug!("Mail session connected");
                self.state = ConnectionState::Connected;
                Ok(())
            }
            Err(e) => {
                error!("Mail session connect failed: {e}");
                self.state = ConnectionState::Disconnected;
                Err(e)
            }
        }
    }

    /// Fetch the latest message matching `subject`, connecting first if needed
    pub fn fetch_latest(
        &mut self,
        mailbox: &str,
        subject: &str,
        include_source: bool,
    ) -> Result<Option<FetchedMessage>> {
        self.ensure_connected()?;

        match self.source.latest_by_subject(mailbox, subject, include_source) {
            Ok(message) => Ok(message),
            Err(e) => {
                warn!("Dropping mail session after failed fetch: {e}");
                self.state = ConnectionState::Disconnected;
                Err(e)
            }
        }
    }

    /// Log out if connected; logout failures are only logged
    pub fn close(&mut self) {
        if self.state == ConnectionState::Connected
            && let Err(e) = self.source.logout()
        {
            warn!("Error during logout: {e}");
        }
        self.state = ConnectionState::Disconnected;
    }
}

/// Subject lookups over one shared session
///
/// At most one retrieval runs at a time. The session is closed on drop.
#[derive(Debug)]
pub struct HeaderService<S: MessageSource> {
    session: Mutex<Session<S>>,
    config: ServiceConfig,
}

impl<S: MessageSource> HeaderService<S> {
    pub const fn new(source: S, config: ServiceConfig) -> Self {
        Self {
            session: Mutex::new(Session::new(source)),
            config,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn state(&self) -> Result<ConnectionState> {
        let session = self.session.lock().map_err(|_| RetrievalError::Lock)?;
        Ok(session.state())
    }

    /// Fetch the most recent message whose subject contains `subject`
    pub fn fetch_message(&self, subject: &str) -> Result<Option<FetchedMessage>> {
        let mut session = self.session.lock().map_err(|_| RetrievalError::Lock)?;
        session
            .fetch_latest(&self.config.mailbox, subject, self.config.include_source)
            .inspect_err(|e| error!("Error fetching message for subject {subject:?}: {e}"))
    }

    /// Summarize the most recent message whose subject contains `subject`
    ///
    /// `Ok(None)` when no message matched.
    pub fn summary_for_subject(&self, subject: &str) -> Result<Option<EmailHeaderSummary>> {
        let Some(message) = self.fetch_message(subject)? else {
            debug!("No message found for subject {subject:?}");
            return Ok(None);
        };
        Ok(Some(summarize_headers(&message.headers)))
    }

    pub fn close(&self) -> Result<()> {
        let mut session = self.session.lock().map_err(|_| RetrievalError::Lock)?;
        session.close();
        Ok(())
    }
}

impl<S: MessageSource> Drop for HeaderService<S> {
    fn drop(&mut self) {
        if let Ok(session) = self.session.get_mut() {
            session.close();
        }
    }
}

/// In-process mail store over raw RFC 5322 messages
///
/// Messages keep their append order per mailbox; the last appended match is
/// the most recent.
#[derive(Debug, Clone, Default)]
pub struct MemoryMailbox {
    mailboxes: HashMap<String, Vec<Vec<u8>>>,
    connected: bool,
}

impl MemoryMailbox {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Self::append`]
    #[must_use]
    pub fn with_message(mut self, mailbox: &str, raw: impl Into<Vec<u8>>) -> Self {
        self.append(mailbox, raw);
        self
    }

    pub fn append(&mut self, mailbox: &str, raw: impl Into<Vec<u8>>) {
        self.mailboxes
            .entry(mailbox.to_string())
            .or_default()
            .push(raw.into());
    }

    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.connected
    }
}

impl MessageSource for MemoryMailbox {
    fn connect(&mut self) -> Result<()> {
        self.connected = true;
        Ok(())
    }

    fn latest_by_subject(
        &mut self,
        mailbox: &str,
        subject: &str,
        include_source: bool,
    ) -> Result<Option<FetchedMessage>> {
        if !self.connected {
            return Err(RetrievalError::NotConnected);
        }

        let messages = self
            .mailboxes
            .get(mailbox)
            .ok_or_else(|| RetrievalError::Mailbox(mailbox.to_string()))?;
        let needle = subject.to_lowercase();

        for raw in messages.iter().rev() {
            let (headers, offset) = match mailparse::parse_headers(raw) {
                Ok(parsed) => parsed,
                Err(e) => {
                    warn!("Skipping unparsable message in {mailbox}: {e}");
                    continue;
                }
            };

            let matches = headers
                .get_first_value("Subject")
                .is_some_and(|s| s.to_lowercase().contains(&needle));
            if matches {
                return Ok(Some(FetchedMessage {
                    headers: String::from_utf8_lossy(&raw[..offset]).into_owned(),
                    source: include_source.then(|| raw.clone()),
                }));
            }
        }

        Ok(None)
    }

    fn logout(&mut self) -> Result<()> {
        self.connected = false;
        Ok(())
    }
}
