//! Shared value types

use serde::Serialize;
use std::fmt;

/// Hosts a message passed through, oldest hop first
///
/// Never holds two adjacent identical entries or an empty label. Only the
/// crate can append to it, so the invariant survives once built.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct RelayPath(Vec<String>);

impl RelayPath {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a host unless it is empty or equal to the current last entry
    pub(crate) fn push_unique(&mut self, host: impl Into<String>) {
        let host = host.into();
        if host.is_empty() || self.0.last() == Some(&host) {
            return;
        }
        self.0.push(host);
    }

    #[must_use]
    pub fn hosts(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    /// Host the message entered the chain at
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Final delivery host
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, host: &str) -> bool {
        self.0.iter().any(|h| h == host)
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl<'a> IntoIterator for &'a RelayPath {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for RelayPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" -> "))
    }
}
