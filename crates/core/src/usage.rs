//! Usage Collector
//!
//! Scans generated code for `class="..."` and `className="..."` attribute
//! values and records every icon identifier referenced through them. The
//! collector is owned by the caller so that repeated build passes in one
//! process share a single, growing set.

use std::sync::{Arc, LazyLock};

use indexmap::IndexSet;
use log::{debug, warn};
use regex::Regex;
use stripfont_font_subsetter::NOTDEF_SENTINEL;

use crate::config::ICON_PREFIX;

/// A class attribute, double or single quoted, optionally with escaped
/// quotes as they appear inside JavaScript string literals.
static CLASS_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:class|className)=\\?(?:"([^"]*)"|'([^']*)')"#).expect("valid class pattern")
});

/// Accumulates icon identifiers across scans.
///
/// The `.notdef` sentinel is always the first member.
#[derive(Debug, Clone)]
pub struct UsageCollector {
    identifiers: IndexSet<String>,
}

impl Default for UsageCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl UsageCollector {
    pub fn new() -> Self {
        let mut identifiers = IndexSet::new();
        identifiers.insert(NOTDEF_SENTINEL.to_string());
        Self { identifiers }
    }

    /// Records the identifiers referenced in `text`.
    ///
    /// Returns how many were not seen before.
    pub fn scan(&mut self, text: &str) -> usize {
        let before = self.identifiers.len();

        for captures in CLASS_ATTRIBUTE.captures_iter(text) {
            let Some(value) = captures.get(1).or_else(|| captures.get(2)) else {
                continue;
            };
            for token in value.as_str().split_whitespace() {
                match ClassToken::parse(token) {
                    ClassToken::Icon(identifier) => {
                        if self.identifiers.insert(identifier.to_string()) {
                            debug!("Found icon '{identifier}'");
                        }
                    }
                    ClassToken::Malformed(token) => {
                        warn!("Ignoring icon class '{token}': not a literal icon name");
                    }
                    ClassToken::Other => {}
                }
            }
        }

        self.identifiers.len() - before
    }

    /// Adds identifiers verbatim, e.g. from a whitelist.
    pub fn extend<I, S>(&mut self, identifiers: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for identifier in identifiers {
            self.identifiers.insert(identifier.as_ref().to_string());
        }
    }

    /// Scans every artifact, unions in `whitelist`, and returns a snapshot.
    pub fn collect<'a, I, S>(&mut self, artifacts: I, whitelist: &[S]) -> UsageSet
    where
        I: IntoIterator<Item = &'a str>,
        S: AsRef<str>,
    {
        for artifact in artifacts {
            self.scan(artifact);
        }
        self.extend(whitelist);
        self.snapshot()
    }

    /// An immutable copy of the identifiers collected so far.
    pub fn snapshot(&self) -> UsageSet {
        UsageSet(Arc::new(self.identifiers.clone()))
    }

    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }
}

/// One whitespace-separated token of a class attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClassToken<'a> {
    /// An icon class, with the prefix stripped.
    Icon(&'a str),
    /// A prefixed token whose remainder is outside `[A-Za-z0-9_-]`, such as
    /// an unexpanded template expression.
    Malformed(&'a str),
    /// Not an icon class, or a bare prefix.
    Other,
}

impl<'a> ClassToken<'a> {
    /// A trailing backslash left by an escaped closing quote is ignored.
    fn parse(token: &'a str) -> Self {
        let token = token.trim_end_matches('\\');
        match token.strip_prefix(ICON_PREFIX) {
            None | Some("") => Self::Other,
            Some(identifier)
                if identifier
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-')) =>
            {
                Self::Icon(identifier)
            }
            Some(_) => Self::Malformed(token),
        }
    }
}

/// The identifiers in use, in first-seen order, sentinel first.
#[derive(Debug, Clone)]
pub struct UsageSet(Arc<IndexSet<String>>);

impl UsageSet {
    pub fn contains(&self, identifier: &str) -> bool {
        self.0.contains(identifier)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of identifiers besides the sentinel.
    pub fn icon_count(&self) -> usize {
        self.iter().filter(|id| *id != NOTDEF_SENTINEL).count()
    }
}

impl<'a> IntoIterator for &'a UsageSet {
    type Item = &'a str;
    type IntoIter = Box<dyn Iterator<Item = &'a str> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
