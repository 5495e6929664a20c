//! Stylesheet Pruner
//!
//! Works on raw bytes so that stylesheets which are not valid UTF-8 pass
//! through untouched outside the removed rules.

use std::sync::LazyLock;

use log::debug;
use regex::bytes::{Captures, Regex};

use crate::{config::ICON_PREFIX, usage::UsageSet};

/// One icon's `:before` / `::before` rule. The body matches any byte but `}`.
static ICON_RULE: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r"\.{}([A-Za-z0-9_-]+)::?before\s*\{{(?-u:[^}}])+\}}",
        regex::escape(ICON_PREFIX)
    );
    Regex::new(&pattern).expect("valid icon rule pattern")
});

/// A stylesheet with unused icon rules removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pruned {
    pub text: Vec<u8>,
    pub kept: usize,
    pub removed: usize,
}

impl Pruned {
    /// Whether any rule was removed.
    pub fn changed(&self) -> bool {
        self.removed > 0
    }
}

/// Deletes every icon rule whose identifier is not in `used`.
///
/// All bytes outside removed rules are preserved.
pub fn prune(stylesheet: &[u8], used: &UsageSet) -> Pruned {
    let mut kept = 0;
    let mut removed = 0;

    let text = ICON_RULE
        .replace_all(stylesheet, |captures: &Captures| {
            // The identifier charset is ASCII
            let identifier = std::str::from_utf8(&captures[1]).unwrap_or_default();
            if used.contains(identifier) {
                kept += 1;
                captures[0].to_vec()
            } else {
                debug!("Removing rule for '{identifier}'");
                removed += 1;
                Vec::new()
            }
        })
        .into_owned();

    Pruned { text, kept, removed }
}
