/// Options for a stripping pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Identifiers kept even if no scanned artifact references them.
    pub whitelist: Vec<String>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_whitelist<I, S>(mut self, identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.whitelist.extend(identifiers.into_iter().map(Into::into));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_whitelist_appends() {
        let options = Options::new().with_whitelist(["house"]).with_whitelist(["x", "bell"]);
        assert_eq!(options.whitelist, ["house", "x", "bell"]);
    }
}
