/// Case-insensitive substring filter over provider and case names.
///
/// An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameFilter {
    needle: String,
}

impl NameFilter {
    pub fn new(text: &str) -> Self {
        Self {
            needle: text.trim().to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches(&self, name: &str) -> bool {
        self.is_empty() || name.to_lowercase().contains(&self.needle)
    }

    /// A case is selected when either its own name or its provider's name matches.
    pub fn matches_case(&self, provider: &str, case: &str) -> bool {
        self.matches(provider) || self.matches(case)
    }
}

impl From<Option<&str>> for NameFilter {
    fn from(text: Option<&str>) -> Self {
        text.map(NameFilter::new).unwrap_or_default()
    }
}
