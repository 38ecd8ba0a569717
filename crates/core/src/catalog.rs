//! Display-name to provider-code mapping.

use crate::config::{ConfigError, LanguageCode};

const DEFAULT_LANGUAGES: [(&str, &str); 4] = [
    ("Spanish", "es"),
    ("French", "fr"),
    ("German", "de"),
    ("Japanese", "ja"),
];

/// Ordered, immutable set of supported target languages.
///
/// Entries keep the order they were supplied in. Supplying the same display
/// name twice keeps the first position and the last code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguageCatalog {
    entries: Vec<(String, LanguageCode)>,
}

impl LanguageCatalog {
    pub fn from_entries<I, N, C>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (N, C)>,
        N: Into<String>,
        C: Into<String>,
    {
        let mut out: Vec<(String, LanguageCode)> = Vec::new();
        for (name, code) in entries {
            let name = name.into();
            let code = LanguageCode::new(code)?;
            match out.iter_mut().find(|(n, _)| *n == name) {
                Some(existing) => existing.1 = code,
                None => out.push((name, code)),
            }
        }
        Ok(Self { entries: out })
    }

    /// Display names in catalog order.
    pub fn languages(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn is_valid_language(&self, name: &str) -> bool {
        self.language_code(name).is_some()
    }

    /// Returns `None` for names that are not in the catalog.
    pub fn language_code(&self, name: &str) -> Option<&LanguageCode> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, code)| code)
    }

    pub fn first(&self) -> Option<&str> {
        self.entries.first().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LanguageCode)> {
        self.entries.iter().map(|(n, c)| (n.as_str(), c))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for LanguageCatalog {
    fn default() -> Self {
        Self {
            entries: DEFAULT_LANGUAGES
                .iter()
                .map(|(name, code)| ((*name).to_owned(), LanguageCode(code.to_string())))
                .collect(),
        }
    }
}
