use std::fmt;

use serde::{Deserialize, Serialize};

/// The two languages the page is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ru,
    Kz,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Ru, Language::Kz];

    /// Lowercase code used in attribute names and configuration.
    pub fn code(self) -> &'static str {
        match self {
            Language::Ru => "ru",
            Language::Kz => "kz",
        }
    }

    /// Attribute carrying this language's text, e.g. `data-ru`.
    pub fn attribute(self) -> &'static str {
        match self {
            Language::Ru => "data-ru",
            Language::Kz => "data-kz",
        }
    }

    /// Text shown on the toggle button while this language is active.
    pub fn label(self) -> &'static str {
        match self {
            Language::Ru => "RU",
            Language::Kz => "KZ",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Language::Ru => Language::Kz,
            Language::Kz => Language::Ru,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_twice_is_identity() {
        for lang in Language::ALL {
            assert_eq!(lang.toggled().toggled(), lang);
            assert_ne!(lang.toggled(), lang);
        }
    }

    #[test]
    fn label_is_uppercase_code() {
        for lang in Language::ALL {
            assert_eq!(lang.label(), lang.code().to_uppercase());
            assert!(lang.attribute().ends_with(lang.code()));
        }
    }

    #[test]
    fn deserializes_from_code() {
        let lang: Language = serde_json::from_str("\"kz\"").unwrap();
        assert_eq!(lang, Language::Kz);
    }
}
