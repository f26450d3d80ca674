//! Bilingual text layer.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Supported site languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English (default).
    #[default]
    En,
    /// Simplified Chinese.
    Zh,
}

impl Language {
    /// The other language.
    pub fn toggled(self) -> Self {
        match self {
            Language::En => Language::Zh,
            Language::Zh => Language::En,
        }
    }

    /// Short code, `en` or `zh`.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error for [`Language::from_str`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown language {0:?}, expected \"en\" or \"zh\"")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "zh" => Ok(Language::Zh),
            _ => Err(UnknownLanguage(s.to_string())),
        }
    }
}

/// A string in both languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bilingual {
    /// English text.
    pub en: &'static str,
    /// Chinese text.
    pub zh: &'static str,
}

impl Bilingual {
    /// Text for `lang`.
    pub fn get(&self, lang: Language) -> &'static str {
        match lang {
            Language::En => self.en,
            Language::Zh => self.zh,
        }
    }
}

/// Holds the current language. Read by the typewriters and the preview.
#[derive(Debug, Clone, Default)]
pub struct LanguageStore {
    current: Language,
}

impl LanguageStore {
    /// Store starting in `lang`.
    pub fn new(lang: Language) -> Self {
        Self { current: lang }
    }

    /// Current language.
    pub fn current(&self) -> Language {
        self.current
    }

    /// Switch to the other language and return it.
    pub fn toggle(&mut self) -> Language {
        self.current = self.current.toggled();
        self.current
    }
}
