// src/domain/translation.rs
use std::fmt;

pub const SOURCE_LANGUAGE: &str = "en";
pub const TARGET_LANGUAGE: &str = "fr";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationState {
    New,
    InProgress,
    Revised,
    Other(String),
}

impl TranslationState {
    pub fn as_str(&self) -> &str {
        match self {
            Self::New => "new",
            Self::InProgress => "in-progress",
            Self::Revised => "revised",
            Self::Other(value) => value,
        }
    }
}

impl From<&str> for TranslationState {
    fn from(value: &str) -> Self {
        match value {
            "new" => Self::New,
            "in-progress" => Self::InProgress,
            "revised" => Self::Revised,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl fmt::Display for TranslationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Document held by the translation provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationDocument {
    pub id: String,
    pub state: TranslationState,
    pub original_text: Option<String>,
    pub edited_text: Option<String>,
}

impl TranslationDocument {
    pub fn is_revised(&self) -> bool {
        self.state == TranslationState::Revised
    }
}

/// Payload for creating a document at the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTranslationDocument {
    pub name: String,
    pub from_lang: String,
    pub to_lang: String,
    pub original_text: String,
}

impl NewTranslationDocument {
    pub fn new(name: impl Into<String>, original_text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            from_lang: SOURCE_LANGUAGE.into(),
            to_lang: TARGET_LANGUAGE.into(),
            original_text: original_text.into(),
        }
    }
}
