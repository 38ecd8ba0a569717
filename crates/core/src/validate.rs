use crate::catalog::LanguageCatalog;
use crate::config::LanguageCode;
use serde::{Deserialize, Serialize};

/// Upper bound on input length, counted in characters.
pub const MAX_TEXT_CHARS: usize = 5000;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("text cannot be empty")]
    EmptyInput,
    #[error("text exceeds maximum length ({chars} > {max} chars)")]
    LengthExceeded { chars: usize, max: usize },
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
}

/// Raw input as gathered from the user.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub target_language: String,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, target_language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target_language: target_language.into(),
        }
    }
}

/// A request that passed validation, with the provider code resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub text: String,
    pub language: String,
    pub code: LanguageCode,
}

pub fn validate_text(text: &str) -> Result<(), ValidationError> {
    if text.is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    let chars = text.chars().count();
    if chars > MAX_TEXT_CHARS {
        return Err(ValidationError::LengthExceeded {
            chars,
            max: MAX_TEXT_CHARS,
        });
    }
    Ok(())
}

#[derive(Clone, Debug)]
pub struct RequestValidator {
    catalog: LanguageCatalog,
}

impl RequestValidator {
    pub fn new(catalog: LanguageCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &LanguageCatalog {
        &self.catalog
    }

    pub fn validate_text(&self, text: &str) -> Result<(), ValidationError> {
        validate_text(text)
    }

    /// Text is checked before the language, so an empty request for an
    /// unknown language reports the text error.
    pub fn validate_request(
        &self,
        text: &str,
        language: &str,
    ) -> Result<ValidatedRequest, ValidationError> {
        validate_text(text)?;
        let code = self
            .catalog
            .language_code(language)
            .ok_or_else(|| ValidationError::UnsupportedLanguage(language.to_owned()))?;
        Ok(ValidatedRequest {
            text: text.to_owned(),
            language: language.to_owned(),
            code: code.clone(),
        })
    }

    pub fn validate(
        &self,
        request: &TranslationRequest,
    ) -> Result<ValidatedRequest, ValidationError> {
        self.validate_request(&request.text, &request.target_language)
    }
}
