use crate::translate::{TranslateError, Translation, Translator};
use crate::validate::{RequestValidator, ValidationError};
use std::time::Duration;

#[derive(thiserror::Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("translation failed: {0}")]
    Provider(#[from] TranslateError),
    #[error("translation timed out after {0:?}")]
    Timeout(Duration),
}

impl ServiceError {
    /// Validation errors are the user's to fix; everything else may succeed
    /// on a later attempt.
    pub fn is_user_error(&self) -> bool {
        matches!(self, ServiceError::Validation(_))
    }
}

/// Validates a request, then hands it to the translator exactly once.
pub struct TranslationService<T> {
    validator: RequestValidator,
    translator: T,
    timeout: Option<Duration>,
}

impl<T: Translator> TranslationService<T> {
    pub fn new(validator: RequestValidator, translator: T) -> Self {
        Self {
            validator,
            translator,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn validator(&self) -> &RequestValidator {
        &self.validator
    }

    pub async fn translate(
        &self,
        text: &str,
        language: &str,
    ) -> Result<Translation, ServiceError> {
        let request = self.validator.validate_request(text, language)?;
        tracing::info!(
            language = %request.language,
            code = %request.code,
            chars = request.text.chars().count(),
            "translating"
        );

        let call = self.translator.translate(request.text, request.code);
        let translation = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| ServiceError::Timeout(limit))??,
            None => call.await?,
        };

        tracing::debug!(
            detected_source_lang = translation.detected_source_lang.as_deref(),
            "translation complete"
        );
        Ok(translation)
    }
}
