mod deepl;
mod echo;
mod google;

use crate::config::LanguageCode;
use futures::future::BoxFuture;
use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize};

pub use deepl::DeepLTranslator;
pub use echo::EchoTranslator;
pub use google::GoogleTranslator;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    pub detected_source_lang: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum TranslateError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("invalid provider url: {0}")]
    Url(#[from] url::ParseError),
    #[error("rate limited by provider")]
    RateLimited,
    #[error("provider returned HTTP {status}: {body}")]
    Api { status: u16, body: String },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("provider requires an api key")]
    MissingApiKey,
}

/// A translation provider. The source language is always auto-detected.
pub trait Translator: Send + Sync {
    fn translate(
        &self,
        text: String,
        target: LanguageCode,
    ) -> BoxFuture<'_, Result<Translation, TranslateError>>;
}

impl<T: Translator + ?Sized> Translator for Box<T> {
    fn translate(
        &self,
        text: String,
        target: LanguageCode,
    ) -> BoxFuture<'_, Result<Translation, TranslateError>> {
        (**self).translate(text, target)
    }
}

async fn check_status(response: Response) -> Result<Response, TranslateError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(TranslateError::RateLimited);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(TranslateError::Api {
        status: status.as_u16(),
        body,
    })
}
