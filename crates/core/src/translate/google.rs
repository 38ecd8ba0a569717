use crate::config::LanguageCode;
use crate::translate::{check_status, TranslateError, Translation, Translator};
use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

const DEFAULT_BASE_URL: &str = "https://translate.google.com";
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Client for the public Google Translate web endpoint.
#[derive(Clone)]
pub struct GoogleTranslator {
    client: Client,
    base_url: String,
}

impl GoogleTranslator {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, TranslateError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self) -> Result<Url, TranslateError> {
        let url = Url::parse_with_params(
            &format!("{}/translate_a/single", self.base_url.trim_end_matches('/')),
            &[("client", "at"), ("dt", "t"), ("dj", "1")],
        )?;
        Ok(url)
    }
}

impl Default for GoogleTranslator {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
struct GoogleResponse {
    #[serde(default)]
    sentences: Vec<GoogleSentence>,
    src: Option<String>,
}

#[derive(Deserialize)]
struct GoogleSentence {
    // transliteration-only fragments carry no `trans`
    trans: Option<String>,
}

impl Translator for GoogleTranslator {
    fn translate(
        &self,
        text: String,
        target: LanguageCode,
    ) -> BoxFuture<'_, Result<Translation, TranslateError>> {
        async move {
            let url = self.endpoint()?;
            tracing::debug!(
                provider = "google",
                target_lang = %target,
                chars = text.chars().count(),
                "sending translation request"
            );

            let params = [("sl", "auto"), ("tl", target.as_str()), ("q", text.as_str())];
            let response = self
                .client
                .post(url)
                .header("User-Agent", USER_AGENT)
                .form(&params)
                .send()
                .await?;
            let response = check_status(response).await?;

            let body: GoogleResponse = response.json().await.map_err(|e| {
                TranslateError::InvalidResponse(format!("Failed to parse JSON: {}", e))
            })?;

            let translated: String = body
                .sentences
                .into_iter()
                .filter_map(|s| s.trans)
                .collect();
            if translated.is_empty() {
                return Err(TranslateError::InvalidResponse(
                    "No translations in response".to_string(),
                ));
            }

            Ok(Translation {
                text: translated,
                detected_source_lang: body.src,
            })
        }
        .boxed()
    }
}
