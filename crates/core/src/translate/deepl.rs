use crate::config::{ApiKey, LanguageCode};
use crate::translate::{check_status, TranslateError, Translation, Translator};
use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const FREE_BASE_URL: &str = "https://api-free.deepl.com";
const PRO_BASE_URL: &str = "https://api.deepl.com";

#[derive(Clone)]
pub struct DeepLTranslator {
    client: Client,
    api_key: ApiKey,
    base_url: Option<String>,
}

impl DeepLTranslator {
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: None,
        }
    }

    pub fn with_timeout(api_key: ApiKey, timeout: Duration) -> Result<Self, TranslateError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key,
            base_url: None,
        })
    }

    /// Like [`DeepLTranslator::with_timeout`], for a key that may not have
    /// been configured.
    pub fn from_key(api_key: Option<ApiKey>, timeout: Duration) -> Result<Self, TranslateError> {
        let api_key = api_key.ok_or(TranslateError::MissingApiKey)?;
        Self::with_timeout(api_key, timeout)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    fn endpoint(&self) -> String {
        let base = match &self.base_url {
            Some(base) => base.as_str(),
            None if self.api_key.expose().ends_with(":fx") => FREE_BASE_URL,
            None => PRO_BASE_URL,
        };
        format!("{}/v2/translate", base.trim_end_matches('/'))
    }
}

/// DeepL wants upper-case codes, with a few regional variants spelled out.
fn deepl_target_lang(code: &LanguageCode) -> String {
    match code.as_str().to_lowercase().as_str() {
        "pt-br" => "pt-BR".to_string(),
        "pt-pt" => "pt-PT".to_string(),
        "en-gb" => "en-GB".to_string(),
        "en-us" => "en-US".to_string(),
        _ => code.as_str().to_uppercase(),
    }
}

#[derive(Serialize)]
struct DeepLRequest {
    text: Vec<String>,
    target_lang: String,
}

#[derive(Deserialize)]
struct DeepLResponse {
    translations: Vec<DeepLTranslation>,
}

#[derive(Deserialize)]
struct DeepLTranslation {
    detected_source_language: Option<String>,
    text: String,
}

impl Translator for DeepLTranslator {
    fn translate(
        &self,
        text: String,
        target: LanguageCode,
    ) -> BoxFuture<'_, Result<Translation, TranslateError>> {
        async move {
            let request = DeepLRequest {
                text: vec![text],
                target_lang: deepl_target_lang(&target),
            };
            tracing::debug!(
                provider = "deepl",
                target_lang = %request.target_lang,
                "sending translation request"
            );

            // no source_lang: DeepL detects it
            let response = self
                .client
                .post(self.endpoint())
                .header(
                    "Authorization",
                    format!("DeepL-Auth-Key {}", self.api_key.expose()),
                )
                .json(&request)
                .send()
                .await?;
            let response = check_status(response).await?;

            let deepl_response: DeepLResponse = response.json().await.map_err(|e| {
                TranslateError::InvalidResponse(format!("Failed to parse JSON: {}", e))
            })?;

            let translation = deepl_response
                .translations
                .into_iter()
                .next()
                .ok_or_else(|| {
                    TranslateError::InvalidResponse("No translations in response".to_string())
                })?;

            Ok(Translation {
                text: translation.text,
                detected_source_lang: translation.detected_source_language,
            })
        }
        .boxed()
    }
}
