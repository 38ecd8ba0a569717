use crate::config::LanguageCode;
use crate::translate::{TranslateError, Translation, Translator};
use futures::future::BoxFuture;
use futures::FutureExt;

/// Offline stand-in that hands the input back unchanged.
#[derive(Clone, Debug, Default)]
pub struct EchoTranslator;

impl EchoTranslator {
    pub fn new() -> Self {
        Self
    }
}

impl Translator for EchoTranslator {
    fn translate(
        &self,
        text: String,
        target: LanguageCode,
    ) -> BoxFuture<'_, Result<Translation, TranslateError>> {
        async move {
            tracing::debug!(target_lang = %target, "echo translation");
            Ok(Translation {
                text,
                detected_source_lang: None,
            })
        }
        .boxed()
    }
}
