use claims::assert_ok;
use quick_translate_core::config::ApiKey;
use quick_translate_core::translate::{DeepLTranslator, GoogleTranslator};
use quick_translate_core::{
    LanguageCatalog, LanguageCode, RequestValidator, ServiceError, TranslateError,
    TranslationService, Translator,
};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn code(s: &str) -> LanguageCode {
    LanguageCode::new(s).expect("non-empty")
}

#[tokio::test]
async fn google_joins_sentences_and_reports_source() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/translate_a/single"))
        .and(query_param("client", "at"))
        .and(body_string_contains("sl=auto"))
        .and(body_string_contains("tl=es"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sentences": [
                {"trans": "Hola, ", "orig": "Hello, "},
                {"trans": "¿cómo estás?", "orig": "how are you?"},
                {"translit": "ola"}
            ],
            "src": "en"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let translator = GoogleTranslator::new().with_base_url(server.uri());
    let out = translator
        .translate("Hello, how are you?".to_owned(), code("es"))
        .await
        .expect("translation");

    assert_eq!(out.text, "Hola, ¿cómo estás?");
    assert_eq!(out.detected_source_lang.as_deref(), Some("en"));
}

#[tokio::test]
async fn google_rate_limit_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let translator = GoogleTranslator::new().with_base_url(server.uri());
    let err = translator
        .translate("Hello".to_owned(), code("fr"))
        .await
        .unwrap_err();
    assert!(matches!(err, TranslateError::RateLimited));
}

#[tokio::test]
async fn google_server_error_carries_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let translator = GoogleTranslator::new().with_base_url(server.uri());
    let err = translator
        .translate("Hello".to_owned(), code("de"))
        .await
        .unwrap_err();
    match err {
        TranslateError::Api { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "unavailable");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn google_empty_payload_is_invalid() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"sentences": []})))
        .mount(&server)
        .await;

    let translator = GoogleTranslator::new().with_base_url(server.uri());
    let err = translator
        .translate("Hello".to_owned(), code("ja"))
        .await
        .unwrap_err();
    assert!(matches!(err, TranslateError::InvalidResponse(_)));
}

#[tokio::test]
async fn deepl_sends_auth_header_and_upper_case_target() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/translate"))
        .and(header("Authorization", "DeepL-Auth-Key test-key:fx"))
        .and(body_string_contains("\"target_lang\":\"FR\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "translations": [
                {"detected_source_language": "EN", "text": "Bonjour"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let key = ApiKey::new("test-key:fx").expect("non-empty");
    let translator = DeepLTranslator::new(key).with_base_url(server.uri());
    let out = translator
        .translate("Hello".to_owned(), code("fr"))
        .await
        .expect("translation");

    assert_eq!(out.text, "Bonjour");
    assert_eq!(out.detected_source_lang.as_deref(), Some("EN"));
}

#[tokio::test]
async fn deepl_forbidden_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
        .mount(&server)
        .await;

    let key = ApiKey::new("bad-key").expect("non-empty");
    let translator = DeepLTranslator::new(key).with_base_url(server.uri());
    let err = translator
        .translate("Hello".to_owned(), code("de"))
        .await
        .unwrap_err();
    assert!(matches!(err, TranslateError::Api { status: 403, .. }));
}

#[tokio::test]
async fn service_does_not_hit_provider_for_invalid_input() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sentences": [{"trans": "Hallo"}],
            "src": "en"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = TranslationService::new(
        RequestValidator::new(LanguageCatalog::default()),
        GoogleTranslator::new().with_base_url(server.uri()),
    );

    let err = service.translate("Hello", "Klingon").await.unwrap_err();
    assert!(err.is_user_error());
    let err = service.translate(&"a".repeat(5001), "German").await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    assert_ok!(service.translate("Hello", "German").await);
}

#[tokio::test]
async fn boxed_translator_is_usable_by_service() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sentences": [{"trans": "こんにちは"}]
        })))
        .mount(&server)
        .await;

    let translator: Box<dyn Translator> =
        Box::new(GoogleTranslator::new().with_base_url(server.uri()));
    let service =
        TranslationService::new(RequestValidator::new(LanguageCatalog::default()), translator);

    let out = service.translate("Hello", "Japanese").await.expect("ok");
    assert_eq!(out.text, "こんにちは");
    assert_eq!(out.detected_source_lang, None);
}
