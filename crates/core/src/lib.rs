#![deny(warnings)]

pub mod catalog;
pub mod config;
pub mod service;
pub mod translate;
pub mod validate;

pub use catalog::LanguageCatalog;
pub use config::{load_config, AppConfig, ConfigError, LanguageCode};
pub use service::{ServiceError, TranslationService};
pub use translate::{Translation, TranslateError, Translator};
pub use validate::{RequestValidator, TranslationRequest, ValidatedRequest, ValidationError};
