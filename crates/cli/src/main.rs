#![deny(warnings)]

use anyhow::Context;
use clap::{Parser, ValueEnum};
use colored::Colorize;
use quick_translate_core::config::{
    load_config, resolve_api_key, resolve_config_path, ApiKey, StdEnv, UiSettings,
    ENV_DEEPL_API_KEY,
};
use quick_translate_core::translate::{DeepLTranslator, EchoTranslator, GoogleTranslator};
use quick_translate_core::{RequestValidator, ServiceError, TranslationService, Translator};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Provider {
    Google,
    Deepl,
    Echo,
}

#[derive(Parser, Debug)]
#[command(name = "quick-translate")]
#[command(about = "Translate text into a target language via a web translation service")]
struct Args {
    /// Text to translate. Starts an interactive prompt when omitted.
    text: Option<String>,

    /// Target language display name, e.g. "Spanish".
    #[arg(long)]
    lang: Option<String>,

    #[arg(long, value_enum, default_value_t = Provider::Google)]
    provider: Provider,

    /// Config file. Falls back to $QUICK_TRANSLATE_CONFIG, then ./config.json.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    deepl_api_key: Option<String>,

    #[arg(
        long,
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout_secs: u64,

    /// Print the configured languages and exit.
    #[arg(long)]
    list_languages: bool,

    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    let env = StdEnv;
    let config_path = resolve_config_path(args.config.clone(), &env);
    let cfg = load_config(&config_path)
        .with_context(|| format!("failed to load config {}", config_path.display()))?;

    tracing::info!(
        path = %config_path.display(),
        languages = cfg.catalog.len(),
        provider = ?args.provider,
        "config loaded"
    );

    if args.list_languages {
        for (name, code) in cfg.catalog.iter() {
            println!("{name}\t{code}");
        }
        return Ok(());
    }

    let timeout = Duration::from_secs(args.timeout_secs);
    let deepl_key = resolve_api_key(args.deepl_api_key.clone(), ENV_DEEPL_API_KEY, &env)?;
    let translator = build_translator(args.provider, deepl_key, timeout)?;

    let language = match args.lang.clone() {
        Some(lang) => lang,
        None => cfg
            .catalog
            .first()
            .context("no languages configured")?
            .to_owned(),
    };

    let service = TranslationService::new(RequestValidator::new(cfg.catalog), translator)
        .with_timeout(timeout);

    match args.text {
        Some(text) => {
            let translation = service.translate(&text, &language).await?;
            println!("{}", translation.text.color(cfg.ui.colors.success.as_str()));
            Ok(())
        }
        None => run_interactive(&service, &cfg.ui, language).await,
    }
}

fn build_translator(
    provider: Provider,
    deepl_key: Option<ApiKey>,
    timeout: Duration,
) -> anyhow::Result<Box<dyn Translator>> {
    let translator: Box<dyn Translator> = match provider {
        Provider::Google => Box::new(GoogleTranslator::with_timeout(timeout)?),
        Provider::Deepl => {
            let translator = DeepLTranslator::from_key(deepl_key, timeout).with_context(|| {
                format!("DeepL API key is required (--deepl-api-key or {ENV_DEEPL_API_KEY})")
            })?;
            Box::new(translator)
        }
        Provider::Echo => Box::new(EchoTranslator::new()),
    };
    Ok(translator)
}

enum Command<'a> {
    Quit,
    ListLanguages,
    SetLanguage(&'a str),
    Translate(&'a str),
}

/// Commands are matched on the trimmed line; anything else is translated as
/// typed. A leading `::` escapes one `:` so command-like text can be sent.
fn parse_command(line: &str) -> Command<'_> {
    if line.starts_with("::") {
        return Command::Translate(&line[1..]);
    }
    let trimmed = line.trim();
    match trimmed {
        ":q" | ":quit" => Command::Quit,
        ":langs" => Command::ListLanguages,
        _ => match trimmed.strip_prefix(":lang ") {
            Some(name) => Command::SetLanguage(name.trim()),
            None => Command::Translate(line),
        },
    }
}

async fn run_interactive<T: Translator>(
    service: &TranslationService<T>,
    ui: &UiSettings,
    mut language: String,
) -> anyhow::Result<()> {
    let catalog = service.validator().catalog();
    if !catalog.is_valid_language(&language) {
        anyhow::bail!("unsupported language: {language}");
    }

    println!("{}", ui.title.bold());
    println!("Languages: {}", catalog.languages().join(", "));
    println!("Commands: :lang <name>, :langs, :quit (prefix text with :: to send a leading ':')");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", format!("[{language}] >").color(ui.colors.prompt.as_str()));
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            return Ok(());
        };

        match parse_command(&line) {
            Command::Quit => return Ok(()),
            Command::ListLanguages => {
                for (name, code) in catalog.iter() {
                    println!("  {name} ({code})");
                }
            }
            Command::SetLanguage(name) => {
                if catalog.is_valid_language(name) {
                    language = name.to_owned();
                } else {
                    println!(
                        "{}",
                        format!("Error: unsupported language: {name}")
                            .color(ui.colors.error.as_str())
                    );
                }
            }
            Command::Translate(text) => match service.translate(text, &language).await {
                Ok(translation) => {
                    println!("{}", translation.text.color(ui.colors.success.as_str()));
                }
                Err(e) => report_error(&e, ui),
            },
        }
    }
}

fn report_error(err: &ServiceError, ui: &UiSettings) {
    if err.is_user_error() {
        println!("{}", format!("Error: {err}").color(ui.colors.error.as_str()));
    } else {
        tracing::warn!(error = %err, "translation failed");
        println!(
            "{}",
            "Error: Could not translate".color(ui.colors.error.as_str())
        );
    }
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(
            level
                .parse()
                .with_context(|| format!("invalid --log-level: {level}"))?,
        )
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quick_translate_core::config::MapEnv;

    #[test]
    fn commands_are_recognised() {
        assert!(matches!(parse_command(":quit"), Command::Quit));
        assert!(matches!(parse_command(":q"), Command::Quit));
        assert!(matches!(parse_command(":langs"), Command::ListLanguages));
        assert!(matches!(
            parse_command(":lang  French "),
            Command::SetLanguage("French")
        ));
    }

    #[test]
    fn plain_lines_are_translated_verbatim() {
        assert!(matches!(
            parse_command("Hello, how are you?"),
            Command::Translate("Hello, how are you?")
        ));
        assert!(matches!(parse_command(""), Command::Translate("")));
    }

    #[test]
    fn whitespace_is_passed_through_untouched() {
        assert!(matches!(parse_command("   "), Command::Translate("   ")));
        assert!(matches!(
            parse_command("Hello   "),
            Command::Translate("Hello   ")
        ));
        assert!(matches!(parse_command("  :quit  "), Command::Quit));
    }

    #[test]
    fn double_colon_escapes_commands() {
        assert!(matches!(
            parse_command("::lang is a command"),
            Command::Translate(":lang is a command")
        ));
        assert!(matches!(parse_command("::quit"), Command::Translate(":quit")));
    }

    #[test]
    fn deepl_without_key_is_rejected() {
        let err = build_translator(Provider::Deepl, None, Duration::from_secs(1))
            .err()
            .expect("missing key");
        assert!(err.to_string().contains(ENV_DEEPL_API_KEY));
    }

    #[test]
    fn args_parse_defaults() {
        let args = Args::try_parse_from(["quick-translate", "Hello"]).expect("valid args");
        assert_eq!(args.text.as_deref(), Some("Hello"));
        assert_eq!(args.provider, Provider::Google);
        assert_eq!(args.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(!args.list_languages);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert!(Args::try_parse_from(["quick-translate", "--timeout-secs", "0", "Hi"]).is_err());
        let args = Args::try_parse_from(["quick-translate", "--timeout-secs", "3", "Hi"])
            .expect("valid args");
        assert_eq!(args.timeout_secs, 3);
    }

    #[test]
    fn deepl_key_reaches_provider_selection() {
        let args = Args::try_parse_from([
            "quick-translate",
            "--provider",
            "deepl",
            "--deepl-api-key",
            "cli-key:fx",
        ])
        .expect("valid args");
        let env = MapEnv::default().with_var(ENV_DEEPL_API_KEY, "env-key");
        let key = resolve_api_key(args.deepl_api_key, ENV_DEEPL_API_KEY, &env)
            .expect("valid key")
            .expect("present");
        assert_eq!(key.expose(), "cli-key:fx");
        assert!(build_translator(args.provider, Some(key), Duration::from_secs(1)).is_ok());
    }
}
