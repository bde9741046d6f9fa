use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use suggestions_search::config::{WidgetConfig, WidgetOptions};
use suggestions_search::core::markup::FormatKind;
use suggestions_search::error::{ConfigError, LookupError};
use suggestions_search::logging;
use suggestions_search::lookup::{HttpTransport, LocalTransport, LookupExecutor, LookupTransport};
use suggestions_search::runtime::{RunOutcome, Runtime, Session};
use suggestions_search::terminal::Terminal;
use suggestions_search::widget::{Form, InputElement, SuggestionSearch};
use thiserror::Error;
use tracing::info;

/// Search-as-you-type prompt. Prints the submitted value on stdout.
#[derive(Debug, Parser)]
#[command(name = "suggest", version, about)]
struct Cli {
    /// YAML or JSON file with widget options.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Suggestion endpoint queried as `URL?q=<text>`.
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,
    /// Suggest from a local word list (one per line) instead of an endpoint.
    #[arg(long, value_name = "FILE")]
    words: Option<PathBuf>,
    /// Lookups start once the text is longer than this many characters.
    #[arg(long, value_name = "N")]
    min_length: Option<usize>,
    #[arg(long, value_name = "N")]
    debounce_ms: Option<u64>,
    #[arg(long, value_parser = parse_format)]
    format: Option<FormatKind>,
    /// Maximum local matches per lookup.
    #[arg(long, value_name = "N", default_value_t = 10)]
    limit: usize,
    #[arg(long, default_value = "Search: ")]
    prompt: String,
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn options(&self) -> WidgetOptions {
        WidgetOptions {
            min_string_length: self.min_length,
            debounce_rate_ms: self.debounce_ms,
            endpoint: self.endpoint.clone(),
            format: self.format,
        }
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to load word list: {0}")]
    Words(#[from] LookupError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

fn parse_format(value: &str) -> Result<FormatKind, String> {
    FormatKind::parse(value).ok_or_else(|| format!("unknown format `{value}` (none, list)"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(RunOutcome::Submitted(value)) => {
            println!("{value}");
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::Cancelled) => ExitCode::from(130),
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<RunOutcome, CliError> {
    logging::init(cli.log_file.as_deref(), cli.verbose)?;

    // An interactive prompt that shows nothing is useless, so the binary
    // lists suggestions unless told otherwise.
    let mut options = WidgetOptions {
        format: Some(FormatKind::List),
        ..WidgetOptions::default()
    };
    if let Some(path) = cli.config.as_deref() {
        options = options.merge(WidgetOptions::load(path)?);
    }
    let options = options.merge(cli.options());
    let config = WidgetConfig::from_options(&options);
    info!(?options, "starting suggest");

    let element = InputElement::new("q")
        .with_class("suggestions-search")
        .with_form(Form::new("search"));

    match cli.words.as_deref() {
        Some(path) => {
            let transport = LocalTransport::from_file(path)?.with_limit(cli.limit);
            run_with(transport, element, config, cli.prompt)
        }
        None => run_with(HttpTransport::new(), element, config, cli.prompt),
    }
}

fn run_with<T: LookupTransport>(
    transport: T,
    element: InputElement,
    config: WidgetConfig,
    prompt: String,
) -> Result<RunOutcome, CliError> {
    let search = SuggestionSearch::new(element, config, LookupExecutor::new(transport));
    let session = Session::new(search).with_prompt(prompt);
    let mut runtime = Runtime::new(session, Terminal::new()?);
    Ok(runtime.run()?)
}
