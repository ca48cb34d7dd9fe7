//! Implementation of `askq --spec`
//!
//! Loads and validates the spec before any prompt is shown, then asks each
//! question and prints the answers as one JSON object.

#[cfg(unix)]
use std::io::IsTerminal;
use std::path::Path;

use anyhow::Context;
use owo_colors::OwoColorize;
use tracing::{debug, info};

use askq_core::{
    Config, EXIT_CANCELLED, EXIT_ERROR, EXIT_SUCCESS, Formats, Question, SpecError, ask_questions,
    load_questions, load_spec_from_file, load_spec_from_reader,
};

use crate::colors::COLORS;
use crate::interaction::DialoguerPrompter;
#[cfg(unix)]
use crate::interaction::DEFAULT_TTY_DEVICE;
use crate::output::print_json;

/// Options for one `--spec` run
#[derive(Debug, Clone)]
pub struct AskArgs<'a> {
    /// Spec path, or "-" for stdin
    pub spec: &'a str,
    /// Validate only
    pub dry_run: bool,
    /// Indent the answers (`--pretty` or `output.pretty`)
    pub pretty: bool,
    /// Loaded settings
    pub config: &'a Config,
    /// Suppress non-error output
    pub quiet: bool,
}

/// Read a spec from a path or stdin and validate it
pub fn load_spec_questions(spec: &str, formats: Formats) -> Result<Vec<Question>, SpecError> {
    let doc = if spec == "-" {
        load_spec_from_reader(std::io::stdin().lock(), formats)?
    } else {
        load_spec_from_file(Path::new(spec), formats)?
    };
    load_questions(&doc)
}

/// Run the ask command
pub fn run_ask(args: AskArgs<'_>) -> anyhow::Result<i32> {
    let formats = Formats::detect();
    debug!(?formats, spec = args.spec, "loading spec");

    let questions = load_spec_questions(args.spec, formats)?;

    if args.dry_run {
        if !args.quiet {
            eprintln!(
                "{}",
                format!("Valid spec with {} questions", questions.len()).style(COLORS.success)
            );
        }
        return Ok(EXIT_SUCCESS);
    }

    let prompter = match open_prompter(args.spec, args.config) {
        Ok(prompter) => prompter,
        Err((device, e)) => {
            eprintln!(
                "{} Cannot open {} for interactive input: {}",
                "error:".style(COLORS.fail),
                device,
                e
            );
            eprintln!("askq requires an interactive terminal (TTY) for prompting");
            return Ok(EXIT_ERROR);
        }
    };

    let outcome = ask_questions(&questions, &prompter).context("prompting failed")?;
    info!(
        answered = outcome.answers.len(),
        total = questions.len(),
        cancelled = outcome.cancelled,
        "questionnaire finished"
    );

    print_json(&outcome.answers, args.pretty)?;

    if outcome.cancelled {
        eprintln!("\n{}", "Cancelled by user".style(COLORS.warning));
        return Ok(EXIT_CANCELLED);
    }
    Ok(EXIT_SUCCESS)
}

/// A terminal device that could not be opened, with the reason
type DeviceError = (String, std::io::Error);

/// Whether prompts must be drawn on a terminal device instead of stderr
///
/// That is the case when stdin carries the spec or is not a terminal, or
/// when stderr is redirected.
pub fn needs_device(spec: &str, stdin_is_tty: bool, stderr_is_tty: bool) -> bool {
    spec == "-" || !stdin_is_tty || !stderr_is_tty
}

#[cfg(unix)]
fn open_prompter(spec: &str, config: &Config) -> Result<DialoguerPrompter, DeviceError> {
    let use_device = needs_device(
        spec,
        std::io::stdin().is_terminal(),
        std::io::stderr().is_terminal(),
    );
    if !use_device {
        return Ok(DialoguerPrompter::new());
    }
    let device = config
        .prompt
        .tty_device
        .as_deref()
        .unwrap_or(DEFAULT_TTY_DEVICE);
    DialoguerPrompter::on_device(device).map_err(|e| (device.to_string(), e))
}

/// Without terminal devices, prompts always go to stderr
#[cfg(not(unix))]
fn open_prompter(_spec: &str, _config: &Config) -> Result<DialoguerPrompter, DeviceError> {
    Ok(DialoguerPrompter::new())
}
