//! askq CLI - Ask questions from a spec file and output answers as JSON

mod cli;
mod colors;
mod commands;
mod interaction;
mod logging;
mod output;

use std::process::ExitCode;

use owo_colors::OwoColorize;

use askq_core::{Config, EXIT_ERROR, SpecError};
use cli::Mode;
use colors::COLORS;
use commands::ask::AskArgs;
use logging::Verbosity;

fn main() -> ExitCode {
    let cli = cli::parse();
    logging::init_subscriber(Verbosity::from_flags(cli.verbose, cli.quiet));

    let result = Config::load(cli.config.as_deref())
        .map_err(anyhow::Error::from)
        .and_then(|config| {
            let pretty = cli.pretty || config.output.pretty;
            match cli.mode() {
                Some(Mode::Schema) => commands::run_schema(pretty),
                Some(Mode::Example(format)) => commands::run_example(format, pretty),
                Some(Mode::Ask { spec, dry_run }) => commands::run_ask(AskArgs {
                    spec: &spec,
                    dry_run,
                    pretty,
                    config: &config,
                    quiet: cli.quiet,
                }),
                None => Err(anyhow::anyhow!(
                    "one of --spec, --schema or --example is required"
                )),
            }
        });

    match result {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            report_error(&e);
            ExitCode::from(EXIT_ERROR as u8)
        }
    }
}

fn report_error(err: &anyhow::Error) {
    match err.downcast_ref::<SpecError>() {
        Some(spec_err) => {
            tracing::debug!(code = spec_err.code(), "spec rejected");
            eprintln!("{} {}", "error:".style(COLORS.fail), spec_err);
        }
        None => eprintln!("{} {:#}", "error:".style(COLORS.fail), err),
    }
}
