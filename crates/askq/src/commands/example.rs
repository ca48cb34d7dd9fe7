//! Implementation of `askq --example`

use askq_core::{EXIT_SUCCESS, example_spec, example_yaml};

use crate::cli::ExampleFormat;
use crate::output::print_json;

/// Print an example spec in the requested format
///
/// The YAML example is hand-written so it can carry comments; `--pretty`
/// only affects the JSON form.
pub fn run_example(format: ExampleFormat, pretty: bool) -> anyhow::Result<i32> {
    match format {
        ExampleFormat::Yaml => print!("{}", example_yaml()),
        ExampleFormat::Json => print_json(&example_spec(), pretty)?,
    }
    Ok(EXIT_SUCCESS)
}
