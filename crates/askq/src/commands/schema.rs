//! Implementation of `askq --schema`

use askq_core::{EXIT_SUCCESS, spec_json_schema};

use crate::output::print_json;

/// Print the JSON Schema for specs
pub fn run_schema(pretty: bool) -> anyhow::Result<i32> {
    print_json(&spec_json_schema(), pretty)?;
    Ok(EXIT_SUCCESS)
}
