//! JSON rendering for answers, schema, and examples

use serde::Serialize;

/// Render a value as compact or indented JSON
pub fn render_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

/// Print a value as JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> serde_json::Result<()> {
    println!("{}", render_json(value, pretty)?);
    Ok(())
}
