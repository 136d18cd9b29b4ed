//! CLI presentation: turn generated contexts into terminal output.

use crate::error::ContextError;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use serde::Serialize;

/// Pretty JSON, the format template renderers consume.
pub fn format_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ContextError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Table of context names and what they provide.
pub fn format_context_list(contexts: &[(&str, &str)]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Context", "Provides"]);
    for (name, description) in contexts {
        table.add_row(vec![*name, *description]);
    }
    table.to_string()
}
