//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ContextError;

/// Map domain errors to a string for CLI output, with a hint where one helps.
pub fn map_error(e: &ContextError) -> String {
    match e {
        ContextError::UnknownContext(_) => {
            format!("{}. Run `dashboard-contexts list` to see available contexts.", e)
        }
        ContextError::InvalidEndpointType(_) => format!(
            "{}. Valid endpoint types are publicURL, internalURL and adminURL.",
            e
        ),
        _ => e.to_string(),
    }
}
