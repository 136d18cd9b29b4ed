//! CLI domain: parse, route, output and presentation only.
//! Generation itself lives in the context module.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{format_context_list, format_json};
pub use route::RunContext;
