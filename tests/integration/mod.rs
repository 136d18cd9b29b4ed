//! Integration tests for the dashboard context generators

mod cli_render;
mod identity_regions;
mod ssl_material;
mod test_utils;
