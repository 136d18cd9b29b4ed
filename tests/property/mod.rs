//! Property-based tests for ordering and normalization guarantees

mod endpoint_types;
mod ordering;
