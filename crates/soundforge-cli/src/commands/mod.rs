//! CLI command implementations

pub mod generate;
pub mod get;
pub mod presets;
pub mod render;
pub mod schema;
pub mod set;
pub mod validate;

mod reporting;
