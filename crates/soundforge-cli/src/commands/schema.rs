//! Schema command implementation

use anyhow::Result;
use soundforge_spec::schema;
use std::process::ExitCode;

use super::reporting::print_json;

/// Prints the schema description (field ranges, enums, defaults) as JSON.
pub fn run(pretty: bool) -> Result<ExitCode> {
    print_json(&schema::describe(), pretty)?;
    Ok(ExitCode::SUCCESS)
}
