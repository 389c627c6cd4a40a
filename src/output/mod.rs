//! Output of the finished member list
//!
//! Console rendering (table, JSON, YAML) and the structured output file.

mod file;
mod table;

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::slack::Member;

pub use file::{validate_outfile, write_members_file};
pub use table::members_table;

/// Serialize members as a document in the given structured format
///
/// `Table` has no document form and falls back to JSON.
pub fn render_document(members: &[Member], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => Ok(serde_yml::to_string(members)?),
        OutputFormat::Json | OutputFormat::Table => Ok(serde_json::to_string_pretty(members)?),
    }
}

/// Print members to stdout in the requested format
pub fn output_members(members: &[Member], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", members_table(members)),
        OutputFormat::Json | OutputFormat::Yaml => {
            println!("{}", render_document(members, format)?.trim_end())
        }
    }
    Ok(())
}
