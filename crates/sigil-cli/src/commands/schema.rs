use sigil_core::Catalog;

use crate::cli::GlobalFlags;
use crate::output;

/// Handle `sigil schema`.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    output::output(&Catalog::json_schema(), flags.format)
}
