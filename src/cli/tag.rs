//! Tag CLI commands

use super::CliContext;
use crate::display::format_tag_table;
use crate::error::LedgerResult;

/// List tags with their credit settings
///
/// Tags whose credit settings are unusable are listed and then flagged
/// below the table.
pub fn handle_tags_command(ctx: &CliContext) -> LedgerResult<()> {
    let snapshot = ctx.load_snapshot()?;
    let tags = snapshot.tags();

    print!("{}", format_tag_table(tags, &ctx.settings.currency_symbol));

    let problems: Vec<String> = tags
        .iter()
        .filter_map(|tag| tag.validate().err())
        .map(|e| e.to_string())
        .collect();
    if !problems.is_empty() {
        println!();
        for problem in problems {
            println!("Warning: {}", problem);
        }
    }

    Ok(())
}
