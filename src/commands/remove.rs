use crate::commands::context::CommandContext;
use crate::commands::ls::print_updated_listing;
use crate::core::{config::ConfigOverrides, error::Result, print_success};

/// Stop tracking a committed file; the file stays on disk.
pub async fn execute_untrack(overrides: ConfigOverrides, path: String, name: String) -> Result<()> {
    let context = CommandContext::initialize(overrides, Some(&path)).await?;
    let message = context.explorer.untrack_file(&name).await?;

    print_success(&message);
    print_updated_listing(&context.explorer.listing());
    Ok(())
}

/// Delete a committed file and record the removal.
pub async fn execute_rm(overrides: ConfigOverrides, path: String, name: String) -> Result<()> {
    let context = CommandContext::initialize(overrides, Some(&path)).await?;
    let message = context.explorer.delete_file(&name).await?;

    print_success(&message);
    print_updated_listing(&context.explorer.listing());
    Ok(())
}
