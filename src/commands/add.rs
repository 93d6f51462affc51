use crate::commands::context::CommandContext;
use crate::commands::ls::print_updated_listing;
use crate::core::{config::ConfigOverrides, error::Result, print_success};

/// Stage an untracked or modified file of `path`.
pub async fn execute_add(overrides: ConfigOverrides, path: String, name: String) -> Result<()> {
    let context = CommandContext::initialize(overrides, Some(&path)).await?;
    let message = context.explorer.stage_file(&name).await?;

    print_success(&message);
    print_updated_listing(&context.explorer.listing());
    Ok(())
}
