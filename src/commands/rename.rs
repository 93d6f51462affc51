use crate::commands::context::CommandContext;
use crate::commands::ls::print_updated_listing;
use crate::core::{config::ConfigOverrides, error::Result, print_success};

pub async fn execute_mv(
    overrides: ConfigOverrides,
    path: String,
    old_name: String,
    new_name: String,
) -> Result<()> {
    let context = CommandContext::initialize(overrides, Some(&path)).await?;
    let message = context.explorer.rename_file(&old_name, &new_name).await?;

    print_success(&message);
    print_updated_listing(&context.explorer.listing());
    Ok(())
}
