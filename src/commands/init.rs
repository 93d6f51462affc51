use crate::commands::context::CommandContext;
use crate::commands::ls::print_updated_listing;
use crate::core::{config::ConfigOverrides, error::Result, print_success};

/// Turn a plain directory into a repository.
pub async fn execute_init(overrides: ConfigOverrides, path: String) -> Result<()> {
    let context = CommandContext::initialize(overrides, Some(&path)).await?;
    let message = context.explorer.init_repository().await?;

    print_success(&message);
    print_updated_listing(&context.explorer.listing());
    Ok(())
}
