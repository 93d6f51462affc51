use crate::commands::context::CommandContext;
use crate::commands::ls::print_updated_listing;
use crate::core::{config::ConfigOverrides, error::Result, print_info, print_success};

/// Commit every entry of `path` that is staged right now.
pub async fn execute_commit(overrides: ConfigOverrides, path: String, message: String) -> Result<()> {
    let context = CommandContext::initialize(overrides, Some(&path)).await?;

    let mut draft = context.explorer.open_commit();
    draft.set_message(message);
    if !draft.staged().is_empty() {
        print_info(&format!("Committing: {}", draft.names().join(", ")));
    }

    let confirmation = context.explorer.submit_commit(&draft).await?;
    print_success(&confirmation);
    print_updated_listing(&context.explorer.listing());
    Ok(())
}
