use crate::commands::context::CommandContext;
use crate::commands::ls::print_updated_listing;
use crate::core::{
    actions::Action, config::ConfigOverrides, error::Result, print_success, state::Listing,
    vcs_status::VcsStatus,
};

/// Unstage a staged file, or discard the changes of a modified one.
pub async fn execute_restore(overrides: ConfigOverrides, path: String, name: String) -> Result<()> {
    let context = CommandContext::initialize(overrides, Some(&path)).await?;
    let action = restore_action(&context.explorer.listing(), &name);
    let message = context.explorer.dispatch(action).await?;

    print_success(&message);
    print_updated_listing(&context.explorer.listing());
    Ok(())
}

/// The "Restore" button means unstage for staged files and undo for modified ones.
pub fn restore_action(listing: &Listing, name: &str) -> Action {
    let name = name.to_string();
    match listing.get(&name).map(|e| e.status) {
        Some(VcsStatus::Modified) => Action::UndoModification { name },
        _ => Action::RestoreStaged { name },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::DirectoryEntry;

    #[test]
    fn test_restore_action_depends_on_status() {
        let listing = Listing::from_entries(
            "/repo",
            "/repo",
            vec![
                DirectoryEntry::file("m.txt", VcsStatus::Modified),
                DirectoryEntry::file("s.txt", VcsStatus::Staged),
            ],
        );

        assert_eq!(
            restore_action(&listing, "m.txt"),
            Action::UndoModification { name: "m.txt".to_string() }
        );
        assert_eq!(
            restore_action(&listing, "s.txt"),
            Action::RestoreStaged { name: "s.txt".to_string() }
        );
        assert_eq!(
            restore_action(&listing, "missing.txt"),
            Action::RestoreStaged { name: "missing.txt".to_string() }
        );
    }
}
