use crate::commands::context::CommandContext;
use crate::core::{
    affordances::{directory_affordance, DirectoryAffordance},
    colors::{format_entry_line, get_legend},
    config::ConfigOverrides,
    error::Result,
    print_info, print_section_header,
    staging::compute_staged,
    state::Listing,
};
use colored::*;

pub async fn execute_ls(overrides: ConfigOverrides, path: Option<String>) -> Result<()> {
    let context = CommandContext::initialize(overrides, path.as_deref()).await?;
    print_listing(&context.explorer.listing());
    Ok(())
}

/// Print a listing with numbered entries, the legend and the directory-level action.
pub fn print_listing(listing: &Listing) {
    print_section_header(&listing.path);

    if listing.is_empty() {
        println!("  {}", "(empty directory)".bright_black());
    }
    for (i, entry) in listing.entries().iter().enumerate() {
        println!("{}", format_entry_line(i + 1, entry));
    }

    println!("\n{}", get_legend());
    let hint = match directory_affordance(listing) {
        DirectoryAffordance::CreateRepository => {
            format!("{} (git-explorer init)", DirectoryAffordance::CreateRepository.label())
        }
        DirectoryAffordance::CommitStaged => {
            let staged = compute_staged(listing);
            if staged.is_empty() {
                "Nothing staged".to_string()
            } else {
                format!(
                    "{} ({} staged: {})",
                    DirectoryAffordance::CommitStaged.label(),
                    staged.len(),
                    staged.names().join(", ")
                )
            }
        }
    };
    println!("{}", hint.bright_black());
}

/// Print the listing again after an action, like the initial `ls`.
pub fn print_updated_listing(listing: &Listing) {
    print_info("Updated listing:");
    print_listing(listing);
}
