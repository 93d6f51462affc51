//! Line-oriented interactive browser.
//!
//! Reads one command per line from stdin and drives a single [`Explorer`] session.
//! Action failures are reported through the explorer's event channel, so the loop only
//! prints successes itself.

use crate::commands::context::CommandContext;
use crate::commands::ls::print_listing;
use crate::commands::restore::restore_action;
use crate::core::{
    config::ConfigOverrides,
    error::{ExplorerError, Result},
    events::ExplorerEvent,
    explorer::{Explorer, Transition},
    output::describe_event,
    print_explorer_error, print_info, print_success, print_warning,
    state::DirectoryEntry,
};
use colored::*;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;

const HELP: &str = "\
Commands:
  ls                  show the current directory
  cd NAME|INDEX       open a folder (`cd ..` goes up)
  ..                  go up one level
  add NAME            stage a file
  restore NAME        unstage a staged file or undo a modification
  untrack NAME        stop tracking a committed file
  rm NAME             delete a committed file
  mv OLD NEW          rename a committed file
  commit MESSAGE      commit the staged files of this directory
  init                create a repository here
  history             show the navigation history
  help                show this help
  quit                leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    List,
    Open(String),
    Back,
    Add(String),
    Restore(String),
    Untrack(String),
    Remove(String),
    Rename { old_name: String, new_name: String },
    Commit(String),
    Init,
    History,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

/// Parse one input line. Arguments keep their inner spaces; `mv` splits on the first one.
pub fn parse_command(line: &str) -> BrowseCommand {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let arg = || rest.to_string();

    match (word, rest.is_empty()) {
        ("", _) => BrowseCommand::Empty,
        ("ls", _) => BrowseCommand::List,
        ("..", true) | ("back", true) => BrowseCommand::Back,
        ("cd", false) if rest == ".." => BrowseCommand::Back,
        ("cd", false) => BrowseCommand::Open(arg()),
        ("add", false) => BrowseCommand::Add(arg()),
        ("restore", false) => BrowseCommand::Restore(arg()),
        ("untrack", false) => BrowseCommand::Untrack(arg()),
        ("rm", false) => BrowseCommand::Remove(arg()),
        ("mv", false) => match rest.split_once(char::is_whitespace) {
            Some((old_name, new_name)) => BrowseCommand::Rename {
                old_name: old_name.to_string(),
                new_name: new_name.trim().to_string(),
            },
            None => BrowseCommand::Unknown(line.to_string()),
        },
        // An empty message still goes to the explorer, which refuses it
        ("commit", _) => BrowseCommand::Commit(arg()),
        ("init", true) => BrowseCommand::Init,
        ("history", true) => BrowseCommand::History,
        ("help", true) | ("?", true) => BrowseCommand::Help,
        ("quit", true) | ("exit", true) | ("q", true) => BrowseCommand::Quit,
        _ => BrowseCommand::Unknown(line.to_string()),
    }
}

pub async fn execute_browse(overrides: ConfigOverrides, path: Option<String>) -> Result<()> {
    let mut context = CommandContext::initialize(overrides, path.as_deref()).await?;
    let mut events = context.explorer.subscribe();
    let explorer = &context.explorer;

    print_listing(&explorer.listing());
    print_info("Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt(&explorer.current_path());
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = parse_command(&line);
        log::debug!("browse command: {command:?}");
        let keep_going = run_command(explorer, command).await;
        report_events(&mut events);
        if !keep_going {
            break;
        }
    }
    Ok(())
}

/// Run one command; false once the user asked to leave.
async fn run_command(explorer: &Explorer, command: BrowseCommand) -> bool {
    match command {
        BrowseCommand::Empty => {}
        BrowseCommand::Quit => return false,
        BrowseCommand::Help => println!("{HELP}"),
        BrowseCommand::List => print_listing(&explorer.listing()),
        BrowseCommand::History => {
            for (depth, path) in explorer.history().iter().enumerate() {
                println!("  {} {path}", format!("{depth}").bright_black());
            }
        }
        BrowseCommand::Back => {
            if explorer.go_back().await == Transition::Stay {
                print_warning("Already at the top");
            }
            print_listing(&explorer.listing());
        }
        BrowseCommand::Open(target) => match select_entry(explorer, &target) {
            Ok(entry) => {
                if explorer.activate(&entry).await == Transition::Stay && !entry.is_parent() {
                    print_warning(&format!("{} is not a folder you can open", entry.name));
                }
                print_listing(&explorer.listing());
            }
            Err(e) => print_explorer_error(&e),
        },
        BrowseCommand::Add(name) => report_action(explorer, explorer.stage_file(&name).await),
        BrowseCommand::Restore(name) => {
            let action = restore_action(&explorer.listing(), &name);
            report_action(explorer, explorer.dispatch(action).await)
        }
        BrowseCommand::Untrack(name) => {
            report_action(explorer, explorer.untrack_file(&name).await)
        }
        BrowseCommand::Remove(name) => report_action(explorer, explorer.delete_file(&name).await),
        BrowseCommand::Rename { old_name, new_name } => {
            report_action(explorer, explorer.rename_file(&old_name, &new_name).await)
        }
        BrowseCommand::Commit(message) => {
            let mut draft = explorer.open_commit();
            draft.set_message(message);
            report_action(explorer, explorer.submit_commit(&draft).await)
        }
        BrowseCommand::Init => report_action(explorer, explorer.init_repository().await),
        BrowseCommand::Unknown(line) => {
            print_warning(&format!("Unknown command `{line}`; type `help`"))
        }
    }
    true
}

/// Resolve `cd` targets: an entry name, or its number in the printed listing.
fn select_entry(explorer: &Explorer, target: &str) -> Result<DirectoryEntry> {
    let listing = explorer.listing();
    if let Some(entry) = listing.get(target) {
        return Ok(entry.clone());
    }
    target
        .parse::<usize>()
        .ok()
        .and_then(|index| index.checked_sub(1))
        .and_then(|index| listing.entries().get(index))
        .cloned()
        .ok_or_else(|| ExplorerError::entry_not_found(target))
}

/// Failures arrive as events; only successes are printed here.
fn report_action(explorer: &Explorer, result: Result<String>) {
    if let Ok(message) = result {
        print_success(&message);
        print_listing(&explorer.listing());
    }
}

fn report_events(events: &mut UnboundedReceiver<ExplorerEvent>) {
    while let Ok(event) = events.try_recv() {
        if let Some(text) = describe_event(&event) {
            if event.is_error() {
                print_warning(&text);
            } else {
                log::info!("{text}");
            }
        }
    }
}

fn prompt(path: &str) {
    print!("{} {} ", path.cyan(), ">".bright_black());
    let _ = std::io::stdout().flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_navigation() {
        assert_eq!(parse_command("ls"), BrowseCommand::List);
        assert_eq!(parse_command("  cd docs "), BrowseCommand::Open("docs".to_string()));
        assert_eq!(parse_command("cd .."), BrowseCommand::Back);
        assert_eq!(parse_command(".."), BrowseCommand::Back);
        assert_eq!(parse_command("cd my folder"), BrowseCommand::Open("my folder".to_string()));
        assert_eq!(parse_command(""), BrowseCommand::Empty);
    }

    #[test]
    fn test_parse_actions() {
        assert_eq!(parse_command("add a.txt"), BrowseCommand::Add("a.txt".to_string()));
        assert_eq!(parse_command("restore a.txt"), BrowseCommand::Restore("a.txt".to_string()));
        assert_eq!(parse_command("rm a.txt"), BrowseCommand::Remove("a.txt".to_string()));
        assert_eq!(
            parse_command("mv old.txt new.txt"),
            BrowseCommand::Rename {
                old_name: "old.txt".to_string(),
                new_name: "new.txt".to_string()
            }
        );
        assert_eq!(
            parse_command("commit fix the parser"),
            BrowseCommand::Commit("fix the parser".to_string())
        );
        assert_eq!(parse_command("commit"), BrowseCommand::Commit(String::new()));
        assert_eq!(parse_command("init"), BrowseCommand::Init);
    }

    #[test]
    fn test_parse_rejects_missing_arguments() {
        assert!(matches!(parse_command("add"), BrowseCommand::Unknown(_)));
        assert!(matches!(parse_command("mv only-one"), BrowseCommand::Unknown(_)));
        assert!(matches!(parse_command("frobnicate"), BrowseCommand::Unknown(_)));
        assert_eq!(parse_command("quit"), BrowseCommand::Quit);
    }
}
