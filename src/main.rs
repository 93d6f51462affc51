use clap::{Parser, Subcommand};
use git_explorer::commands::*;
use git_explorer::core::{
    config::ConfigOverrides,
    error::{ExplorerError, Result},
    print_explorer_error,
};
use std::env;

#[derive(Parser)]
#[command(name = "git-explorer")]
#[command(about = "Browse directories with a git status overlay")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Use the local git backend instead of the HTTP service
    #[arg(long, global = true)]
    local: bool,

    /// Backend service URL (e.g. http://127.0.0.1:8000)
    #[arg(long, global = true, value_name = "URL")]
    server: Option<String>,

    /// Session token sent as a bearer token
    #[arg(long, global = true, value_name = "TOKEN")]
    token: Option<String>,

    /// Top-level directory; `..` is not offered above it
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List a directory with statuses and available actions
    Ls {
        /// Directory, absolute or relative to the root
        path: Option<String>,
    },
    /// Stage an untracked or modified file
    Add { path: String, name: String },
    /// Unstage a staged file or undo a modification
    Restore { path: String, name: String },
    /// Stop tracking a committed file
    Untrack { path: String, name: String },
    /// Delete a committed file
    Rm { path: String, name: String },
    /// Commit the staged files of a directory
    Commit {
        path: String,
        /// Commit message
        #[arg(short, long)]
        message: String,
    },
    /// Create a repository in a plain directory
    Init { path: String },
    /// Rename a committed file
    Mv {
        path: String,
        old_name: String,
        new_name: String,
    },
    /// Interactive browser
    Browse { path: Option<String> },
}

fn main() {
    let cli = Cli::parse();

    // --debug wins; otherwise RUST_LOG set by the user, else info
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else if env::var_os("RUST_LOG").is_none() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let overrides = ConfigOverrides {
        local: cli.local,
        server_url: cli.server,
        session_token: cli.token,
        root: cli.root,
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            print_explorer_error(&ExplorerError::from(e));
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(run(cli.command, overrides)) {
        print_explorer_error(&e);
        std::process::exit(1);
    }
}

async fn run(command: Commands, overrides: ConfigOverrides) -> Result<()> {
    match command {
        Commands::Ls { path } => execute_ls(overrides, path).await,
        Commands::Add { path, name } => execute_add(overrides, path, name).await,
        Commands::Restore { path, name } => execute_restore(overrides, path, name).await,
        Commands::Untrack { path, name } => execute_untrack(overrides, path, name).await,
        Commands::Rm { path, name } => execute_rm(overrides, path, name).await,
        Commands::Commit { path, message } => execute_commit(overrides, path, message).await,
        Commands::Init { path } => execute_init(overrides, path).await,
        Commands::Mv {
            path,
            old_name,
            new_name,
        } => execute_mv(overrides, path, old_name, new_name).await,
        Commands::Browse { path } => execute_browse(overrides, path).await,
    }
}
