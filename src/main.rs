use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, warn};

mod browser_utils;
mod browsers;
mod chromium;
mod error;
mod firefox;
mod import;
mod output;
mod progress;
mod report;
mod shell;
mod store;

use browsers::OsKind;
use output::ListStyle;
use shell::{Shell, ShellCommand};
use store::BookmarkStore;

#[derive(Parser)]
#[command(name = "browser-bookmark-manager")]
#[command(about = "Browse and open the bookmarks of every installed browser", long_about = None)]
#[command(version)]
struct Cli {
    /// Bookmark store file
    #[arg(short, long, default_value = "bookmarks.json", global = true)]
    file: PathBuf,

    /// Verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive shell (default)
    Shell,

    /// Scan installed browsers and save any new bookmarks
    Import {
        /// Show paths and per-browser counts
        #[arg(short, long)]
        detailed: bool,
    },

    /// List bookmarks sorted by name
    List {
        /// Only favorites
        #[arg(long)]
        fav: bool,

        /// Show raw URLs instead of terminal hyperlinks
        #[arg(long)]
        links: bool,
    },

    /// Open a bookmark with the configured browser command
    Open { id: u64 },

    /// Toggle the favorite flag of a bookmark
    Fav { id: u64 },

    /// Set the command used to open links (e.g. "firefox --new-tab")
    SetBrowser {
        #[arg(
            required = true,
            num_args = 1..,
            trailing_var_arg = true,
            allow_hyphen_values = true
        )]
        command: Vec<String>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let os = OsKind::current();
    let home = dirs::home_dir();
    if home.is_none() {
        warn!("⚠️  Could not determine the home directory");
    }
    debug!("Running on {:?} with home {:?}", os, home);

    if !cli.file.exists() {
        println!("No '{}' found. Creating a new one.", cli.file.display());
    }
    let store = BookmarkStore::load(&cli.file)?;
    let mut shell =
        Shell::new(store, cli.file.clone(), os, home).with_detailed_reports(cli.verbose > 0);
    let mut stdout = std::io::stdout();

    let (command, persist) = match cli.command {
        None | Some(Commands::Shell) => return shell.run(),
        Some(Commands::Import { detailed }) => {
            shell = shell
                .with_detailed_reports(detailed || cli.verbose > 0)
                .with_autosave(true);
            (ShellCommand::Import, true)
        }
        Some(Commands::List { fav, links }) => {
            let style = if links {
                ListStyle::Links
            } else {
                ListStyle::Hyperlink
            };
            (
                ShellCommand::List {
                    favorites_only: fav,
                    style,
                },
                false,
            )
        }
        Some(Commands::Open { id }) => (ShellCommand::Open(id), false),
        Some(Commands::Fav { id }) => (ShellCommand::Fav(id), true),
        Some(Commands::SetBrowser { command }) => {
            (ShellCommand::SetBrowser(Some(command.join(" "))), true)
        }
    };

    shell.execute(command, &mut stdout)?;
    if persist {
        shell.save()?;
        println!("✅ State saved to {}", cli.file.display());
    }
    Ok(())
}
