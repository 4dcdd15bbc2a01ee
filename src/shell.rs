//! Interactive command shell over the bookmark store.

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::Write;
use std::path::PathBuf;
use tracing::warn;

use crate::browser_utils;
use crate::browsers::OsKind;
use crate::import::run_import;
use crate::output::{format_bookmark, ListStyle, HELP};
use crate::progress;
use crate::report::ImportReport;
use crate::store::BookmarkStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Empty,
    List { favorites_only: bool, style: ListStyle },
    Open(u64),
    Fav(u64),
    Import,
    SetBrowser(Option<String>),
    Save,
    Help,
    Exit,
    Usage(&'static str),
    InvalidId,
    Unknown(String),
}

fn parse_id(args: &[&str], usage: &'static str, make: fn(u64) -> ShellCommand) -> ShellCommand {
    match args.first() {
        None => ShellCommand::Usage(usage),
        Some(raw) => raw.parse().map(make).unwrap_or(ShellCommand::InvalidId),
    }
}

impl ShellCommand {
    pub fn parse(line: &str) -> Self {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((command, args)) = parts.split_first() else {
            return ShellCommand::Empty;
        };

        match *command {
            "list" | "ls" => match args.first().copied() {
                Some("fav") => ShellCommand::List {
                    favorites_only: true,
                    style: ListStyle::Hyperlink,
                },
                Some("links") => ShellCommand::List {
                    favorites_only: false,
                    style: ListStyle::Links,
                },
                _ => ShellCommand::List {
                    favorites_only: false,
                    style: ListStyle::Hyperlink,
                },
            },
            "open" => parse_id(args, "Usage: open <id>", ShellCommand::Open),
            "fav" => parse_id(args, "Usage: fav <id>", ShellCommand::Fav),
            "import" => ShellCommand::Import,
            "set-browser" if args.is_empty() => ShellCommand::SetBrowser(None),
            "set-browser" => ShellCommand::SetBrowser(Some(args.join(" "))),
            "save" => ShellCommand::Save,
            "help" => ShellCommand::Help,
            "exit" | "quit" => ShellCommand::Exit,
            other => ShellCommand::Unknown(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Shell {
    store: BookmarkStore,
    store_path: PathBuf,
    os: OsKind,
    home: Option<PathBuf>,
    detailed: bool,
    autosave: bool,
}

impl Shell {
    pub fn new(
        store: BookmarkStore,
        store_path: PathBuf,
        os: OsKind,
        home: Option<PathBuf>,
    ) -> Self {
        Self {
            store,
            store_path,
            os,
            home,
            detailed: false,
            autosave: false,
        }
    }

    /// Show per-source paths and counts in import reports.
    pub fn with_detailed_reports(mut self, detailed: bool) -> Self {
        self.detailed = detailed;
        self
    }

    /// The caller saves after each command, so reports skip the `save` hint.
    pub fn with_autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }

    pub fn save(&self) -> Result<()> {
        self.store.save(&self.store_path)
    }

    pub fn handle_line(&mut self, line: &str, out: &mut dyn Write) -> Result<Flow> {
        self.execute(ShellCommand::parse(line), out)
    }

    pub fn execute(&mut self, command: ShellCommand, out: &mut dyn Write) -> Result<Flow> {
        match command {
            ShellCommand::Empty => {}
            ShellCommand::List {
                favorites_only,
                style,
            } => self.list(favorites_only, style, out)?,
            ShellCommand::Open(id) => self.open(id, out)?,
            ShellCommand::Fav(id) => match self.store.toggle_favorite(id) {
                Some(bookmark) => {
                    let status = if bookmark.favorite {
                        "added to"
                    } else {
                        "removed from"
                    };
                    writeln!(out, "Bookmark '{}' {} favorites.", bookmark.name, status)?;
                }
                None => writeln!(out, "ID not found.")?,
            },
            ShellCommand::Import => {
                let report = self.import();
                write!(out, "{}", report.format(self.detailed, self.autosave))?;
            }
            ShellCommand::SetBrowser(None) => {
                writeln!(out, "Usage: set-browser <cmd>")?;
                writeln!(out, "Current: '{}'", self.store.config.default_browser_cmd)?;
            }
            ShellCommand::SetBrowser(Some(cmd)) => {
                writeln!(out, "Browser command set to: '{}'", cmd)?;
                self.store.config.default_browser_cmd = cmd;
            }
            ShellCommand::Save => match self.save() {
                Ok(()) => writeln!(out, "✅ State saved to {}", self.store_path.display())?,
                Err(e) => writeln!(out, "Error: {:#}", e)?,
            },
            ShellCommand::Help => writeln!(out, "{}", HELP)?,
            ShellCommand::Exit => return Ok(Flow::Exit),
            ShellCommand::Usage(usage) => writeln!(out, "{}", usage)?,
            ShellCommand::InvalidId => writeln!(out, "Invalid ID.")?,
            ShellCommand::Unknown(word) => writeln!(out, "Unknown command: '{}'.", word)?,
        }
        Ok(Flow::Continue)
    }

    fn list(&self, favorites_only: bool, style: ListStyle, out: &mut dyn Write) -> Result<()> {
        let items = self.store.listing(favorites_only);
        if items.is_empty() {
            if favorites_only {
                writeln!(out, "No favorites found.")?;
            } else {
                writeln!(out, "No bookmarks found.")?;
            }
            return Ok(());
        }

        for bookmark in items {
            writeln!(out, "{}", format_bookmark(bookmark, style))?;
        }
        Ok(())
    }

    fn open(&self, id: u64, out: &mut dyn Write) -> Result<()> {
        let Some(bookmark) = self.store.get(id) else {
            writeln!(out, "ID not found.")?;
            return Ok(());
        };

        writeln!(out, "Opening '{}'...", bookmark.name)?;
        let command = &self.store.config.default_browser_cmd;
        if let Err(e) = browser_utils::open_url(command, &bookmark.url) {
            writeln!(out, "Error: {:#}", e)?;
        }
        Ok(())
    }

    /// Scan the installed browsers and merge anything new.
    pub fn import(&mut self) -> ImportReport {
        let Some(home) = self.home.clone() else {
            warn!("⚠️  Could not determine the home directory; skipping browser scan");
            return ImportReport::new();
        };

        let spinner = progress::create_spinner("Scanning browser profiles...");
        let report = run_import(&mut self.store, self.os, &home);
        progress::finish_and_clear(&spinner);
        report
    }

    /// Run one input line and flush. Output errors end the session instead
    /// of aborting it, so the store still gets saved.
    fn step(&mut self, line: &str, out: &mut dyn Write) -> Flow {
        let result = self
            .handle_line(line, out)
            .and_then(|flow| out.flush().map(|()| flow).map_err(anyhow::Error::from));
        match result {
            Ok(flow) => flow,
            Err(e) => {
                warn!("⚠️  Could not write output: {:#}", e);
                Flow::Exit
            }
        }
    }

    /// Read-eval loop; saves the store on the way out.
    pub fn run(&mut self) -> Result<()> {
        println!("Welcome to the Bookmark Manager! Type 'help' for commands.");
        if self.store.is_empty() {
            println!("Your collection is empty. Type 'import' to scan your browsers.");
        }
        let mut rl = DefaultEditor::new()?;
        let mut stdout = std::io::stdout();

        loop {
            match rl.readline("> ") {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        let _ = rl.add_history_entry(line.as_str());
                    }
                    if self.step(&line, &mut stdout) == Flow::Exit {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(err) => {
                    warn!("⚠️  Input error: {}", err);
                    break;
                }
            }
        }

        match self.save() {
            Ok(()) => println!("\nChanges saved. Goodbye! 👋"),
            Err(e) => eprintln!("Could not save on exit: {:#}", e),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn shell_in(dir: &std::path::Path) -> Shell {
        let mut store = BookmarkStore::default();
        store.merge("banana", "http://b");
        store.merge("Apple", "http://a");
        Shell::new(
            store,
            dir.join("bookmarks.json"),
            OsKind::Linux,
            Some(dir.join("home")),
        )
    }

    fn run(shell: &mut Shell, line: &str) -> (Flow, String) {
        let mut out = Vec::new();
        let flow = shell.handle_line(line, &mut out).unwrap();
        (flow, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(ShellCommand::parse("   "), ShellCommand::Empty);
        assert_eq!(
            ShellCommand::parse("ls links"),
            ShellCommand::List {
                favorites_only: false,
                style: ListStyle::Links,
            }
        );
        assert_eq!(
            ShellCommand::parse("list fav"),
            ShellCommand::List {
                favorites_only: true,
                style: ListStyle::Hyperlink,
            }
        );
        assert_eq!(ShellCommand::parse("open 12"), ShellCommand::Open(12));
        assert_eq!(ShellCommand::parse("open"), ShellCommand::Usage("Usage: open <id>"));
        assert_eq!(ShellCommand::parse("fav x"), ShellCommand::InvalidId);
        assert_eq!(
            ShellCommand::parse("set-browser  firefox   --new-tab"),
            ShellCommand::SetBrowser(Some("firefox --new-tab".to_string()))
        );
        assert_eq!(ShellCommand::parse("set-browser"), ShellCommand::SetBrowser(None));
        assert_eq!(ShellCommand::parse("quit"), ShellCommand::Exit);
        assert_eq!(ShellCommand::parse("frob 1"), ShellCommand::Unknown("frob".to_string()));
    }

    #[test]
    fn test_list_and_favorites() {
        let dir = tempfile::tempdir().unwrap();
        let mut shell = shell_in(dir.path());

        let (_, text) = run(&mut shell, "list links");
        let apple = text.find("Apple").unwrap();
        let banana = text.find("banana").unwrap();
        assert!(apple < banana);

        let (_, text) = run(&mut shell, "list fav");
        assert_eq!(text, "No favorites found.\n");

        let (_, text) = run(&mut shell, "fav 1");
        assert_eq!(text, "Bookmark 'banana' added to favorites.\n");
        let (_, text) = run(&mut shell, "list fav");
        assert!(text.contains("banana"));
        assert!(!text.contains("Apple"));

        let (_, text) = run(&mut shell, "fav 1");
        assert_eq!(text, "Bookmark 'banana' removed from favorites.\n");
        let (_, text) = run(&mut shell, "fav 42");
        assert_eq!(text, "ID not found.\n");
    }

    #[test]
    fn test_open_errors() {
        let dir = tempfile::tempdir().unwrap();
        let mut shell = shell_in(dir.path());

        assert_eq!(run(&mut shell, "open 99").1, "ID not found.\n");
        assert_eq!(run(&mut shell, "open -1").1, "Invalid ID.\n");

        run(&mut shell, "set-browser definitely-not-a-real-browser-binary");
        let (flow, text) = run(&mut shell, "open 1");
        assert_eq!(flow, Flow::Continue);
        assert!(text.starts_with("Opening 'banana'...\n"));
        assert!(text.contains("Error:"));
    }

    #[test]
    fn test_set_browser_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let mut shell = shell_in(dir.path());

        let (_, text) = run(&mut shell, "set-browser firefox --private-window");
        assert_eq!(text, "Browser command set to: 'firefox --private-window'\n");
        let (_, text) = run(&mut shell, "set-browser");
        assert!(text.contains("Current: 'firefox --private-window'"));

        let (_, text) = run(&mut shell, "save");
        assert!(text.starts_with("✅ State saved to"));

        let saved = BookmarkStore::load(&dir.path().join("bookmarks.json")).unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved.config.default_browser_cmd, "firefox --private-window");
    }

    #[test]
    fn test_import_through_shell() {
        let dir = tempfile::tempdir().unwrap();
        let mut shell = shell_in(dir.path());
        let chrome = dir.path().join("home/.config/google-chrome/Default/Bookmarks");
        fs::create_dir_all(chrome.parent().unwrap()).unwrap();
        fs::write(
            &chrome,
            r#"{"roots":{"bookmark_bar":{"type":"folder","children":[
                {"type":"url","name":"Apple again","url":"http://a"},
                {"type":"url","name":"Cherry","url":"http://c"}
            ]}}}"#,
        )
        .unwrap();

        let (_, text) = run(&mut shell, "import");
        assert!(text.contains("Successfully checked for Chrome bookmarks."));
        assert!(text.contains("✅ Imported 1 new bookmarks. Run 'save' to persist them."));
        assert_eq!(shell.store.get(3).unwrap().name, "Cherry");
        assert_eq!(shell.store.get(2).unwrap().name, "Apple");
    }

    #[test]
    fn test_autosave_import_drops_save_hint() {
        let dir = tempfile::tempdir().unwrap();
        let mut shell = shell_in(dir.path()).with_autosave(true);
        let chrome = dir.path().join("home/.config/google-chrome/Default/Bookmarks");
        fs::create_dir_all(chrome.parent().unwrap()).unwrap();
        fs::write(
            &chrome,
            r#"{"roots":{"other":{"type":"folder","children":[
                {"type":"url","name":"Cherry","url":"http://c"}
            ]}}}"#,
        )
        .unwrap();

        let (_, text) = run(&mut shell, "import");
        assert!(text.contains("✅ Imported 1 new bookmarks."));
        assert!(!text.contains("Run 'save'"));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_output_error_ends_session_and_still_saves() {
        let dir = tempfile::tempdir().unwrap();
        let mut shell = shell_in(dir.path());

        let mut out = Vec::new();
        assert_eq!(shell.step("fav 2", &mut out), Flow::Continue);
        assert_eq!(shell.step("list", &mut BrokenPipe), Flow::Exit);

        shell.save().unwrap();
        let saved = BookmarkStore::load(&dir.path().join("bookmarks.json")).unwrap();
        assert!(saved.get(2).unwrap().favorite);
    }

    #[test]
    fn test_misc_commands() {
        let dir = tempfile::tempdir().unwrap();
        let mut shell = shell_in(dir.path());

        assert!(run(&mut shell, "help").1.contains("Bookmark Manager Help"));
        assert_eq!(run(&mut shell, "bogus").1, "Unknown command: 'bogus'.\n");
        assert_eq!(run(&mut shell, "").0, Flow::Continue);
        assert_eq!(run(&mut shell, "exit").0, Flow::Exit);
    }
}
