use owo_colors::OwoColorize;

use crate::store::Bookmark;

/// How `list` renders each bookmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStyle {
    /// Clickable OSC 8 hyperlinks for terminals that support them.
    Hyperlink,
    /// Name followed by the raw URL.
    Links,
}

fn osc8_link(url: &str, text: &str) -> String {
    format!("\x1b]8;;{}\x07{}\x1b]8;;\x07", url, text)
}

pub fn format_bookmark(bookmark: &Bookmark, style: ListStyle) -> String {
    let id = format!("[{}]", bookmark.id);
    let fav = if bookmark.favorite {
        format!("{} ", "★".yellow())
    } else {
        String::new()
    };

    match style {
        ListStyle::Hyperlink => {
            let name = bookmark.name.blue().to_string();
            format!("{} {}{}", id.bold().cyan(), fav, osc8_link(&bookmark.url, &name))
        }
        ListStyle::Links => format!(
            "{} {}{} - {}",
            id.bold().cyan(),
            fav,
            bookmark.name,
            bookmark.url.bright_black()
        ),
    }
}

pub const HELP: &str = "
--- Bookmark Manager Help ---
  list              - Show bookmarks as clickable hyperlinks
  list fav          - Show only favorite bookmarks as hyperlinks
  list links        - Show bookmarks with visible URLs (for basic terminals)
  open <id>         - Open the bookmark with the given ID
  fav <id>          - Toggle favorite status for a bookmark
  import            - Scan for new bookmarks from installed browsers
  set-browser <cmd> - Set the command to open links (e.g., 'firefox')
  save              - Save all changes to the bookmark file
  help              - Show this help message
  exit              - Quit the program
-----------------------------";
