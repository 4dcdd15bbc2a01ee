use std::path::PathBuf;

use crate::browsers::BrowserType;

/// What happened to one browser source during an import run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    Imported {
        browser: BrowserType,
        path: PathBuf,
        found: usize,
        added: usize,
    },
    Failed {
        browser: BrowserType,
        path: PathBuf,
        reason: String,
    },
    NotFound {
        browser: BrowserType,
        reason: String,
    },
}

/// Summary of one import run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub new_count: usize,
    pub found_any: bool,
    pub sources: Vec<SourceOutcome>,
}

impl ImportReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_imported(
        &mut self,
        browser: BrowserType,
        path: PathBuf,
        found: usize,
        added: usize,
    ) {
        self.found_any = true;
        self.sources.push(SourceOutcome::Imported {
            browser,
            path,
            found,
            added,
        });
    }

    pub fn add_failed(&mut self, browser: BrowserType, path: PathBuf, reason: &str) {
        self.sources.push(SourceOutcome::Failed {
            browser,
            path,
            reason: reason.to_string(),
        });
    }

    pub fn add_not_found(&mut self, browser: BrowserType, reason: &str) {
        self.sources.push(SourceOutcome::NotFound {
            browser,
            reason: reason.to_string(),
        });
    }

    /// One-line outcome. `saved` drops the reminder to run `save` for
    /// callers that persist the store themselves.
    pub fn headline(&self, saved: bool) -> String {
        if self.new_count > 0 && saved {
            format!("✅ Imported {} new bookmarks.", self.new_count)
        } else if self.new_count > 0 {
            format!(
                "✅ Imported {} new bookmarks. Run 'save' to persist them.",
                self.new_count
            )
        } else if self.found_any {
            "No new bookmarks found.".to_string()
        } else {
            "Could not find any supported browser bookmarks on default paths.".to_string()
        }
    }

    pub fn format(&self, detailed: bool, saved: bool) -> String {
        let mut output = String::new();

        for source in &self.sources {
            match source {
                SourceOutcome::Imported {
                    browser,
                    path,
                    found,
                    added,
                } => {
                    output.push_str(&format!(
                        "Successfully checked for {} bookmarks.\n",
                        browser.name()
                    ));
                    if detailed {
                        output.push_str(&format!("    Path: {:?}\n", path));
                        output.push_str(&format!("    Entries: {} read, {} new\n", found, added));
                    }
                }
                SourceOutcome::Failed {
                    browser,
                    path,
                    reason,
                } => {
                    output.push_str(&format!(
                        "Notice: Failed to import from {} at {:?}: {}\n",
                        browser.name(),
                        path,
                        reason
                    ));
                }
                SourceOutcome::NotFound { reason, .. } => {
                    output.push_str(&format!("Notice: {}\n", reason));
                }
            }
        }

        output.push_str(&self.headline(saved));
        output.push('\n');
        output
    }
}
