//! Scan every known browser and merge its bookmarks into the store.
//!
//! Sources are read one at a time. A failing source is recorded in the
//! report and the scan moves on; whatever was merged before stays merged.

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::browsers::{locate, BrowserType, OsKind};
use crate::chromium::parse_chromium_file;
use crate::error::ImportResult;
use crate::firefox::read_firefox_bookmarks;
use crate::report::ImportReport;
use crate::store::BookmarkStore;

pub const FIREFOX_DB_NAME: &str = "places.sqlite";

/// Parse a Chromium bookmark file and merge it. Returns `(read, added)`.
pub fn import_from_chromium(
    store: &mut BookmarkStore,
    path: &Path,
) -> ImportResult<(usize, usize)> {
    let pairs = parse_chromium_file(path)?;
    let read = pairs.len();
    Ok((read, store.merge_all(pairs)))
}

/// Read a Firefox places database and merge it. Returns `(read, added)`.
pub fn import_from_firefox(
    store: &mut BookmarkStore,
    db_path: &Path,
) -> ImportResult<(usize, usize)> {
    let pairs = read_firefox_bookmarks(db_path)?;
    let read = pairs.len();
    Ok((read, store.merge_all(pairs)))
}

/// First `places.sqlite` below `root`, walking in file-name order.
///
/// Symlinks to the database count; directories with that name do not.
pub fn find_places_database(root: &Path) -> Option<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!("Skipping unreadable entry under {:?}: {}", root, e);
                None
            }
        })
        .find(|entry| !entry.file_type().is_dir() && entry.file_name() == FIREFOX_DB_NAME)
        .map(|entry| entry.into_path())
}

/// Scan the default profiles of every supported browser for `os`/`home`.
pub fn run_import(store: &mut BookmarkStore, os: OsKind, home: &Path) -> ImportReport {
    let locations = locate(os, home);
    if locations.is_empty() {
        debug!("No known browser locations for {:?}", os);
    }
    let initial_count = store.len();
    let mut report = ImportReport::new();

    for (browser, paths) in &locations.chromium {
        for path in paths {
            if !path.exists() {
                debug!("{} bookmarks not present at {:?}", browser.name(), path);
                continue;
            }

            match import_from_chromium(store, path) {
                Ok((read, added)) => {
                    info!(
                        "✅ Checked {} bookmarks: {} read, {} new",
                        browser.name(),
                        read,
                        added
                    );
                    report.add_imported(*browser, path.clone(), read, added);
                }
                Err(e) => {
                    warn!("⚠️  Failed to import from {}: {}", browser.name(), e);
                    report.add_failed(*browser, path.clone(), &e.to_string());
                }
            }
        }
    }

    if let Some(firefox_root) = &locations.firefox_root {
        import_firefox_profile(store, firefox_root, &mut report);
    }

    report.new_count = store.len() - initial_count;
    report
}

fn import_firefox_profile(store: &mut BookmarkStore, root: &Path, report: &mut ImportReport) {
    let Some(db_path) = find_places_database(root) else {
        info!("Firefox profile database not found under {:?}", root);
        report.add_not_found(
            BrowserType::Firefox,
            "Could not find a Firefox 'places.sqlite' file.",
        );
        return;
    };

    match import_from_firefox(store, &db_path) {
        Ok((read, added)) => {
            info!("✅ Checked Firefox bookmarks: {} read, {} new", read, added);
            report.add_imported(BrowserType::Firefox, db_path, read, added);
        }
        Err(e) => {
            warn!("⚠️  Failed to import from Firefox: {}", e);
            report.add_failed(BrowserType::Firefox, db_path, &e.to_string());
        }
    }
}
