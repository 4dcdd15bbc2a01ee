use std::path::{Path, PathBuf};

/// Operating system families with known browser profile layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsKind {
    MacOs,
    Linux,
    Windows,
    Other,
}

impl OsKind {
    pub fn current() -> Self {
        Self::from_name(std::env::consts::OS)
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "macos" => OsKind::MacOs,
            "linux" => OsKind::Linux,
            "windows" => OsKind::Windows,
            _ => OsKind::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BrowserType {
    Chrome,
    Brave,
    Edge,
    Firefox,
}

impl BrowserType {
    pub fn name(&self) -> &'static str {
        match self {
            BrowserType::Chrome => "Chrome",
            BrowserType::Brave => "Brave",
            BrowserType::Edge => "Edge",
            BrowserType::Firefox => "Firefox",
        }
    }
}

/// Candidate bookmark locations for one user on one OS.
///
/// Nothing here has been checked for existence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowserLocations {
    pub chromium: Vec<(BrowserType, Vec<PathBuf>)>,
    pub firefox_root: Option<PathBuf>,
}

impl BrowserLocations {
    pub fn is_empty(&self) -> bool {
        self.chromium.is_empty() && self.firefox_root.is_none()
    }
}

/// Default profile locations of the supported browsers.
///
/// Pure function of its arguments: one default profile per vendor, no
/// profile enumeration. Unknown systems get an empty result.
pub fn locate(os: OsKind, home: &Path) -> BrowserLocations {
    match os {
        OsKind::MacOs => {
            let app_support = home.join("Library/Application Support");
            BrowserLocations {
                chromium: vec![
                    (
                        BrowserType::Chrome,
                        vec![app_support.join("Google/Chrome/Default/Bookmarks")],
                    ),
                    (
                        BrowserType::Brave,
                        vec![app_support.join("BraveSoftware/Brave-Browser/Default/Bookmarks")],
                    ),
                    (
                        BrowserType::Edge,
                        vec![app_support.join("Microsoft Edge/Default/Bookmarks")],
                    ),
                ],
                firefox_root: Some(app_support.join("Firefox/Profiles")),
            }
        }
        OsKind::Linux => {
            let config = home.join(".config");
            BrowserLocations {
                chromium: vec![
                    (
                        BrowserType::Chrome,
                        vec![config.join("google-chrome/Default/Bookmarks")],
                    ),
                    (
                        BrowserType::Brave,
                        vec![config.join("BraveSoftware/Brave-Browser/Default/Bookmarks")],
                    ),
                ],
                firefox_root: Some(home.join(".mozilla/firefox")),
            }
        }
        OsKind::Windows => {
            let local = home.join("AppData/Local");
            BrowserLocations {
                chromium: vec![
                    (
                        BrowserType::Chrome,
                        vec![local.join("Google/Chrome/User Data/Default/Bookmarks")],
                    ),
                    (
                        BrowserType::Brave,
                        vec![local.join("BraveSoftware/Brave-Browser/User Data/Default/Bookmarks")],
                    ),
                    (
                        BrowserType::Edge,
                        vec![local.join("Microsoft/Edge/User Data/Default/Bookmarks")],
                    ),
                ],
                firefox_root: Some(home.join("AppData/Roaming/Mozilla/Firefox/Profiles")),
            }
        }
        OsKind::Other => BrowserLocations::default(),
    }
}
