//! Chromium-family `Bookmarks` file parsing.
//!
//! The file is a JSON document whose `roots` object maps root folder labels
//! (`bookmark_bar`, `other`, `synced`, ...) to bookmark tree nodes.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use crate::error::{ImportError, ImportResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Url,
    Folder,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChromiumBookmarkNode {
    #[serde(rename = "type", default)]
    pub kind: NodeKind,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub children: Vec<ChromiumBookmarkNode>,
}

#[derive(Debug, Deserialize)]
struct ChromiumBookmarkFile {
    roots: BTreeMap<String, ChromiumBookmarkNode>,
}

/// Read a Chromium bookmark file and flatten it into `(name, url)` pairs.
pub fn parse_chromium_file(path: &Path) -> ImportResult<Vec<(String, String)>> {
    let data = std::fs::read(path).map_err(|source| ImportError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let pairs = parse_chromium_bytes(&data).map_err(|source| ImportError::Format {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Parsed {} URL entries from {:?}", pairs.len(), path);
    Ok(pairs)
}

/// Decode bookmark JSON and flatten every root in key order.
pub fn parse_chromium_bytes(data: &[u8]) -> Result<Vec<(String, String)>, serde_json::Error> {
    let mut deserializer = serde_json::Deserializer::from_slice(data);
    deserializer.disable_recursion_limit();
    let file = ChromiumBookmarkFile::deserialize(&mut deserializer)?;
    deserializer.end()?;

    let mut pairs = Vec::new();
    for root in file.roots.values() {
        flatten_node(root, &mut pairs);
    }
    Ok(pairs)
}

/// Pre-order walk with an explicit stack so folder depth is unbounded.
pub fn flatten_node(root: &ChromiumBookmarkNode, out: &mut Vec<(String, String)>) {
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if node.kind == NodeKind::Url {
            if let Some(url) = node.url.as_deref().filter(|u| !u.is_empty()) {
                out.push((node.name.clone(), url.to_string()));
            }
        }
        stack.extend(node.children.iter().rev());
    }
}
