//! Firefox `places.sqlite` bookmark extraction.

use rusqlite::{Connection, OpenFlags, Row};
use std::path::Path;
use tracing::debug;

use crate::error::{ImportError, ImportResult};

/// `moz_bookmarks.type` of a real bookmark (2 is a folder, 3 a separator).
const TYPE_BOOKMARK: i64 = 1;

const BOOKMARKS_QUERY: &str = "SELECT b.title, p.url
     FROM moz_bookmarks AS b
     JOIN moz_places AS p ON b.fk = p.id
     WHERE b.type = ?1 AND b.title IS NOT NULL
     ORDER BY b.id";

/// Build an SQLite URI that opens `path` as immutable.
///
/// The browser may hold the database open, so we never take locks on it or
/// look at its journal.
fn immutable_uri(path: &Path) -> String {
    let mut raw = path.to_string_lossy().replace('\\', "/");
    if !raw.starts_with('/') {
        raw.insert(0, '/');
    }

    let mut encoded = String::with_capacity(raw.len() + 16);
    for ch in raw.chars() {
        match ch {
            '%' => encoded.push_str("%25"),
            '?' => encoded.push_str("%3F"),
            '#' => encoded.push_str("%23"),
            _ => encoded.push(ch),
        }
    }
    format!("file:{}?immutable=1", encoded)
}

/// Open a Firefox places database read-only and immutable.
pub fn open_places_readonly(db_path: &Path) -> ImportResult<Connection> {
    Connection::open_with_flags(
        immutable_uri(db_path),
        OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|source| ImportError::Open {
        path: db_path.to_path_buf(),
        source,
    })
}

fn decode_row(db_path: &Path, row: &Row<'_>) -> ImportResult<(String, String)> {
    let decode = |idx: usize| {
        row.get::<_, String>(idx)
            .map_err(|source| ImportError::RowDecode {
                path: db_path.to_path_buf(),
                source,
            })
    };
    Ok((decode(0)?, decode(1)?))
}

/// Read `(title, url)` pairs for every titled bookmark entry.
///
/// Rows that fail to decode are skipped; open and query failures abort.
pub fn read_firefox_bookmarks(db_path: &Path) -> ImportResult<Vec<(String, String)>> {
    let conn = open_places_readonly(db_path)?;
    let query_err = |source| ImportError::Query {
        path: db_path.to_path_buf(),
        source,
    };

    let mut stmt = conn.prepare(BOOKMARKS_QUERY).map_err(query_err)?;
    let mut rows = stmt.query([TYPE_BOOKMARK]).map_err(query_err)?;

    let mut pairs = Vec::new();
    let mut skipped = 0usize;
    while let Some(row) = rows.next().map_err(query_err)? {
        match decode_row(db_path, row) {
            Ok(pair) => pairs.push(pair),
            Err(e) => {
                debug!("{}", e);
                skipped += 1;
            }
        }
    }

    debug!(
        "Read {} bookmarks from Firefox database {:?} ({} rows skipped)",
        pairs.len(),
        db_path,
        skipped
    );
    Ok(pairs)
}
