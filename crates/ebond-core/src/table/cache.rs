//! Load-once table cache keyed by file identity.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::SystemTime;

use tracing::debug;

use super::Table;
use crate::error::Result;

/// Identity of a file on disk: modification time and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileStamp {
    modified: Option<SystemTime>,
    len: u64,
}

impl FileStamp {
    fn of(path: &Path) -> Result<Self> {
        let meta = std::fs::metadata(path)?;
        Ok(Self {
            modified: meta.modified().ok(),
            len: meta.len(),
        })
    }
}

/// Memoizes loaded tables by canonical path.
///
/// A cached table is reused until the file's stamp changes or the cache is
/// cleared.
#[derive(Debug, Default)]
pub struct TableCache {
    entries: HashMap<PathBuf, (FileStamp, Rc<Table>)>,
    loads: usize,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the table at `path`, loading it if absent or stale.
    pub fn get(&mut self, path: &Path) -> Result<Rc<Table>> {
        let key = std::fs::canonicalize(path)?;
        let stamp = FileStamp::of(&key)?;

        if let Some((cached, table)) = self.entries.get(&key) {
            if *cached == stamp {
                debug!("Table cache hit for {}", key.display());
                return Ok(Rc::clone(table));
            }
            debug!("Table cache entry for {} is stale", key.display());
        }

        let table = Rc::new(Table::load(&key)?);
        self.loads += 1;
        self.entries.insert(key, (stamp, Rc::clone(&table)));
        Ok(table)
    }

    /// Drop the entry for `path`, if cached.
    pub fn invalidate(&mut self, path: &Path) {
        if let Ok(key) = std::fs::canonicalize(path) {
            self.entries.remove(&key);
        }
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached tables.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of times a file was actually parsed.
    pub fn loads(&self) -> usize {
        self.loads
    }
}
