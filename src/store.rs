// src/store.rs
//
// Local cache of the last fetched feed, so a run can be replayed offline.

use std::{fs, path::{Path, PathBuf}};

use crate::config::consts::FEED_CACHE_FILE;
use crate::error::{Error, Result};

pub fn feed_path(store_dir: &Path) -> PathBuf {
    store_dir.join(FEED_CACHE_FILE)
}

/// Write the raw feed text, creating the store dir if needed.
pub fn save_feed(store_dir: &Path, text: &str) -> Result<PathBuf> {
    fs::create_dir_all(store_dir).map_err(|e| Error::io(store_dir, e))?;

    // Write-then-rename: the cache is always either the old feed or the new one
    let path = feed_path(store_dir);
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, text).map_err(|e| Error::io(&tmp, e))?;
    fs::rename(&tmp, &path).map_err(|e| Error::io(&path, e))?;
    Ok(path)
}

pub fn load_feed(store_dir: &Path) -> Result<String> {
    let path = feed_path(store_dir);
    fs::read_to_string(&path).map_err(|e| Error::io(&path, e))
}
