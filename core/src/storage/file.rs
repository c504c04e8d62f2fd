// amaya_cart/src/storage/file.rs

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{event, Level};

use super::KeyValueStorage;
use crate::error::{CartError, CartResult};

/// One JSON file per key under a directory.
///
/// Writes go to a sibling temp file that is renamed over the target, so a
/// reader sees either the old snapshot or the new one, never a torn write.
#[derive(Debug, Clone)]
pub struct FileStorage {
  dir: PathBuf,
}

impl FileStorage {
  /// The directory is created lazily on first write.
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    Self { dir: dir.into() }
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }

  /// File backing `key`. Path separators in the key are flattened.
  pub fn path_for(&self, key: &str) -> PathBuf {
    let file_name: String = key
      .chars()
      .map(|c| if c == '/' || c == '\\' { '_' } else { c })
      .collect();
    self.dir.join(format!("{}.json", file_name))
  }

  fn write_atomic(&self, key: &str, value: &str) -> anyhow::Result<()> {
    fs::create_dir_all(&self.dir)
      .with_context(|| format!("creating storage directory {}", self.dir.display()))?;
    let target = self.path_for(key);
    let tmp = target.with_extension("json.tmp");
    {
      let mut file = fs::File::create(&tmp).with_context(|| format!("creating {}", tmp.display()))?;
      file.write_all(value.as_bytes())?;
      file.sync_all()?;
    }
    fs::rename(&tmp, &target).with_context(|| format!("replacing {}", target.display()))?;
    Ok(())
  }
}

impl KeyValueStorage for FileStorage {
  fn get(&self, key: &str) -> CartResult<Option<String>> {
    let path = self.path_for(key);
    match fs::read_to_string(&path) {
      Ok(contents) => Ok(Some(contents)),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(CartError::storage(key, e)),
    }
  }

  fn set(&self, key: &str, value: &str) -> CartResult<()> {
    self.write_atomic(key, value).map_err(|e| CartError::storage(key, e))?;
    event!(Level::TRACE, key, bytes = value.len(), "Wrote storage slot.");
    Ok(())
  }

  fn remove(&self, key: &str) -> CartResult<()> {
    match fs::remove_file(self.path_for(key)) {
      Ok(()) => Ok(()),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
      Err(e) => Err(CartError::storage(key, e)),
    }
  }
}
