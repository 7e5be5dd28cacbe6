use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use super::StoreError;

/// Exclusive advisory lock on `<table>.lock`, released on drop.
pub(super) struct TableLock {
    file: File,
    path: PathBuf,
}

impl TableLock {
    pub(super) fn acquire(table_path: &Path) -> Result<Self, StoreError> {
        let path = lock_path(table_path);

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|e| StoreError::io(&path, e))?;

        FileExt::lock_exclusive(&file).map_err(|source| StoreError::Lock {
            path: path.clone(),
            source,
        })?;

        Ok(Self { file, path })
    }
}

impl Drop for TableLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to release table lock");
        }
    }
}

fn lock_path(table_path: &Path) -> PathBuf {
    let mut name = table_path.as_os_str().to_owned();
    name.push(".lock");
    PathBuf::from(name)
}
