//! CSV-backed tables for contact messages and favorite recipes.
//!
//! Each table is a single file with a fixed header row. Mutations read the
//! whole table, append in memory and rewrite the file. Every cycle holds an
//! exclusive advisory lock on a sidecar `.lock` file so two writers in the
//! same or different processes cannot interleave.

mod lock;

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{ContactMessage, FavoriteRecipe};
use lock::TableLock;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: csv::Error },

    #[error("{} is missing column {column}", .path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("Failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: csv::Error },

    #[error("Failed to lock {}: {source}", .path.display())]
    Lock { path: PathBuf, source: io::Error },

    #[error("I/O error on {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("Storage task failed: {0}")]
    Task(String),
}

impl StoreError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// True when the table exists but could not be parsed.
    #[must_use]
    pub const fn is_corrupt(&self) -> bool {
        matches!(self, Self::Read { .. } | Self::MissingColumn { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Contacts,
    Favorites,
}

impl TableKind {
    pub const ALL: [Self; 2] = [Self::Contacts, Self::Favorites];

    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Contacts => "contacts.csv",
            Self::Favorites => "favorites.csv",
        }
    }

    #[must_use]
    pub const fn headers(self) -> &'static [&'static str] {
        match self {
            Self::Contacts => &["Name", "Email", "Message"],
            Self::Favorites => &["Title", "Image", "URL", "Ingredients"],
        }
    }
}

/// A row type that lives in one of the tables.
pub trait Record: Serialize + DeserializeOwned + Send + 'static {
    const KIND: TableKind;
}

impl Record for ContactMessage {
    const KIND: TableKind = TableKind::Contacts;
}

impl Record for FavoriteRecipe {
    const KIND: TableKind = TableKind::Favorites;
}

#[derive(Debug, Clone)]
pub struct FlatFileStore {
    dir: PathBuf,
}

impl FlatFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn path(&self, kind: TableKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }

    /// Creates the data directory and a header-only file for every missing table.
    pub fn initialize(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::io(&self.dir, e))?;

        for kind in TableKind::ALL {
            let path = self.path(kind);
            let _guard = TableLock::acquire(&path)?;
            if !path.exists() {
                write_table::<FavoriteRecipe>(&path, kind, &[])?;
                info!(path = %path.display(), "Created empty table");
            }
        }

        Ok(())
    }

    /// Returns every row of `R`'s table in file order. A missing file is an empty table.
    pub fn load<R: Record>(&self) -> Result<Vec<R>, StoreError> {
        let path = self.path(R::KIND);
        let _guard = TableLock::acquire(&path)?;
        read_table(&path, R::KIND)
    }

    /// Appends one row and rewrites the whole table.
    pub fn append<R: Record>(&self, record: R) -> Result<(), StoreError> {
        let path = self.path(R::KIND);
        let _guard = TableLock::acquire(&path)?;

        let mut rows: Vec<R> = read_table(&path, R::KIND)?;
        rows.push(record);
        write_table(&path, R::KIND, &rows)?;

        debug!(path = %path.display(), rows = rows.len(), "Appended row");
        Ok(())
    }

    /// Exact match on the `Title` column of the favorites table.
    pub fn contains_favorite(&self, title: &str) -> Result<bool, StoreError> {
        let favorites: Vec<FavoriteRecipe> = self.load()?;
        Ok(favorites.iter().any(|f| f.title == title))
    }

    /// Appends `favorite` unless its title is already present, in one locked cycle.
    ///
    /// Returns `false` when the title was already taken.
    pub fn insert_favorite(&self, favorite: FavoriteRecipe) -> Result<bool, StoreError> {
        let path = self.path(TableKind::Favorites);
        let _guard = TableLock::acquire(&path)?;

        let mut rows: Vec<FavoriteRecipe> = read_table(&path, TableKind::Favorites)?;
        if rows.iter().any(|f| f.title == favorite.title) {
            return Ok(false);
        }

        rows.push(favorite);
        write_table(&path, TableKind::Favorites, &rows)?;
        Ok(true)
    }

    /// Runs a store operation on the blocking pool.
    pub async fn run<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Self) -> Result<T, StoreError> + Send + 'static,
    {
        let store = self.clone();
        tokio::task::spawn_blocking(move || op(&store))
            .await
            .map_err(|e| StoreError::Task(e.to_string()))?
    }
}

fn read_table<R: DeserializeOwned>(path: &Path, kind: TableKind) -> Result<Vec<R>, StoreError> {
    match fs::metadata(path) {
        Ok(meta) if meta.len() == 0 => return Ok(Vec::new()),
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(StoreError::io(path, e)),
    }

    let read_err = |source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(read_err)?;

    let headers = reader.headers().map_err(read_err)?.clone();
    for &column in kind.headers() {
        if !headers.iter().any(|h| h == column) {
            return Err(StoreError::MissingColumn {
                path: path.to_path_buf(),
                column,
            });
        }
    }

    reader
        .deserialize()
        .collect::<Result<Vec<R>, _>>()
        .map_err(read_err)
}

/// Writes header plus rows to a temp file, then renames it over `path`.
///
/// The header comes from `kind`, so an empty `rows` still yields a valid table.
fn write_table<R: Serialize>(path: &Path, kind: TableKind, rows: &[R]) -> Result<(), StoreError> {
    let tmp_path = path.with_extension("csv.tmp");
    let write_err = |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&tmp_path)
        .map_err(write_err)?;

    writer.write_record(kind.headers()).map_err(write_err)?;
    for row in rows {
        writer.serialize(row).map_err(write_err)?;
    }
    writer
        .flush()
        .map_err(|e| StoreError::io(&tmp_path, e))?;
    drop(writer);

    fs::rename(&tmp_path, path).map_err(|e| StoreError::io(path, e))
}
