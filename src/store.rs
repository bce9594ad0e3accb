//! Handle on the local SQLite store.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;
use rusqlite::{Connection, OpenFlags};

/// An open connection to the store file. The connection is released on
/// [`LocalStore::close`] or when the handle is dropped.
pub struct LocalStore {
    path: PathBuf,
    conn: Connection,
}

impl LocalStore {
    /// Opens the store read/write, creating the file if it doesn't exist.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
        )
        .with_context(|| format!("Failed to open store `{}`", path.display()))?;
        debug!("Opened store {}", path.display());

        Ok(LocalStore {
            path: path.to_path_buf(),
            conn,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn sqlite_version(&self) -> Result<String> {
        Ok(self
            .connection()
            .query_row("SELECT sqlite_version()", [], |row| row.get(0))?)
    }

    /// Closes the connection, reporting any error SQLite raises while doing so.
    pub fn close(self) -> Result<()> {
        let path = self.path;
        self.conn
            .close()
            .map_err(|(_, e)| e)
            .with_context(|| format!("Failed to close store `{}`", path.display()))?;
        debug!("Closed store {}", path.display());

        Ok(())
    }
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn should_create_store_file() {
        let tmp_dir = TempDir::new().unwrap();
        let db_path = tmp_dir.path().join("collect.sqlite");

        let store = LocalStore::open(&db_path).unwrap();
        store
            .connection()
            .execute_batch("CREATE TABLE probe (id INTEGER PRIMARY KEY)")
            .unwrap();

        assert_eq!(store.path(), db_path.as_path());
        assert!(!store.sqlite_version().unwrap().is_empty());
        store.close().unwrap();
        assert!(db_path.exists());
    }

    #[test]
    fn should_reopen_existing_store() {
        let tmp_dir = TempDir::new().unwrap();
        let db_path = tmp_dir.path().join("collect.sqlite");

        let store = LocalStore::open(&db_path).unwrap();
        store
            .connection()
            .execute_batch("CREATE TABLE readings (value TEXT); INSERT INTO readings VALUES ('x');")
            .unwrap();
        store.close().unwrap();

        let store = LocalStore::open(&db_path).unwrap();
        let count: i64 = store
            .connection()
            .query_row("SELECT COUNT(*) FROM readings", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn should_fail_for_missing_directory() {
        let tmp_dir = TempDir::new().unwrap();
        let db_path = tmp_dir.path().join("missing").join("collect.sqlite");

        assert!(LocalStore::open(&db_path).is_err());
    }
}
