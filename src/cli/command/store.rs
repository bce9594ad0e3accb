use anyhow::Result;

use crate::{config::Config, store::LocalStore};

pub fn store(config: &Config) -> Result<String> {
    let store = LocalStore::open(&config.db_path)?;
    let version = store.sqlite_version()?;
    let path = store.path().display().to_string();
    store.close()?;

    Ok(format!("Store `{path}` is ready (SQLite {version})"))
}

// -- Tests -------------------------------------------------------------------
