// SPDX-FileCopyrightText: 2026 FindMyTutor contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use log::{debug, warn};

use crate::{
    error::{Error, Result},
    metadata,
};

use super::{IsPersistent, Storage};

type Entries = BTreeMap<String, String>;

/// Storage backed by a single JSON object on disk.
pub(crate) struct File {
    path: PathBuf,
}

impl File {
    pub(crate) fn new<P: AsRef<Path>>(file: P) -> Option<Self> {
        metadata::PROJECT_DIRS
            .as_ref()
            .map(|dirs| Self::with_path(dirs.data_dir().join(file)))
    }

    pub(crate) fn with_path<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<Entries> {
        match fs::File::open(&self.path) {
            Ok(fp) => Ok(serde_json::from_reader::<fs::File, Entries>(fp)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Entries::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Loads the entries about to be updated. A file that is not a JSON object
    /// of strings is replaced rather than repaired.
    fn load_for_update(&self) -> Result<Entries> {
        match self.load() {
            Err(Error::Json(e)) => {
                warn!("Overwriting malformed session file {}: {}", self.path.display(), e);
                Ok(Entries::new())
            }
            other => other,
        }
    }

    fn store(&self, entries: &Entries) -> Result<()> {
        if entries.is_empty() {
            return match fs::remove_file(&self.path) {
                Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
                _ => Ok(()),
            };
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write beside the target and rename over it so readers see either
        // the old object or the new one.
        let staging = self.path.with_extension("json.tmp");
        if let Err(e) = write_staged(&staging, &self.path, entries) {
            if let Err(cleanup) = fs::remove_file(&staging) {
                debug!("Could not remove {}: {}", staging.display(), cleanup);
            }
            return Err(e);
        }
        debug!("Wrote {} session entries to {}", entries.len(), self.path.display());
        Ok(())
    }
}

fn write_staged(staging: &Path, target: &Path, entries: &Entries) -> Result<()> {
    let file = fs::File::create(staging)?;
    serde_json::to_writer(file, entries)?;
    fs::rename(staging, target)?;
    Ok(())
}

impl IsPersistent for File {
    fn is_persistent(&self) -> bool {
        true
    }
}

#[async_trait]
impl Storage for File {
    async fn get(&mut self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    async fn set_all(&mut self, entries: &[(&str, &str)]) -> Result<()> {
        let mut current = self.load_for_update()?;
        for &(key, value) in entries {
            let _previous = current.insert(key.to_owned(), value.to_owned());
        }
        self.store(&current)
    }

    async fn remove_all(&mut self, keys: &[&str]) -> Result<()> {
        let mut current = self.load_for_update()?;
        for key in keys {
            let _previous = current.remove(*key);
        }
        self.store(&current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_reads_as_empty() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mut storage = File::with_path(dir.path().join("session.json"));
        assert_eq!(storage.get("user").await?, None);
        assert!(storage.is_persistent());
        Ok(())
    }

    #[tokio::test]
    async fn entries_survive_a_new_handle() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested").join("session.json");

        File::with_path(&path)
            .set_all(&[("user", r#"{"id":7}"#), ("role", "ADMIN")])
            .await?;

        let mut reopened = File::with_path(&path);
        assert_eq!(reopened.get("user").await?.as_deref(), Some(r#"{"id":7}"#));
        assert_eq!(reopened.get("role").await?.as_deref(), Some("ADMIN"));
        Ok(())
    }

    #[tokio::test]
    async fn removing_every_key_removes_the_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("session.json");
        let mut storage = File::with_path(&path);

        storage.set_all(&[("user", "{}"), ("role", "TUTOR")]).await?;
        storage.remove_all(&["user", "role"]).await?;
        assert!(!path.exists());

        storage.remove_all(&["user", "role"]).await?;
        Ok(())
    }

    #[tokio::test]
    async fn malformed_file_is_an_error_until_overwritten() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("session.json");
        fs::write(&path, "[1, 2, 3]")?;

        let mut storage = File::with_path(&path);
        assert!(matches!(storage.get("role").await, Err(Error::Json(_))));

        storage.set_all(&[("role", "STUDENT")]).await?;
        assert_eq!(storage.get("role").await?.as_deref(), Some("STUDENT"));
        Ok(())
    }

    #[tokio::test]
    async fn unreadable_file_is_not_overwritten() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("session.json");
        fs::create_dir(&path)?;

        let mut storage = File::with_path(&path);
        assert!(matches!(
            storage.set_all(&[("role", "STUDENT")]).await,
            Err(Error::Io(_))
        ));
        assert!(matches!(storage.remove_all(&["role"]).await, Err(Error::Io(_))));
        assert!(path.is_dir());
        Ok(())
    }

    #[test]
    fn failed_write_leaves_no_staging_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("session.json");
        fs::create_dir(&path)?;
        fs::write(path.join("occupied"), "x")?;

        let storage = File::with_path(&path);
        let entries = Entries::from([("role".to_owned(), "TUTOR".to_owned())]);
        assert!(storage.store(&entries).is_err());
        assert!(!path.with_extension("json.tmp").exists());
        Ok(())
    }
}
