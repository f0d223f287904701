// SPDX-FileCopyrightText: 2026 FindMyTutor contributors
//
// SPDX-License-Identifier: Apache-2.0

mod file;
mod memory;

use async_trait::async_trait;

use crate::error::Result;

pub(crate) use file::File;
pub(crate) use memory::Memory;

pub(crate) trait IsPersistent {
    fn is_persistent(&self) -> bool;
}

impl<T: IsPersistent + ?Sized> IsPersistent for Box<T> {
    fn is_persistent(&self) -> bool {
        (**self).is_persistent()
    }
}

/// A string key/value store that outlives a single session, in the manner of
/// a browser's local storage.
///
/// Multi-key writes and removals are applied as one operation: a reader never
/// observes some of the entries of a `set_all` without the others.
#[async_trait]
pub(crate) trait Storage: Send + Sync + IsPersistent {
    async fn get(&mut self, key: &str) -> Result<Option<String>>;
    async fn set_all(&mut self, entries: &[(&str, &str)]) -> Result<()>;
    async fn remove_all(&mut self, keys: &[&str]) -> Result<()>;
}

#[async_trait]
impl<T: Storage + ?Sized> Storage for Box<T> {
    async fn get(&mut self, key: &str) -> Result<Option<String>> {
        (**self).get(key).await
    }

    async fn set_all(&mut self, entries: &[(&str, &str)]) -> Result<()> {
        (**self).set_all(entries).await
    }

    async fn remove_all(&mut self, keys: &[&str]) -> Result<()> {
        (**self).remove_all(keys).await
    }
}
