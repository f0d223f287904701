// SPDX-FileCopyrightText: 2026 FindMyTutor contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;

use super::{IsPersistent, Storage};

/// In-process storage. Clones share the same underlying map, which lets two
/// sessions observe each other's writes the way two tabs share local storage.
#[derive(Clone)]
pub(crate) struct Memory {
    data: Arc<RwLock<HashMap<String, String>>>,
}

impl Memory {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

impl IsPersistent for Memory {
    fn is_persistent(&self) -> bool {
        false
    }
}

#[async_trait]
impl Storage for Memory {
    async fn get(&mut self, key: &str) -> Result<Option<String>> {
        let data = Arc::clone(&self.data);
        let guard = data.read().await;
        Ok(guard.get(key).cloned())
    }

    async fn set_all(&mut self, entries: &[(&str, &str)]) -> Result<()> {
        let target_data = Arc::clone(&self.data);
        let mut guard = target_data.write_owned().await;
        for &(key, value) in entries {
            let _previous = guard.insert(key.to_owned(), value.to_owned());
        }
        Ok(())
    }

    async fn remove_all(&mut self, keys: &[&str]) -> Result<()> {
        let target_data = Arc::clone(&self.data);
        let mut guard = target_data.write_owned().await;
        for key in keys {
            let _previous = guard.remove(*key);
        }
        Ok(())
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}
