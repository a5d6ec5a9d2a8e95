//! Store backends.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::Store;

/// Pretty JSON file, fully rewritten on every save.
#[derive(Debug, Clone)]
pub struct JsonFileStore<T> {
    path: PathBuf,
    _value: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _value: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T> Store<T> for JsonFileStore<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    fn load(&self) -> T {
        let bytes = match std::fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return T::default(),
            Err(e) => {
                tracing::warn!("could not read {}: {}; starting empty", self.path.display(), e);
                return T::default();
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(v) => v,
            Err(e) => {
                let aside = corrupt_path(&self.path);
                match std::fs::rename(&self.path, &aside) {
                    Ok(()) => tracing::warn!(
                        "could not parse {}: {}; moved to {} and starting empty",
                        self.path.display(),
                        e,
                        aside.display()
                    ),
                    Err(re) => tracing::error!(
                        "could not parse {}: {}; could not move it aside: {}",
                        self.path.display(),
                        e,
                        re
                    ),
                }
                T::default()
            }
        }
    }

    fn save(&self, value: &T) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir: {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(value)
            .with_context(|| format!("serialize {}", self.path.display()))?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("write {}", self.path.display()))?;
        Ok(())
    }
}

/// `<path>.corrupt`, where an unparsable file is kept so the next save cannot clobber it.
fn corrupt_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".corrupt");
    PathBuf::from(name)
}

/// Process-local store.
#[derive(Debug, Default)]
pub struct MemoryStore<T> {
    value: Mutex<T>,
}

impl<T> MemoryStore<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Mutex::new(value),
        }
    }
}

impl<T> Store<T> for MemoryStore<T>
where
    T: Clone + Default,
{
    fn load(&self) -> T {
        self.value.lock().map(|v| v.clone()).unwrap_or_default()
    }

    fn save(&self, value: &T) -> Result<()> {
        let mut guard = self
            .value
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))?;
        *guard = value.clone();
        Ok(())
    }
}
