//! Key-value backends the stores write through.

use super::store::StoreError;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// String blobs stored under string keys.
pub trait KeyValueBackend: Send {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// One `<key>.json` file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Uses `dir`, creating it if needed.
    pub fn new(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueBackend for FileBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(json) => Ok(Some(json)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        // The old blob stays in place until the rename
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Debug, Default)]
struct MemoryInner {
    blobs: HashMap<String, String>,
    failing: bool,
}

/// Shared in-memory map. Clones see the same data.
///
/// `set_failing(true)` makes every call return `StoreError::Unavailable`.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.failing = failing;
        }
    }

    fn with_inner<T>(
        &self,
        f: impl FnOnce(&mut MemoryInner) -> T,
    ) -> Result<T, StoreError> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| StoreError::Unavailable("memory backend poisoned".to_string()))?;
        if inner.failing {
            return Err(StoreError::Unavailable(
                "memory backend switched off".to_string(),
            ));
        }
        Ok(f(&mut inner))
    }
}

impl KeyValueBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.with_inner(|inner| inner.blobs.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.with_inner(|inner| {
            inner.blobs.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.with_inner(|inner| {
            inner.blobs.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    fn temp_dir() -> PathBuf {
        static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);
        let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        std::env::temp_dir().join(format!(
            "lakeside-backend-test-{}-{}",
            std::process::id(),
            id
        ))
    }

    #[test]
    fn test_file_backend_roundtrip() {
        let dir = temp_dir();
        let mut backend = FileBackend::new(&dir).unwrap();
        assert_eq!(backend.read("stats").unwrap(), None);

        backend.write("stats", "[1,2]").unwrap();
        assert_eq!(backend.read("stats").unwrap().as_deref(), Some("[1,2]"));
        assert!(dir.join("stats.json").exists());

        backend.remove("stats").unwrap();
        assert_eq!(backend.read("stats").unwrap(), None);
        // Removing twice is fine
        backend.remove("stats").unwrap();

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_memory_backend_clones_share_data() {
        let mut a = MemoryBackend::new();
        let b = a.clone();
        a.write("k", "v").unwrap();
        assert_eq!(b.read("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_memory_backend_failure_switch() {
        let mut backend = MemoryBackend::new();
        backend.set_failing(true);
        assert!(matches!(
            backend.write("k", "v"),
            Err(StoreError::Unavailable(_))
        ));
        backend.set_failing(false);
        assert!(backend.write("k", "v").is_ok());
    }
}
