use crate::{
    error::{KanbanError, Result},
    storage::KeyValueStore,
};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// File-based key-value medium: one JSON file per key
pub struct FileStore {
    root_path: PathBuf,
}

impl FileStore {
    const EXTENSION: &'static str = "json";

    /// Creates a new FileStore rooted at the given directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root_path: root.as_ref().to_path_buf(),
        }
    }

    fn entry_file(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if !valid {
            return Err(KanbanError::InvalidStorageKey(key.to_string()));
        }
        Ok(self
            .root_path
            .join(format!("{}.{}", key, Self::EXTENSION)))
    }

    fn ensure_directory_exists(&self) -> Result<()> {
        if !self.root_path.exists() {
            fs::create_dir_all(&self.root_path)?;
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let file_path = self.entry_file(key)?;

        match fs::read_to_string(&file_path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(KanbanError::StorageRead(format!(
                "{}: {}",
                file_path.display(),
                e
            ))),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let file_path = self.entry_file(key)?;
        let write = || -> io::Result<()> {
            // Readers only ever see a complete file
            let tmp_path = file_path.with_extension("json.tmp");
            fs::write(&tmp_path, value)?;
            fs::rename(&tmp_path, &file_path)
        };

        self.ensure_directory_exists()
            .map_err(|e| KanbanError::StorageWrite(e.to_string()))?;
        write().map_err(|e| KanbanError::StorageWrite(format!("{}: {}", file_path.display(), e)))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let file_path = self.entry_file(key)?;

        match fs::remove_file(&file_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(KanbanError::StorageWrite(format!(
                "{}: {}",
                file_path.display(),
                e
            ))),
        }
    }
}
