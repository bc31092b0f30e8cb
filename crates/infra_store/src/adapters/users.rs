//! JSON file adapter for the user directory
//!
//! Implements `UserStorePort` over a single file holding a JSON array of
//! accounts.
//!
//! - A missing or blank file loads as an empty list
//! - Malformed content is reported as `PortError::Transformation`
//! - Saves write a sibling temp file and rename it over the target, so a
//!   crash mid-write leaves the previous contents intact

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use core_kernel::{DomainPort, PortError};
use domain_directory::{User, UserStorePort};

use crate::error::StoreError;

/// File-backed user store
#[derive(Debug, Clone)]
pub struct JsonFileUserStore {
    path: PathBuf,
}

impl JsonFileUserStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "users.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn read(&self) -> Result<Vec<User>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Users file does not exist yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&contents).map_err(|e| StoreError::malformed(&self.path, e))
    }

    fn write(&self, users: &[User]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let json = serde_json::to_string_pretty(users)?;
        let temp = self.temp_path();

        let mut file = fs::File::create(&temp).map_err(|e| StoreError::io(&temp, e))?;
        file.write_all(json.as_bytes())
            .and_then(|_| file.sync_all())
            .map_err(|e| StoreError::io(&temp, e))?;
        drop(file);

        fs::rename(&temp, &self.path).map_err(|e| StoreError::io(&self.path, e))
    }
}

impl DomainPort for JsonFileUserStore {}

impl UserStorePort for JsonFileUserStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<Vec<User>, PortError> {
        let users = self.read()?;
        debug!(count = users.len(), "Loaded users file");
        Ok(users)
    }

    #[instrument(skip(self, users), fields(path = %self.path.display(), count = users.len()))]
    fn save(&self, users: &[User]) -> Result<(), PortError> {
        self.write(users)?;
        debug!("Saved users file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_path_is_sibling() {
        let store = JsonFileUserStore::new("data/users.json");
        assert_eq!(store.temp_path(), PathBuf::from("data/users.json.tmp"));
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileUserStore::new(dir.path().join("absent.json"));
        assert!(store.load().unwrap().is_empty());
    }
}
