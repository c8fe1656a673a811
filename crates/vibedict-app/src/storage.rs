use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use vibedict_config::storage::StorageConfig;
use vibedict_core::CoreError;
use vibedict_core::state::StateStore;
use vibedict_types::StoredState;

/// Keeps the application document under one key of a JSON object file.
/// Other keys in the same file are preserved on save.
pub struct JsonFileStore {
    path: PathBuf,
    key: String,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.path.clone(), config.key.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<Option<Map<String, Value>>, CoreError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let data = fs::read_to_string(&self.path)?;
        match serde_json::from_str(&data)? {
            Value::Object(map) => Ok(Some(map)),
            _ => Err(CoreError::Storage(format!(
                "{} does not hold a JSON object",
                self.path.display()
            ))),
        }
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> Result<Option<StoredState>, CoreError> {
        let Some(mut document) = self.read_document()? else {
            return Ok(None);
        };

        match document.remove(&self.key) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    fn save(&self, state: &StoredState) -> Result<(), CoreError> {
        // an unreadable file is replaced rather than blocking every save
        let mut document = self.read_document().unwrap_or_else(|e| {
            tracing::warn!("Overwriting unreadable state file: {}", e);
            None
        });
        let document = document.get_or_insert_with(Map::new);
        document.insert(self.key.clone(), serde_json::to_value(state)?);

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(&*document)?)?;
        fs::rename(&tmp, &self.path)?;

        tracing::debug!("State written to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use vibedict_config::languages;

    use super::*;

    fn state() -> StoredState {
        StoredState::new(languages::default_native(), languages::default_target())
    }

    #[test]
    fn missing_file_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("state.json"), "vibedict_state");
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_then_load_under_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");
        let store = JsonFileStore::new(&path, "vibedict_state");

        let mut saved = state();
        saved.setup_complete = true;
        store.save(&saved).unwrap();

        let raw: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["vibedict_state"]["setupComplete"], true);

        let loaded = store.load().unwrap().unwrap();
        assert!(loaded.setup_complete);
        assert_eq!(loaded.native_lang, saved.native_lang);
    }

    #[test]
    fn other_keys_survive_a_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, r#"{ "theme": "dark" }"#).unwrap();

        let store = JsonFileStore::new(&path, "vibedict_state");
        store.save(&state()).unwrap();

        let raw: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["theme"], "dark");
        assert!(raw.get("vibedict_state").is_some());
    }

    #[test]
    fn corrupt_file_is_an_error_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "[1, 2").unwrap();

        let store = JsonFileStore::new(&path, "vibedict_state");
        assert!(store.load().is_err());

        store.save(&state()).unwrap();
        assert!(store.load().unwrap().is_some());
    }
}
