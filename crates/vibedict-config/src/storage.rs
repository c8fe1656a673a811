use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Key under which the whole application document is stored
pub const STATE_KEY: &str = "vibedict_state";

fn default_path() -> PathBuf {
    PathBuf::from("vibedict_state.json")
}

fn default_key() -> String {
    STATE_KEY.to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    #[serde(default = "default_path")]
    pub path: PathBuf,
    #[serde(default = "default_key")]
    pub key: String,
}

impl StorageConfig {
    pub fn new() -> Self {
        let path = env::var("VIBEDICT_STATE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_path());

        Self {
            path,
            key: default_key(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            key: default_key(),
        }
    }
}
