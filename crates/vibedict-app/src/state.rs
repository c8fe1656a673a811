use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use vibedict_config::Config;
use vibedict_core::state::{Library, StateStore};
use vibedict_gemini::LanguageService;
use vibedict_types::ChatMessage;

pub type SharedLibrary = Library<Box<dyn StateStore>>;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub library: Mutex<SharedLibrary>,
    pub service: Arc<dyn LanguageService>,
    /// Chat history per word, kept for the session only
    pub chats: Mutex<HashMap<String, Vec<ChatMessage>>>,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Box<dyn StateStore>,
        service: Arc<dyn LanguageService>,
    ) -> Self {
        let metadata = service.metadata();
        tracing::info!(
            "Using {} ({}) for language services",
            metadata.name,
            metadata.text_model
        );

        if metadata.requires_api_key && config.gemini.api_key.is_empty() {
            tracing::warn!("No API key configured, service calls will fail");
        }

        Self {
            config: Arc::new(RwLock::new(config)),
            library: Mutex::new(Library::open(store)),
            service,
            chats: Mutex::new(HashMap::new()),
        }
    }
}
