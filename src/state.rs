use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use crate::config::AppConfig;
use crate::models::KnowledgeBase;
use crate::services::library::ConditionLibrary;
use crate::services::picker::TemplatePicker;

pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    pub config: AppConfig,
    pub knowledge: KnowledgeBase,
    pub library: ConditionLibrary,
    pub picker: Box<dyn TemplatePicker>,
}

impl AppState {
    /// Locks the session store, recovering the lock if a holder panicked.
    pub fn db(&self) -> MutexGuard<'_, Connection> {
        self.db.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("recovering poisoned session store lock");
            poisoned.into_inner()
        })
    }
}
