//! Shared server state.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::AuthConfig;
use crate::store::QuestionStore;

/// State shared across request handlers.
///
/// Queries take the read lock and may run concurrently; appends take the
/// write lock, so two concurrent writes can never compute the same next
/// `qid`.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthConfig>,
    pub store: Arc<RwLock<QuestionStore>>,
}

impl AppState {
    pub fn new(auth: AuthConfig, store: QuestionStore) -> Self {
        Self {
            auth: Arc::new(auth),
            store: Arc::new(RwLock::new(store)),
        }
    }
}
