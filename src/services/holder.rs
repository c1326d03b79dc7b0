use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::menu::{default_menu, MenuDocument};

/// Process-scoped in-memory menu: the last written document, or the sample
/// default until something is written.
#[derive(Clone, Default)]
pub struct MenuHolder {
    inner: Arc<RwLock<Option<MenuDocument>>>,
}

impl MenuHolder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current document. A holder that is empty, or holds a zero-status
    /// document, is (re)initialized to the sample default first.
    pub async fn current(&self) -> MenuDocument {
        if let Some(doc) = self.inner.read().await.as_ref().filter(|d| d.status != 0) {
            return doc.clone();
        }

        let mut guard = self.inner.write().await;
        if guard.as_ref().map_or(true, |d| d.status == 0) {
            *guard = Some(default_menu());
        }
        guard.clone().unwrap_or_else(default_menu)
    }

    pub async fn replace(&self, doc: MenuDocument) {
        *self.inner.write().await = Some(doc);
    }
}
