//! In-memory `ScratchStore` backed by a `DashMap`.

use dashmap::DashMap;

use callscript_core::repository::scratch::ScratchStore;
use callscript_types::error::RepositoryError;

use super::validate_key;

/// Process-local scratch storage. Contents vanish with the process, which
/// matches the lifetime of a single browser session.
#[derive(Debug, Default)]
pub struct MemoryScratchStore {
    entries: DashMap<String, String>,
}

impl MemoryScratchStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ScratchStore for MemoryScratchStore {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        validate_key(key)?;
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        validate_key(key)?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), RepositoryError> {
        validate_key(key)?;
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use callscript_core::repository::scratch::{load_website_draft, save_website_draft};
    use callscript_types::website::WebsiteDraft;

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = MemoryScratchStore::new();
        assert_eq!(store.get("draft").await.unwrap(), None);

        store.set("draft", "one").await.unwrap();
        store.set("draft", "two").await.unwrap();
        assert_eq!(store.get("draft").await.unwrap().as_deref(), Some("two"));
        assert_eq!(store.len(), 1);

        store.remove("draft").await.unwrap();
        store.remove("draft").await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_website_draft_helpers() {
        let store = MemoryScratchStore::new();
        let draft = WebsiteDraft {
            url: "https://acme.test".to_string(),
            is_loaded: true,
            ..Default::default()
        };
        save_website_draft(&store, "site", &draft).await.unwrap();
        assert_eq!(load_website_draft(&store, "site").await.unwrap(), Some(draft));
    }

    #[tokio::test]
    async fn test_invalid_key_rejected() {
        let store = MemoryScratchStore::new();
        assert!(matches!(
            store.set("../x", "v").await,
            Err(RepositoryError::InvalidKey(_))
        ));
    }
}
