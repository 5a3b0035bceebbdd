//! Session scratch storage trait.
//!
//! Models browser-local storage: string values under string keys, one
//! writer, no merge. The wizard keeps exactly one blob here -- the
//! new-agent `WebsiteDraft` -- and the helpers below handle its JSON
//! encoding.

use std::future::Future;

use callscript_types::error::RepositoryError;
use callscript_types::website::WebsiteDraft;

/// Key/value scratch storage scoped to one session.
pub trait ScratchStore: Send + Sync {
    /// Read the raw value under `key`. Returns `None` if nothing is stored.
    fn get(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<String>, RepositoryError>> + Send;

    /// Store `value` under `key`, replacing any previous value.
    fn set(
        &self,
        key: &str,
        value: &str,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Remove `key`. No-op if absent.
    fn remove(&self, key: &str) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}

/// Load the website draft stored under `key`.
///
/// A blob that fails to parse is treated as absent (and logged) so a stale
/// or corrupted draft never blocks the wizard from opening.
pub async fn load_website_draft<S: ScratchStore>(
    store: &S,
    key: &str,
) -> Result<Option<WebsiteDraft>, RepositoryError> {
    let Some(raw) = store.get(key).await? else {
        return Ok(None);
    };

    match serde_json::from_str::<WebsiteDraft>(&raw) {
        Ok(draft) => Ok(Some(draft)),
        Err(err) => {
            tracing::warn!(key, error = %err, "Discarding unreadable website draft");
            Ok(None)
        }
    }
}

/// Overwrite the website draft stored under `key`.
pub async fn save_website_draft<S: ScratchStore>(
    store: &S,
    key: &str,
    draft: &WebsiteDraft,
) -> Result<(), RepositoryError> {
    let json =
        serde_json::to_string(draft).map_err(|e| RepositoryError::Serialization(e.to_string()))?;
    store.set(key, &json).await
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use callscript_types::draft::Faq;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory scratch store for tests.
    #[derive(Default)]
    pub(crate) struct MemoryScratch {
        pub(crate) entries: Mutex<HashMap<String, String>>,
    }

    impl MemoryScratch {
        pub(crate) fn raw(&self, key: &str) -> Option<String> {
            self.entries.lock().unwrap().get(key).cloned()
        }
    }

    impl ScratchStore for MemoryScratch {
        async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
            Ok(self.entries.lock().unwrap().get(key).cloned())
        }

        async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn remove(&self, key: &str) -> Result<(), RepositoryError> {
            self.entries.lock().unwrap().remove(key);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_save_then_load_website_draft() {
        let store = MemoryScratch::default();
        let draft = WebsiteDraft {
            url: "https://acme.test".to_string(),
            content: "Widgets for everyone".to_string(),
            faqs: vec![Faq::new("Do you ship?", "Yes")],
            business_context: "Widget maker".to_string(),
            tasks: String::new(),
            is_loaded: true,
        };

        save_website_draft(&store, "draft", &draft).await.unwrap();
        let raw = store.raw("draft").unwrap();
        assert!(raw.contains("\"isLoaded\":true"));

        let loaded = load_website_draft(&store, "draft").await.unwrap();
        assert_eq!(loaded, Some(draft));
    }

    #[tokio::test]
    async fn test_load_missing_draft_is_none() {
        let store = MemoryScratch::default();
        assert_eq!(load_website_draft(&store, "draft").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_load_corrupt_draft_is_none() {
        let store = MemoryScratch::default();
        store.set("draft", "{not json").await.unwrap();
        assert_eq!(load_website_draft(&store, "draft").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let store = MemoryScratch::default();
        let first = WebsiteDraft {
            url: "https://one.test".to_string(),
            ..Default::default()
        };
        let second = WebsiteDraft {
            url: "https://two.test".to_string(),
            ..Default::default()
        };
        save_website_draft(&store, "draft", &first).await.unwrap();
        save_website_draft(&store, "draft", &second).await.unwrap();

        let loaded = load_website_draft(&store, "draft").await.unwrap().unwrap();
        assert_eq!(loaded.url, "https://two.test");
    }
}
