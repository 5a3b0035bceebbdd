//! Scratch-store adapters.
//!
//! Implements the `ScratchStore` trait from `callscript-core`: a file-backed
//! store for hosts with a writable session directory, and an in-memory
//! store for everything else.

pub mod file;
pub mod memory;

use callscript_types::error::RepositoryError;

pub use file::FileScratchStore;
pub use memory::MemoryScratchStore;

/// Reject keys that are empty or could escape the store's namespace.
pub(crate) fn validate_key(key: &str) -> Result<(), RepositoryError> {
    let trimmed = key.trim();
    if trimmed.is_empty()
        || trimmed != key
        || key.contains(['/', '\\'])
        || key.contains("..")
    {
        return Err(RepositoryError::InvalidKey(key.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("new_agent_website_draft").is_ok());
        assert!(validate_key("draft-2").is_ok());

        for bad in ["", "  ", " padded", "../escape", "a/b", "a\\b", "..hidden"] {
            assert!(
                matches!(validate_key(bad), Err(RepositoryError::InvalidKey(_))),
                "{bad:?} should be rejected"
            );
        }
    }
}
