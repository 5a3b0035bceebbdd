//! Audio transcription collaborator.

use std::future::Future;

use callscript_types::collaborator::{AudioFile, FileTranscript, TranscriptionProgress};
use callscript_types::error::CollaboratorError;

/// Progress callback invoked as each file finishes.
pub type ProgressFn = dyn Fn(TranscriptionProgress) + Send + Sync;

/// Batch audio transcription.
pub trait TranscriptionService: Send + Sync {
    /// Transcribe every file, reporting per-file success or failure.
    ///
    /// A returned `Err` means the whole batch failed (e.g. the service was
    /// unreachable). Individual file failures are reported in the result
    /// list with `TranscriptionStatus::Failed`.
    fn transcribe_files(
        &self,
        files: &[AudioFile],
        progress: &ProgressFn,
    ) -> impl Future<Output = Result<Vec<FileTranscript>, CollaboratorError>> + Send;
}
