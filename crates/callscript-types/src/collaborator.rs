//! Request and response shapes exchanged with external collaborators
//! (generation, website extraction, transcription).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::draft::{CallDirection, DynamicVariable, Faq, VoiceSelection};

/// Input to Generate-Prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptGenerationRequest {
    pub description: String,
    pub agent_name: String,
    pub company_name: String,
    pub role: String,
    pub industry: String,
    pub variables: Vec<DynamicVariable>,
    pub voice: Option<VoiceSelection>,
    pub call_direction: Option<CallDirection>,
}

/// Output of Generate-Prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedPrompt {
    pub full_text: String,
    /// Section key -> body, keyed like `SectionKind::key`.
    #[serde(default)]
    pub sections: BTreeMap<String, String>,
    #[serde(default)]
    pub variables: Option<Vec<DynamicVariable>>,
    #[serde(default)]
    pub company_info: Option<String>,
}

/// Output of Scrape-Website.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedWebsite {
    pub content: String,
}

/// Output of Generate-FAQs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqGeneration {
    pub business_context: String,
    pub faqs: Vec<Faq>,
}

/// Input to Generate-Tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskGenerationRequest {
    pub description: String,
    pub company_description: String,
    pub business_context: String,
    pub role: String,
}

/// Input to Generate-Conversation-Flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowGenerationRequest {
    pub tasks: String,
    pub agent_name: String,
    pub company_name: String,
    pub role: String,
    pub call_direction: Option<CallDirection>,
}

/// An audio file queued for transcription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl AudioFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Lowercased extension without the dot, if any.
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.file_name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_lowercase())
    }
}

/// Per-file transcription status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptionStatus {
    Success,
    Failed,
}

/// Per-file transcription result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTranscript {
    pub file_name: String,
    pub status: TranscriptionStatus,
    #[serde(default)]
    pub transcript: String,
    #[serde(default)]
    pub error: Option<String>,
}

impl FileTranscript {
    pub fn success(file_name: impl Into<String>, transcript: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            status: TranscriptionStatus::Success,
            transcript: transcript.into(),
            error: None,
        }
    }

    pub fn failed(file_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            status: TranscriptionStatus::Failed,
            transcript: String::new(),
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == TranscriptionStatus::Success
    }
}

/// Progress report emitted while files are transcribed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionProgress {
    pub file_name: String,
    pub completed: usize,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_extension() {
        assert_eq!(AudioFile::new("call.MP3", vec![]).extension().as_deref(), Some("mp3"));
        assert_eq!(AudioFile::new("a.b.wav", vec![]).extension().as_deref(), Some("wav"));
        assert_eq!(AudioFile::new("noext", vec![]).extension(), None);
        assert_eq!(AudioFile::new(".hidden", vec![]).extension(), None);
        assert_eq!(AudioFile::new("trailing.", vec![]).extension(), None);
    }

    #[test]
    fn test_generated_prompt_deserializes_minimal() {
        let generated: GeneratedPrompt =
            serde_json::from_str(r#"{"full_text":"hello"}"#).unwrap();
        assert_eq!(generated.full_text, "hello");
        assert!(generated.sections.is_empty());
        assert!(generated.variables.is_none());
        assert!(generated.company_info.is_none());
    }

    #[test]
    fn test_file_transcript_constructors() {
        let ok = FileTranscript::success("a.mp3", "hi");
        assert!(ok.is_success());
        assert!(ok.error.is_none());

        let failed = FileTranscript::failed("b.mp3", "corrupt");
        assert!(!failed.is_success());
        assert_eq!(failed.error.as_deref(), Some("corrupt"));
    }
}
