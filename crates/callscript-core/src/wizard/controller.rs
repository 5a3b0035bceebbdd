//! `WizardController`: orchestrates one wizard instance.
//!
//! The controller owns a `WizardSession` behind a `tokio::sync::Mutex` and
//! the collaborator ports. Every asynchronous operation follows the same
//! shape:
//!
//! 1. Lock, check liveness/auth, mark the operation pending, snapshot the
//!    request from the draft, unlock.
//! 2. Await the collaborator without holding the lock, so the draft stays
//!    editable and other operations can run.
//! 3. Re-lock, clear the pending mark and re-check liveness. A closed
//!    wizard discards the result.
//! 4. Apply the result (or surface a notice) and unlock.

use tokio::sync::{Mutex, MutexGuard};

use callscript_types::agent::{AgentRecord, CallerContext};
use callscript_types::collaborator::{
    AudioFile, FileTranscript, FlowGenerationRequest, GeneratedPrompt, PromptGenerationRequest,
    TaskGenerationRequest,
};
use callscript_types::config::WizardConfig;
use callscript_types::draft::{AgentDraft, CallDirection, VoiceSelection};
use callscript_types::error::{NavigationError, WizardError};
use callscript_types::navigation::NavigationPosition;
use callscript_types::prompt::SectionKind;
use callscript_types::validation::FieldId;
use callscript_types::website::WebsiteDraft;
use callscript_types::wizard::{ExitDecision, Notice, Operation, StepOutcome, WizardMode};

use crate::collaborator::generation::GenerationService;
use crate::collaborator::transcription::{ProgressFn, TranscriptionService};
use crate::repository::agent::AgentRepository;
use crate::repository::scratch::{ScratchStore, load_website_draft, save_website_draft};

use super::assembler::{self, PromptVariant};
use super::change_detector::{self, ChangeReason};
use super::decomposer;
use super::navigation::{self, Advance};
use super::payload::build_payload;
use super::session::WizardSession;
use super::validation::ValidationState;

/// Divider inserted between transcripts appended to the description.
pub const TRANSCRIPT_DIVIDER: &str = "--- Call Transcript ---";

/// The external collaborators one wizard talks to.
pub struct WizardPorts<G, T, A, S> {
    pub generation: G,
    pub transcription: T,
    pub agents: A,
    pub scratch: S,
}

/// How far a website import got.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebsiteLoad {
    /// Content scraped and FAQs generated.
    Complete { faqs: usize },
    /// Content scraped but FAQ generation failed; the content is kept.
    ContentOnly { error: String },
}

/// Single-instance wizard controller.
pub struct WizardController<G, T, A, S> {
    ports: WizardPorts<G, T, A, S>,
    config: WizardConfig,
    caller: CallerContext,
    session: Mutex<WizardSession>,
    /// Serializes scratch writes with scratch clears. Always taken before
    /// `session`, never while holding it.
    scratch_lock: Mutex<()>,
}

impl<G, T, A, S> WizardController<G, T, A, S>
where
    G: GenerationService,
    T: TranscriptionService,
    A: AgentRepository,
    S: ScratchStore,
{
    /// Open a wizard for a new agent.
    ///
    /// Restores a website draft left in scratch storage by an earlier,
    /// unsubmitted attempt in the same session.
    pub async fn open_new(
        ports: WizardPorts<G, T, A, S>,
        config: WizardConfig,
        caller: CallerContext,
    ) -> Self {
        let mut session = WizardSession::new(WizardMode::Create, AgentDraft::default());

        match load_website_draft(&ports.scratch, &config.scratch_key).await {
            Ok(Some(website)) => {
                tracing::debug!(url = %website.url, "Restored website draft from scratch storage");
                session.draft.faqs = website.faqs.clone();
                session.draft.tasks = website.tasks.clone();
                session.website = website;
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, "Could not read website draft; starting without it");
            }
        }

        Self {
            ports,
            config,
            caller,
            session: Mutex::new(session),
            scratch_lock: Mutex::new(()),
        }
    }

    /// Open a wizard pre-populated from an existing agent.
    pub fn open_edit(
        ports: WizardPorts<G, T, A, S>,
        config: WizardConfig,
        caller: CallerContext,
        record: &AgentRecord,
    ) -> Self {
        let draft = decomposer::draft_from_record(record);
        let mode = WizardMode::Edit {
            agent_id: record.id.clone(),
        };
        tracing::debug!(agent_id = %record.id, "Opened wizard in edit mode");

        Self {
            ports,
            config,
            caller,
            session: Mutex::new(WizardSession::new(mode, draft)),
            scratch_lock: Mutex::new(()),
        }
    }

    // -----------------------------------------------------------------------
    // Read access
    // -----------------------------------------------------------------------

    pub async fn draft(&self) -> AgentDraft {
        self.session.lock().await.draft.clone()
    }

    pub async fn position(&self) -> NavigationPosition {
        self.session.lock().await.position
    }

    pub async fn mode(&self) -> WizardMode {
        self.session.lock().await.mode.clone()
    }

    pub async fn website(&self) -> WebsiteDraft {
        self.session.lock().await.website.clone()
    }

    pub async fn validation(&self) -> ValidationState {
        self.session.lock().await.validation.clone()
    }

    pub async fn is_alive(&self) -> bool {
        self.session.lock().await.is_alive()
    }

    /// Whether `op` is in flight (the UI disables its trigger).
    pub async fn is_pending(&self, op: Operation) -> bool {
        self.session.lock().await.is_pending(op)
    }

    pub async fn can_retreat(&self) -> bool {
        navigation::can_retreat(self.session.lock().await.position)
    }

    /// Unsaved-changes indicator.
    pub async fn has_unsaved_changes(&self) -> bool {
        !self.session.lock().await.change_reasons().is_empty()
    }

    pub async fn change_reasons(&self) -> Vec<ChangeReason> {
        self.session.lock().await.change_reasons()
    }

    /// Take every queued notice.
    pub async fn drain_notices(&self) -> Vec<Notice> {
        self.session.lock().await.drain_notices()
    }

    /// Live preview: the display variant, compliance redacted.
    pub async fn preview(&self) -> String {
        let session = self.session.lock().await;
        let notes = assembler::notes_for(&self.config);
        assembler::assemble_with_notes(&session.draft, PromptVariant::Display, notes).text()
    }

    /// Editable identity + company text.
    pub async fn agent_prompt_text(&self) -> String {
        assembler::agent_prompt_text(&self.session.lock().await.draft)
    }

    /// Editable Q&A review + conversation flow text.
    pub async fn qa_review_text(&self) -> String {
        assembler::qa_review_text(&self.session.lock().await.draft)
    }

    // -----------------------------------------------------------------------
    // Edits
    // -----------------------------------------------------------------------

    /// Set a single field from user input and revalidate it.
    ///
    /// Voice and call direction normally go through [`Self::select_voice`]
    /// and [`Self::set_call_direction`]; given here as text, the value is
    /// taken as a voice id or parsed as a direction (unparseable clears it).
    pub async fn set_field(&self, field: FieldId, value: &str) -> Result<(), WizardError> {
        let mut guard = self.session.lock().await;
        let session = &mut *guard;
        session.ensure_alive()?;

        let draft = &mut session.draft;
        match field {
            FieldId::AgentName => draft.agent_name = value.to_string(),
            FieldId::CompanyName => draft.company_name = value.to_string(),
            FieldId::Role => draft.role = value.to_string(),
            FieldId::Industry => draft.industry = value.to_string(),
            FieldId::Description => draft.description = value.to_string(),
            FieldId::CompanyDescription => draft.company_description = value.to_string(),
            FieldId::WelcomeMessage => draft.welcome_message = value.to_string(),
            FieldId::ConversationFlow => draft.conversation_flow = value.to_string(),
            FieldId::Language => {
                let value = value.trim();
                draft.language = (!value.is_empty()).then(|| value.to_string());
            }
            FieldId::Voice => {
                let value = value.trim();
                draft.voice = (!value.is_empty()).then(|| VoiceSelection {
                    voice_id: value.to_string(),
                    name: String::new(),
                    language: None,
                });
            }
            FieldId::CallDirection => draft.call_direction = value.parse().ok(),
        }

        session.validation.record_change(field, value);
        Ok(())
    }

    pub async fn select_voice(&self, voice: Option<VoiceSelection>) -> Result<(), WizardError> {
        let mut guard = self.session.lock().await;
        let session = &mut *guard;
        session.ensure_alive()?;

        let voice_id = voice.as_ref().map(|v| v.voice_id.clone()).unwrap_or_default();
        session.draft.voice = voice;
        session.validation.record_change(FieldId::Voice, &voice_id);
        Ok(())
    }

    pub async fn set_call_direction(
        &self,
        direction: Option<CallDirection>,
    ) -> Result<(), WizardError> {
        let mut guard = self.session.lock().await;
        let session = &mut *guard;
        session.ensure_alive()?;

        session.draft.call_direction = direction;
        let value = direction.map(|d| d.to_string()).unwrap_or_default();
        session.validation.record_change(FieldId::CallDirection, &value);
        Ok(())
    }

    /// Apply a structural edit (variables, extraction fields, schedule,
    /// functions, phone settings, Q&A answers...).
    pub async fn update_draft<F>(&self, edit: F) -> Result<(), WizardError>
    where
        F: FnOnce(&mut AgentDraft),
    {
        let mut guard = self.session.lock().await;
        let session = &mut *guard;
        session.ensure_alive()?;

        edit(&mut session.draft);
        recompute_name_errors(session);
        Ok(())
    }

    /// Write back the conversation flow from an edited Q&A-review text.
    pub async fn apply_flow_edit(&self, text: &str) -> Result<(), WizardError> {
        let mut guard = self.session.lock().await;
        let session = &mut *guard;
        session.ensure_alive()?;

        decomposer::apply_flow_edit(&mut session.draft, text);
        let flow = session.draft.conversation_flow.clone();
        session.validation.record_change(FieldId::ConversationFlow, &flow);
        Ok(())
    }

    /// Write back identity and company description from an edited
    /// agent-prompt text.
    pub async fn apply_agent_prompt_edit(&self, text: &str) -> Result<(), WizardError> {
        let mut guard = self.session.lock().await;
        let session = &mut *guard;
        session.ensure_alive()?;

        decomposer::apply_agent_prompt_edit(&mut session.draft, text);
        recompute_name_errors(session);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    /// "Next". Moves, or submits when the flow ends on this page.
    pub async fn advance(&self) -> Result<StepOutcome, WizardError> {
        let (payload, mode) = {
            let mut guard = self.session.lock().await;
            let session = &mut *guard;
            session.ensure_alive()?;

            match navigation::advance(session.position, &session.draft) {
                Ok(Advance::Moved(next)) => {
                    tracing::debug!(from = %session.position, to = %next, "Advanced");
                    session.position = next;
                    return Ok(StepOutcome::Moved(next));
                }
                Ok(Advance::Submit) => {}
                Err(e) => {
                    match &e {
                        NavigationError::RequiredFields(_) => {
                            session.validation.check_required(&session.draft);
                        }
                        NavigationError::EmptyConversationFlow => {
                            session.validation.check_conversation_flow(&session.draft);
                        }
                        NavigationError::AtStart => {}
                    }
                    session.notify(Notice::error(e.to_string()));
                    return Err(e.into());
                }
            }

            self.check_auth(session)?;
            if let Err(e) = session.begin(Operation::Submit) {
                session.notify(Notice::error(e.to_string()));
                return Err(e);
            }

            let payload = match build_payload(&session.draft, &self.config, &self.caller) {
                Ok(payload) => payload,
                Err(e) => {
                    let _ = session.finish(Operation::Submit);
                    if let NavigationError::RequiredFields(_) = e {
                        session.validation.check_required(&session.draft);
                    }
                    session.notify(Notice::error(e.to_string()));
                    return Err(e.into());
                }
            };
            (payload, session.mode.clone())
        };

        let result = match &mode {
            WizardMode::Create => self.ports.agents.create_agent(&payload).await,
            WizardMode::Edit { agent_id } => {
                self.ports.agents.update_agent(agent_id, &payload).await
            }
        };

        let mut session = self.settle(Operation::Submit).await?;
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(error = %e, "Agent save failed");
                session.notify(Notice::error(format!("Could not save agent: {e}")));
                return Err(e.into());
            }
        };

        tracing::info!(agent_id = %record.id, name = %record.payload.name, "Agent saved");
        session.notify(Notice::success(format!("Agent \"{}\" saved", record.payload.name)));
        session.close();
        drop(session);

        self.clear_scratch(&mode).await;
        Ok(StepOutcome::Submitted(Box::new(record)))
    }

    /// "Back".
    pub async fn retreat(&self) -> Result<NavigationPosition, WizardError> {
        let mut session = self.session.lock().await;
        session.ensure_alive()?;

        let previous = navigation::retreat(session.position)?;
        tracing::debug!(from = %session.position, to = %previous, "Retreated");
        session.position = previous;
        Ok(previous)
    }

    /// Discard everything collected so far and return to the first step.
    pub async fn start_fresh(&self) -> Result<(), WizardError> {
        let mode = {
            let mut session = self.session.lock().await;
            session.ensure_alive()?;
            session.reset();
            session.mode.clone()
        };
        tracing::debug!("Wizard reset to a fresh draft");
        self.clear_scratch(&mode).await;
        Ok(())
    }

    /// Close attempt. Closes right away when nothing would be lost;
    /// otherwise leaves the wizard open and asks for confirmation.
    pub async fn request_close(&self) -> ExitDecision {
        let decision = {
            let session = self.session.lock().await;
            if !session.is_alive() {
                return ExitDecision::CloseImmediately;
            }
            change_detector::exit_decision(&session.draft, &session.website)
        };

        if decision == ExitDecision::CloseImmediately {
            self.discard_and_close().await;
        }
        decision
    }

    /// Close without saving. Results of pending operations are discarded.
    pub async fn discard_and_close(&self) {
        let mode = {
            let mut session = self.session.lock().await;
            session.close();
            session.mode.clone()
        };
        tracing::debug!("Wizard closed without saving");
        self.clear_scratch(&mode).await;
    }

    // -----------------------------------------------------------------------
    // Collaborator operations
    // -----------------------------------------------------------------------

    /// Generate the prompt sections from the description and identity.
    ///
    /// On failure the draft is left unchanged.
    pub async fn generate_prompt(&self) -> Result<(), WizardError> {
        let request = {
            let mut session = self.begin(Operation::GeneratePrompt).await?;
            let draft = &session.draft;
            let request = PromptGenerationRequest {
                description: draft.description.clone(),
                agent_name: draft.agent_name.clone(),
                company_name: draft.company_name.clone(),
                role: draft.role.clone(),
                industry: draft.industry.clone(),
                variables: draft.variables.clone(),
                voice: draft.voice.clone(),
                call_direction: draft.call_direction,
            };
            session.notify(Notice::info("Generating prompt..."));
            request
        };

        let result = self.ports.generation.generate_prompt(&request).await;

        let mut guard = self.settle(Operation::GeneratePrompt).await?;
        let session = &mut *guard;
        match result {
            Ok(generated) => {
                apply_generated_prompt(&mut session.draft, generated);
                recompute_name_errors(session);
                session.notify(Notice::success("Prompt generated"));
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Prompt generation failed");
                session.notify(Notice::error(format!("Prompt generation failed: {e}")));
                Err(e.into())
            }
        }
    }

    /// Import a website: scrape its content, then generate FAQs from it.
    ///
    /// The whole import counts as one `ScrapeWebsite` operation, pending
    /// until the FAQ step settles; `GenerateFaqs` is additionally pending
    /// during the second step. The two steps fail independently. A scrape
    /// failure leaves the website draft untouched; an FAQ failure keeps the
    /// scraped content.
    pub async fn load_website(&self, url: &str) -> Result<WebsiteLoad, WizardError> {
        let url = url.trim().to_string();
        if url.is_empty() {
            let mut session = self.session.lock().await;
            session.notify(Notice::error(WizardError::EmptyUrl.to_string()));
            return Err(WizardError::EmptyUrl);
        }

        // Step 1: scrape.
        drop(self.begin(Operation::ScrapeWebsite).await?);
        let scraped = self.ports.generation.scrape_website(&url).await;

        let content = {
            let mut session = self.session.lock().await;
            if let Err(e) = session.ensure_alive() {
                tracing::warn!(
                    operation = %Operation::ScrapeWebsite,
                    "Discarding result that arrived after close"
                );
                return Err(e);
            }
            let scraped = match scraped {
                Ok(scraped) => scraped,
                Err(e) => {
                    let _ = session.finish(Operation::ScrapeWebsite);
                    tracing::warn!(url = %url, error = %e, "Website import failed");
                    session.notify(Notice::error(format!("Could not import website: {e}")));
                    return Err(e.into());
                }
            };

            // Step 2 is marked before the draft is written so no close or
            // second import slips in between.
            if let Err(e) = session.begin(Operation::GenerateFaqs) {
                let _ = session.finish(Operation::ScrapeWebsite);
                session.notify(Notice::error(e.to_string()));
                return Err(e);
            }
            session.website.url = url.clone();
            session.website.content = scraped.content.clone();
            session.website.is_loaded = true;
            scraped.content
        };
        self.persist_website().await;

        // Step 2: FAQs from the scraped content.
        let generated = self.ports.generation.generate_faqs(&content).await;

        let outcome = {
            let mut guard = self.settle(Operation::GenerateFaqs).await?;
            let session = &mut *guard;
            session.finish(Operation::ScrapeWebsite)?;
            match generated {
                Ok(generation) => {
                    let count = generation.faqs.len();
                    if session.draft.company_description.trim().is_empty() {
                        session.draft.company_description = generation.business_context.clone();
                    }
                    session.draft.faqs = generation.faqs.clone();
                    session.website.faqs = generation.faqs;
                    session.website.business_context = generation.business_context;
                    session.notify(Notice::success(format!(
                        "Website imported with {count} FAQs"
                    )));
                    WebsiteLoad::Complete { faqs: count }
                }
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "FAQ generation failed");
                    session.notify(Notice::error(format!("FAQ generation failed: {e}")));
                    WebsiteLoad::ContentOnly {
                        error: e.to_string(),
                    }
                }
            }
        };
        self.persist_website().await;

        Ok(outcome)
    }

    /// Generate the task list from the description and website context.
    pub async fn generate_tasks(&self) -> Result<(), WizardError> {
        let request = {
            let session = self.begin(Operation::GenerateTasks).await?;
            TaskGenerationRequest {
                description: session.draft.description.clone(),
                company_description: session.draft.company_description.clone(),
                business_context: session.website.business_context.clone(),
                role: session.draft.role.clone(),
            }
        };

        let result = self.ports.generation.generate_tasks(&request).await;

        {
            let mut session = self.settle(Operation::GenerateTasks).await?;
            match result {
                Ok(tasks) => {
                    session.draft.tasks = tasks.clone();
                    session.website.tasks = tasks;
                    session.notify(Notice::success("Tasks generated"));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Task generation failed");
                    session.notify(Notice::error(format!("Task generation failed: {e}")));
                    return Err(e.into());
                }
            }
        }

        self.persist_website().await;
        Ok(())
    }

    /// Generate the conversation flow from the task list. Replaces any
    /// existing flow.
    pub async fn generate_conversation_flow(&self) -> Result<(), WizardError> {
        let request = {
            let session = self.begin(Operation::GenerateConversationFlow).await?;
            FlowGenerationRequest {
                tasks: session.draft.tasks.clone(),
                agent_name: session.draft.agent_name.clone(),
                company_name: session.draft.company_name.clone(),
                role: session.draft.role.clone(),
                call_direction: session.draft.call_direction,
            }
        };

        let result = self.ports.generation.generate_conversation_flow(&request).await;

        let mut guard = self.settle(Operation::GenerateConversationFlow).await?;
        let session = &mut *guard;
        match result {
            Ok(flow) => {
                session.draft.conversation_flow = flow.trim().to_string();
                let flow = session.draft.conversation_flow.clone();
                session.validation.recompute(FieldId::ConversationFlow, &flow);
                session.notify(Notice::success("Conversation flow generated"));
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Conversation flow generation failed");
                session.notify(Notice::error(format!(
                    "Conversation flow generation failed: {e}"
                )));
                Err(e.into())
            }
        }
    }

    /// Transcribe call recordings and append the transcripts to the
    /// description.
    ///
    /// Files outside the audio allow-list are reported as failed without
    /// being sent. Per-file failures are reported individually; successful
    /// transcripts are kept.
    pub async fn transcribe(
        &self,
        files: Vec<AudioFile>,
        progress: &ProgressFn,
    ) -> Result<Vec<FileTranscript>, WizardError> {
        if files.is_empty() {
            return Err(WizardError::NothingToTranscribe);
        }

        drop(self.begin(Operation::Transcribe).await?);

        let (accepted, mut rejected): (Vec<AudioFile>, Vec<FileTranscript>) =
            files.into_iter().fold(
                (Vec::new(), Vec::new()),
                |(mut accepted, mut rejected), file| {
                    let supported = file
                        .extension()
                        .is_some_and(|ext| self.config.accepts_audio_extension(&ext));
                    if supported {
                        accepted.push(file);
                    } else {
                        rejected.push(FileTranscript::failed(
                            file.file_name,
                            "unsupported audio format",
                        ));
                    }
                    (accepted, rejected)
                },
            );

        let result = if accepted.is_empty() {
            Ok(Vec::new())
        } else {
            self.ports
                .transcription
                .transcribe_files(&accepted, progress)
                .await
        };

        let mut session = self.settle(Operation::Transcribe).await?;
        let transcripts = match result {
            Ok(transcripts) => transcripts,
            Err(e) => {
                tracing::warn!(error = %e, files = accepted.len(), "Transcription failed");
                notify_failed_transcripts(&mut session, &rejected);
                session.notify(Notice::error(format!("Transcription failed: {e}")));
                return Err(e.into());
            }
        };

        let mut appended = 0usize;
        for transcript in transcripts.iter().filter(|t| t.is_success()) {
            if append_transcript(&mut session.draft.description, &transcript.transcript) {
                appended += 1;
            }
        }

        rejected.extend(transcripts);
        notify_failed_transcripts(&mut session, &rejected);
        if appended > 0 {
            session.notify(Notice::success(format!("Transcribed {appended} file(s)")));
        }
        let failed = rejected.iter().filter(|t| !t.is_success()).count();
        tracing::debug!(appended, failed, "Transcription finished");

        Ok(rejected)
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn check_auth(&self, session: &mut WizardSession) -> Result<(), WizardError> {
        if self.caller.is_authenticated() {
            return Ok(());
        }
        session.notify(Notice::error(WizardError::NotAuthenticated.to_string()));
        Err(WizardError::NotAuthenticated)
    }

    /// Lock, check preconditions and mark `op` pending. The guard is handed
    /// back so the caller can snapshot its request before unlocking.
    async fn begin(&self, op: Operation) -> Result<MutexGuard<'_, WizardSession>, WizardError> {
        let mut session = self.session.lock().await;
        session.ensure_alive()?;
        self.check_auth(&mut session)?;
        if let Err(e) = session.begin(op) {
            session.notify(Notice::error(e.to_string()));
            return Err(e);
        }
        tracing::debug!(operation = %op, "Operation started");
        Ok(session)
    }

    /// Re-lock after `op` returned. Fails with `Dismissed` if the wizard
    /// was closed meanwhile.
    async fn settle(&self, op: Operation) -> Result<MutexGuard<'_, WizardSession>, WizardError> {
        let mut session = self.session.lock().await;
        if let Err(e) = session.finish(op) {
            tracing::warn!(operation = %op, "Discarding result that arrived after close");
            return Err(e);
        }
        Ok(session)
    }

    /// Write the website draft to scratch storage (new agents only).
    ///
    /// Liveness is checked under the scratch lock, so a close that clears
    /// the entry either sees this write land first or skips it entirely.
    async fn persist_website(&self) {
        let _scratch = self.scratch_lock.lock().await;
        let website = {
            let session = self.session.lock().await;
            if !(session.is_create() && session.is_alive()) {
                return;
            }
            session.website.clone()
        };
        let saved =
            save_website_draft(&self.ports.scratch, &self.config.scratch_key, &website).await;
        if let Err(e) = saved {
            tracing::warn!(error = %e, "Could not save website draft");
        }
    }

    async fn clear_scratch(&self, mode: &WizardMode) {
        if !matches!(mode, WizardMode::Create) {
            return;
        }
        let _scratch = self.scratch_lock.lock().await;
        if let Err(e) = self.ports.scratch.remove(&self.config.scratch_key).await {
            tracing::warn!(error = %e, "Could not clear website draft");
        }
    }
}

/// Merge a generation result into the draft.
///
/// Known section keys fill the generated sections (and the flow);
/// extracted variables replace the list; extracted company info only fills
/// an empty company description.
fn apply_generated_prompt(draft: &mut AgentDraft, generated: GeneratedPrompt) {
    draft.generated_prompt = generated.full_text;

    for (key, body) in generated.sections {
        let body = body.trim().to_string();
        match SectionKind::from_key(&key) {
            Some(SectionKind::ResponseRules) => draft.generated.response_rules = body,
            Some(SectionKind::EdgeCases) => draft.generated.edge_cases = body,
            Some(SectionKind::OperatingRules) => draft.generated.operating_rules = body,
            Some(SectionKind::Compliance) => draft.generated.compliance = body,
            Some(SectionKind::ConversationFlow) if !body.is_empty() => {
                draft.conversation_flow = body
            }
            _ => tracing::debug!(section = %key, "Ignoring generated section"),
        }
    }

    if let Some(variables) = generated.variables {
        draft.variables = variables;
    }
    if let Some(company_info) = generated.company_info {
        if draft.company_description.trim().is_empty() {
            draft.company_description = company_info.trim().to_string();
        }
    }
}

/// Append a transcript to the description behind the divider.
///
/// Returns `false` for an empty transcript.
fn append_transcript(description: &mut String, transcript: &str) -> bool {
    let transcript = transcript.trim();
    if transcript.is_empty() {
        return false;
    }
    if description.trim().is_empty() {
        *description = transcript.to_string();
    } else {
        description.push_str("\n\n");
        description.push_str(TRANSCRIPT_DIVIDER);
        description.push('\n');
        description.push_str(transcript);
    }
    true
}

/// One error notice per failed file.
fn notify_failed_transcripts(session: &mut WizardSession, transcripts: &[FileTranscript]) {
    for failed in transcripts.iter().filter(|t| !t.is_success()) {
        let reason = failed.error.as_deref().unwrap_or("unknown error");
        session.notify(Notice::error(format!(
            "Could not transcribe {}: {reason}",
            failed.file_name
        )));
    }
}

/// Name fields carry the only per-field rule; keep their errors current
/// after edits that bypass `set_field`.
fn recompute_name_errors(session: &mut WizardSession) {
    let agent_name = session.draft.agent_name.clone();
    let company_name = session.draft.company_name.clone();
    session.validation.recompute(FieldId::AgentName, &agent_name);
    session.validation.recompute(FieldId::CompanyName, &company_name);
}
