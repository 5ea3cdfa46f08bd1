//! Session controller: sequences the user-visible flows over the session
//! state and translates orchestrator/analyzer outcomes into transcript
//! entries.
//!
//! Each flow installs a fresh cancellation token before doing anything, so
//! a stale cancellation from a previous run never blocks a new one. The
//! externally held [`CancelHandle`] always aborts whichever flow is current.

use crate::analyze;
use crate::catalog;
use crate::chat::client::ChatBackend;
use crate::error::GenError;
use crate::expand;
use crate::gen::batch::run_batches;
use crate::gen::client::ImageBackend;
use crate::gen::ratio::AspectRatio;
use crate::session::{
    ActionKind, ChatMessage, DesignAction, GeneratedImage, ImageKind, SessionState,
};
use futures::future::join_all;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio_util::sync::CancellationToken;

/// Curated seed prompts for the "surprise me" action.
pub const RANDOM_PROMPTS: [&str; 12] = [
    "A futuristic hologram projected from a smartwatch",
    "A massive neon billboard in a rainy cyberpunk city",
    "Minimalist concrete wall etching in a modern art gallery",
    "Gold foil stamping on premium matte black packaging",
    "A branded hot air balloon floating over the Swiss Alps",
    "Embroidery on a high-end silk bomber jacket",
    "A laser-cut metal business card resting on moss",
    "A branded formula 1 racing car speeding on track",
    "An underwater hotel room window decal",
    "A coffee art pattern on a latte in a cozy cafe",
    "A giant inflatable mascot floating in a parade",
    "A branded spacesuit helmet reflection",
];

const RANDOM_RATIOS: [AspectRatio; 3] = [
    AspectRatio::Square,
    AspectRatio::SixteenNine,
    AspectRatio::NineSixteen,
];

/// Cancels whichever flow is currently running. Cloneable so the UI layer
/// can hold one while a flow owns the session.
#[derive(Clone, Default)]
pub struct CancelHandle {
    inner: Arc<Mutex<CancellationToken>>,
}

impl CancelHandle {
    fn lock(&self) -> MutexGuard<'_, CancellationToken> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Abort all in-flight requests of the current flow and stop further
    /// issuance at the next chunk boundary.
    pub fn cancel(&self) {
        self.lock().cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.lock().is_cancelled()
    }

    /// Install a fresh token, clearing any stale cancellation.
    fn refresh(&self) -> CancellationToken {
        let fresh = CancellationToken::new();
        *self.lock() = fresh.clone();
        fresh
    }
}

/// Owns the session state and drives the flows against the two backends.
pub struct Session<G, C> {
    images: G,
    chat: C,
    pub state: SessionState,
    cancel: CancelHandle,
    rng: StdRng,
}

impl<G, C> Session<G, C>
where
    G: ImageBackend,
    C: ChatBackend,
{
    pub fn new(images: G, chat: C) -> Self {
        Self::with_rng(images, chat, StdRng::from_entropy())
    }

    /// Deterministic variant for tests: seed drives random prompt and
    /// ratio selection.
    pub fn with_seed(images: G, chat: C, seed: u64) -> Self {
        Self::with_rng(images, chat, StdRng::seed_from_u64(seed))
    }

    fn with_rng(images: G, chat: C, rng: StdRng) -> Self {
        Self {
            images,
            chat,
            state: SessionState::new(),
            cancel: CancelHandle::default(),
            rng,
        }
    }

    /// Handle for the UI layer; aborts the flow that is running when
    /// [`CancelHandle::cancel`] is invoked.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Upload flow: reset the session and run both generation phases
    /// against the new logo.
    pub async fn upload_logo(&mut self, logo: String) {
        let cancel = self.cancel.refresh();

        self.state.logo = Some(logo.clone());
        self.state.gallery.clear();
        self.state.transcript.clear();
        self.state.edit_target = None;
        self.state.pending_action = None;
        self.state.push_message(ChatMessage::system(format!(
            "SOURCE LOGO ACQUIRED. INITIALIZING MULTI-BATCH GENERATION...\n\n\
             PHASE 1: BASIC ELEMENTS ({} variations)\n\
             PHASE 2: APPLICATION SCENARIOS ({} mockups)",
            catalog::BASIC_CATEGORIES.len(),
            catalog::APPLICATION_CATEGORIES.len(),
        )));
        self.state.generating = true;

        let result = self.run_upload_phases(&logo, &cancel).await;
        match result {
            Ok(()) => {
                let total =
                    catalog::BASIC_CATEGORIES.len() + catalog::APPLICATION_CATEGORIES.len();
                self.state.push_message(ChatMessage::system(format!(
                    "SYSTEM GENERATION COMPLETE.\n\nTotal of {} high-fidelity brand assets \
                     generated.\nSelect any image to download or refine it further.",
                    total
                )));
            }
            Err(e) if e.is_aborted() => self.note_termination(),
            Err(e) => {
                tracing::warn!(error = %e, "upload generation sequence failed");
                self.state.push_message(ChatMessage::system(
                    "GENERATION SEQUENCE INTERRUPTED. PLEASE CHECK YOUR CONNECTION.",
                ));
            }
        }

        self.state.generating = false;
        self.state.status.clear();
    }

    async fn run_upload_phases(
        &mut self,
        logo: &str,
        cancel: &CancellationToken,
    ) -> Result<(), GenError> {
        let basic = catalog::basic_tasks();
        run_batches(
            &self.images,
            &basic,
            logo,
            "BASIC SYSTEM",
            cancel,
            &mut self.state,
        )
        .await?;

        let applications = catalog::application_tasks();
        run_batches(
            &self.images,
            &applications,
            logo,
            "MOCKUP",
            cancel,
            &mut self.state,
        )
        .await
    }

    /// Chat flow: analyze the message and surface a suggested action.
    pub async fn send_message(&mut self, text: &str) {
        let text = text.trim().to_string();
        if text.is_empty() || self.state.is_busy() {
            return;
        }
        self.cancel.refresh();

        self.state.pending_action = None;
        self.state.push_message(ChatMessage::user(text.clone()));
        self.state.analyzing = true;
        self.state.status = "ANALYZING REQUEST...".to_string();

        let has_logo = self.state.logo.is_some();
        let has_edit_target = self.state.edit_target.is_some();
        let analysis = analyze::analyze_request(&self.chat, &text, has_logo, has_edit_target).await;

        self.state.push_message(ChatMessage::assistant(analysis.reply));
        if let Some(action) = analysis.suggested_action {
            if has_logo {
                self.state.set_pending_action(action);
            } else {
                self.state.push_message(ChatMessage::system(
                    "ACTION BLOCKED: PLEASE UPLOAD A LOGO FIRST.",
                ));
            }
        }

        self.state.analyzing = false;
        self.state.status.clear();
    }

    /// Action confirmation flow. The pending action is consumed before any
    /// work starts so a double confirm is a no-op.
    pub async fn confirm_pending_action(&mut self) {
        if self.state.is_busy() {
            return;
        }
        let Some(action) = self.state.pending_action.take() else {
            return;
        };
        let Some(logo) = self.state.logo.clone() else {
            return;
        };

        let cancel = self.cancel.refresh();
        self.state.generating = true;

        let edit_target = self.state.edit_target.clone();
        let outcome = match (action.kind, edit_target) {
            (ActionKind::Modify, Some(target)) => {
                self.run_modification(&action, &target, &cancel).await
            }
            _ => self.run_creation(&action, &logo, &cancel).await,
        };

        match outcome {
            Ok(()) => {}
            Err(e) if e.is_aborted() => self.note_termination(),
            Err(e) => {
                tracing::warn!(error = %e, "confirmed action failed");
                self.state
                    .push_message(ChatMessage::system("GENERATION FAILED."));
            }
        }

        self.state.generating = false;
        self.state.status.clear();
        if action.kind == ActionKind::Modify {
            self.clear_edit_selection();
        }
    }

    async fn run_modification(
        &mut self,
        action: &DesignAction,
        target: &GeneratedImage,
        cancel: &CancellationToken,
    ) -> Result<(), GenError> {
        self.state.status = format!("MODIFYING ASSET: {}...", action.label.to_uppercase());

        let prompt = format!(
            "Modify this image based on: {}. Keep the main composition but apply the change. \
             Professional design style.",
            action.query
        );
        let url = self
            .images
            .generate(&prompt, &target.url, AspectRatio::Square, cancel)
            .await?;

        let image = GeneratedImage::new(
            url,
            format!("Edit: {}", action.query),
            ImageKind::Modification,
        );
        let image_id = image.id.clone();
        self.state.gallery.prepend_batch(vec![image]);
        self.state
            .push_message(ChatMessage::system("MODIFICATION COMPLETE.").with_image(image_id));
        Ok(())
    }

    async fn run_creation(
        &mut self,
        action: &DesignAction,
        logo: &str,
        cancel: &CancellationToken,
    ) -> Result<(), GenError> {
        self.state.status = match action.kind {
            ActionKind::Random => "BRAINSTORMING RANDOM CONCEPTS...".to_string(),
            _ => "DESIGNING VARIATIONS...".to_string(),
        };

        let seed = match action.kind {
            ActionKind::Random => RANDOM_PROMPTS
                .choose(&mut self.rng)
                .copied()
                .unwrap_or(RANDOM_PROMPTS[0])
                .to_string(),
            _ => action.query.clone(),
        };

        let prompts = expand::creative_prompts(&self.chat, &seed).await;
        self.state.status = format!("RENDERING {} ASSETS...", prompts.len());

        let ratios: Vec<AspectRatio> = prompts
            .iter()
            .map(|_| match action.kind {
                ActionKind::Random => *RANDOM_RATIOS
                    .choose(&mut self.rng)
                    .unwrap_or(&AspectRatio::Square),
                _ => AspectRatio::Square,
            })
            .collect();

        // Small set, all issued at once; no chunking needed here.
        let images = &self.images;
        let requests: Vec<_> = prompts
            .iter()
            .zip(ratios.iter())
            .map(|(prompt, ratio)| async move {
                match images.generate(prompt, logo, *ratio, cancel).await {
                    Ok(url) => Some(GeneratedImage::new(
                        url,
                        prompt.clone(),
                        ImageKind::Initial,
                    )),
                    Err(e) => {
                        tracing::warn!(error = %e, "variation generation failed");
                        None
                    }
                }
            })
            .collect();
        let results = join_all(requests).await;

        if cancel.is_cancelled() {
            return Err(GenError::Aborted);
        }

        let successful: Vec<GeneratedImage> = results.into_iter().flatten().collect();
        if successful.is_empty() {
            return Err(GenError::NoValidResults);
        }

        let count = successful.len();
        let first_id = successful[0].id.clone();
        self.state.gallery.prepend_batch(successful);
        self.state.push_message(
            ChatMessage::system(format!("GENERATION COMPLETE: {} NEW ASSETS.", count))
                .with_image(first_id),
        );
        Ok(())
    }

    /// Discard the pending action without running it.
    pub fn dismiss_pending_action(&mut self) {
        self.state.pending_action = None;
    }

    /// Set a pending "surprise me" action without a chat round-trip.
    pub fn trigger_random(&mut self) {
        if self.state.logo.is_none() || self.state.is_busy() {
            return;
        }
        self.state.set_pending_action(DesignAction {
            kind: ActionKind::Random,
            label: "Surprise Me".to_string(),
            description: "Generate a completely random, high-quality brand asset.".to_string(),
            query: "random".to_string(),
        });
    }

    /// Mark a gallery image as the reference for a Modify action.
    pub fn select_for_edit(&mut self, image_id: &str) -> bool {
        let Some(image) = self.state.gallery.get(image_id).cloned() else {
            return false;
        };
        let tail: String = image
            .id
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        self.state.edit_target = Some(image);
        self.state.push_message(ChatMessage::system(format!(
            "EDIT MODE ENGAGED (ID #{}).\nTell me what to change \
             (e.g., \"Make it gold\", \"Change background to red\").",
            tail
        )));
        true
    }

    /// Drop the edit target; any pending action is discarded with it.
    pub fn clear_edit_selection(&mut self) {
        self.state.edit_target = None;
        self.state.pending_action = None;
    }

    /// Drop the logo and return the session to its initial state.
    pub fn reset(&mut self) {
        self.cancel.refresh();
        self.state = SessionState::new();
    }

    fn note_termination(&mut self) {
        self.state.pending_action = None;
        self.state
            .push_message(ChatMessage::system("GENERATION TERMINATED BY USER."));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::client::ChatTurn;
    use crate::session::Role;
    use async_trait::async_trait;

    #[derive(Default)]
    struct ImageCalls {
        calls: Vec<(String, AspectRatio)>,
        cancel_on_call: Option<usize>,
    }

    /// Image backend recording every call; optionally fails everything or
    /// cancels the flow token while handling a given call number.
    #[derive(Default)]
    struct MockImages {
        state: Mutex<ImageCalls>,
        fail_all: bool,
    }

    impl MockImages {
        fn ok() -> Self {
            Self::default()
        }

        fn failing() -> Self {
            Self {
                fail_all: true,
                ..Self::default()
            }
        }

        fn cancelling_on_call(call: usize) -> Self {
            Self {
                state: Mutex::new(ImageCalls {
                    cancel_on_call: Some(call),
                    ..ImageCalls::default()
                }),
                fail_all: false,
            }
        }

        fn calls(&self) -> Vec<(String, AspectRatio)> {
            self.state.lock().unwrap().calls.clone()
        }
    }

    #[async_trait]
    impl ImageBackend for MockImages {
        async fn generate(
            &self,
            prompt: &str,
            _reference: &str,
            ratio: AspectRatio,
            cancel: &CancellationToken,
        ) -> Result<String, GenError> {
            {
                let mut state = self.state.lock().unwrap();
                state.calls.push((prompt.to_string(), ratio));
                if Some(state.calls.len()) == state.cancel_on_call {
                    state.cancel_on_call = None;
                    cancel.cancel();
                }
            }
            tokio::task::yield_now().await;

            if self.fail_all {
                Err(GenError::EmptyResponse)
            } else {
                Ok(format!("https://img.example/{}.png", uuid::Uuid::new_v4()))
            }
        }
    }

    /// Chat backend that always fails, forcing the deterministic fallbacks.
    struct OfflineChat;

    #[async_trait]
    impl ChatBackend for OfflineChat {
        async fn complete(
            &self,
            _messages: &[ChatTurn],
            _json_mode: bool,
        ) -> Result<String, GenError> {
            Err(GenError::EmptyResponse)
        }
    }

    fn system_texts(state: &SessionState) -> Vec<&str> {
        state
            .transcript
            .iter()
            .filter(|m| m.role == Role::System)
            .map(|m| m.text.as_str())
            .collect()
    }

    #[tokio::test]
    async fn test_upload_flow_generates_full_system() {
        let mut session = Session::with_seed(MockImages::ok(), OfflineChat, 7);
        session.upload_logo("data:image/png;base64,logo".to_string()).await;

        assert_eq!(session.state.gallery.len(), 46);
        assert!(!session.state.generating);
        assert!(session.state.status.is_empty());
        assert_eq!(session.images.calls().len(), 46);

        // Intro entry plus one completion entry counting all 46 assets.
        assert_eq!(session.state.transcript.len(), 2);
        assert!(session.state.transcript[1].text.contains("46"));
    }

    #[tokio::test]
    async fn test_upload_flow_resets_previous_session() {
        let mut session = Session::with_seed(MockImages::ok(), OfflineChat, 7);
        session.state.logo = Some("old".to_string());
        session.trigger_random();
        assert!(session.state.pending_action.is_some());

        session.upload_logo("new-logo".to_string()).await;
        assert!(session.state.pending_action.is_none());
        assert_eq!(session.state.logo.as_deref(), Some("new-logo"));
    }

    #[tokio::test]
    async fn test_upload_tolerates_all_task_failures() {
        // Per-task failures are swallowed at the batch layer, so even a run
        // where every task fails completes normally with an empty gallery.
        let mut session = Session::with_seed(MockImages::failing(), OfflineChat, 7);
        session.upload_logo("logo".to_string()).await;

        assert_eq!(session.state.gallery.len(), 0);
        assert!(session.state.transcript[1].text.contains("SYSTEM GENERATION COMPLETE"));
    }

    #[tokio::test]
    async fn test_upload_cancellation_mid_run() {
        // The 6th call (chunk 2) cancels the flow token: chunk 2 settles but
        // is discarded, chunk 3 is never issued.
        let mut session = Session::with_seed(MockImages::cancelling_on_call(6), OfflineChat, 7);
        session.upload_logo("logo".to_string()).await;

        assert_eq!(session.images.calls().len(), 8);
        assert_eq!(session.state.gallery.len(), 4);
        assert!(!session.state.generating);

        let texts = system_texts(&session.state);
        let terminated = texts
            .iter()
            .filter(|t| t.contains("TERMINATED"))
            .count();
        assert_eq!(terminated, 1);
        assert!(!texts.iter().any(|t| t.contains("INTERRUPTED")));
    }

    #[tokio::test]
    async fn test_stale_cancellation_does_not_block_next_flow() {
        let mut session = Session::with_seed(MockImages::cancelling_on_call(6), OfflineChat, 7);
        session.upload_logo("logo".to_string()).await;
        assert!(session.cancel_handle().is_cancelled());

        // The mock only cancels once; the next upload must run to completion.
        session.upload_logo("logo".to_string()).await;
        assert_eq!(session.state.gallery.len(), 46);
        assert!(!session.cancel_handle().is_cancelled());
    }

    #[tokio::test]
    async fn test_chat_flow_sets_pending_action() {
        let mut session = Session::with_seed(MockImages::ok(), OfflineChat, 7);
        session.state.logo = Some("logo".to_string());

        session.send_message("a coffee cup").await;

        assert!(!session.state.analyzing);
        let action = session.state.pending_action.as_ref().unwrap();
        assert_eq!(action.kind, ActionKind::Generate);
        assert_eq!(action.query, "a coffee cup");
        assert_eq!(session.state.transcript.last().unwrap().role, Role::Assistant);
    }

    #[tokio::test]
    async fn test_chat_flow_blocks_action_without_logo() {
        let mut session = Session::with_seed(MockImages::ok(), OfflineChat, 7);
        session.send_message("a coffee cup").await;

        assert!(session.state.pending_action.is_none());
        assert!(system_texts(&session.state)
            .iter()
            .any(|t| t.contains("ACTION BLOCKED")));
    }

    #[tokio::test]
    async fn test_chat_flow_rejects_empty_and_busy() {
        let mut session = Session::with_seed(MockImages::ok(), OfflineChat, 7);
        session.state.logo = Some("logo".to_string());

        session.send_message("   ").await;
        assert_eq!(session.state.transcript.len(), 1); // greeting only

        session.state.generating = true;
        session.send_message("a mug").await;
        assert_eq!(session.state.transcript.len(), 1);
    }

    #[tokio::test]
    async fn test_random_confirmation_expands_to_three_concurrent_calls() {
        let mut session = Session::with_seed(MockImages::ok(), OfflineChat, 42);
        session.state.logo = Some("logo".to_string());

        session.send_message("random").await;
        assert_eq!(
            session.state.pending_action.as_ref().unwrap().kind,
            ActionKind::Random
        );

        session.confirm_pending_action().await;

        let calls = session.images.calls();
        assert_eq!(calls.len(), 3);
        // All three prompts expand the same curated seed.
        let seed = RANDOM_PROMPTS
            .iter()
            .find(|seed| calls.iter().all(|(prompt, _)| prompt.contains(*seed)))
            .copied();
        assert!(seed.is_some(), "calls did not share a curated seed: {:?}", calls);
        for (_, ratio) in &calls {
            assert!(RANDOM_RATIOS.contains(ratio));
        }

        assert_eq!(session.state.gallery.len(), 3);
        let last = session.state.transcript.last().unwrap();
        assert!(last.text.contains("3 NEW ASSETS"));
        let first_gallery_id = session.state.gallery.iter().next().unwrap().id.clone();
        assert_eq!(last.related_image_id.as_deref(), Some(first_gallery_id.as_str()));
    }

    #[tokio::test]
    async fn test_seeded_sessions_are_deterministic() {
        let mut ratios = Vec::new();
        for _ in 0..2 {
            let mut session = Session::with_seed(MockImages::ok(), OfflineChat, 42);
            session.state.logo = Some("logo".to_string());
            session.trigger_random();
            session.confirm_pending_action().await;
            ratios.push(
                session
                    .images
                    .calls()
                    .into_iter()
                    .map(|(_, r)| r)
                    .collect::<Vec<_>>(),
            );
        }
        assert_eq!(ratios[0], ratios[1]);
    }

    #[tokio::test]
    async fn test_generate_confirmation_uses_square_ratio() {
        let mut session = Session::with_seed(MockImages::ok(), OfflineChat, 7);
        session.state.logo = Some("logo".to_string());

        session.send_message("a coffee cup").await;
        session.confirm_pending_action().await;

        let calls = session.images.calls();
        assert_eq!(calls.len(), 3);
        assert!(calls.iter().all(|(_, ratio)| *ratio == AspectRatio::Square));
    }

    #[tokio::test]
    async fn test_modify_confirmation_issues_one_square_call() {
        let mut session = Session::with_seed(MockImages::ok(), OfflineChat, 7);
        session.state.logo = Some("logo".to_string());
        let original =
            GeneratedImage::new("url".to_string(), "orig".to_string(), ImageKind::Initial);
        let id = original.id.clone();
        session.state.gallery.prepend_batch(vec![original]);

        assert!(session.select_for_edit(&id));
        session.send_message("make it gold").await;
        assert_eq!(
            session.state.pending_action.as_ref().unwrap().kind,
            ActionKind::Modify
        );

        session.confirm_pending_action().await;

        let calls = session.images.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, AspectRatio::Square);
        assert!(calls[0].0.contains("make it gold"));

        assert_eq!(session.state.gallery.len(), 2);
        let newest = session.state.gallery.iter().next().unwrap();
        assert_eq!(newest.kind, ImageKind::Modification);
        assert!(session.state.edit_target.is_none());
        assert!(session.state.pending_action.is_none());
    }

    #[tokio::test]
    async fn test_modify_failure_still_clears_edit_target() {
        let mut session = Session::with_seed(MockImages::failing(), OfflineChat, 7);
        session.state.logo = Some("logo".to_string());
        let original =
            GeneratedImage::new("url".to_string(), "orig".to_string(), ImageKind::Initial);
        let id = original.id.clone();
        session.state.gallery.prepend_batch(vec![original]);
        session.select_for_edit(&id);
        session.send_message("make it gold").await;

        session.confirm_pending_action().await;

        assert_eq!(session.state.gallery.len(), 1);
        assert!(session.state.edit_target.is_none());
        assert!(system_texts(&session.state)
            .iter()
            .any(|t| t.contains("GENERATION FAILED")));
    }

    #[tokio::test]
    async fn test_all_creation_calls_failing_is_flow_failure() {
        let mut session = Session::with_seed(MockImages::failing(), OfflineChat, 7);
        session.state.logo = Some("logo".to_string());

        session.send_message("a coffee cup").await;
        session.confirm_pending_action().await;

        assert_eq!(session.state.gallery.len(), 0);
        assert_eq!(
            session.state.transcript.last().unwrap().text,
            "GENERATION FAILED."
        );
    }

    #[tokio::test]
    async fn test_confirm_without_pending_action_is_noop() {
        let mut session = Session::with_seed(MockImages::ok(), OfflineChat, 7);
        session.state.logo = Some("logo".to_string());
        session.confirm_pending_action().await;
        assert!(session.images.calls().is_empty());
    }

    #[tokio::test]
    async fn test_trigger_random_requires_logo_and_idle() {
        let mut session = Session::with_seed(MockImages::ok(), OfflineChat, 7);
        session.trigger_random();
        assert!(session.state.pending_action.is_none());

        session.state.logo = Some("logo".to_string());
        session.state.generating = true;
        session.trigger_random();
        assert!(session.state.pending_action.is_none());

        session.state.generating = false;
        session.trigger_random();
        assert_eq!(
            session.state.pending_action.as_ref().unwrap().kind,
            ActionKind::Random
        );
    }

    #[tokio::test]
    async fn test_clear_edit_selection_drops_pending_action() {
        let mut session = Session::with_seed(MockImages::ok(), OfflineChat, 7);
        session.state.logo = Some("logo".to_string());
        session.trigger_random();
        session.clear_edit_selection();
        assert!(session.state.pending_action.is_none());
        assert!(session.state.edit_target.is_none());
    }

    #[tokio::test]
    async fn test_reset_returns_to_initial_state() {
        let mut session = Session::with_seed(MockImages::ok(), OfflineChat, 7);
        session.state.logo = Some("logo".to_string());
        session.trigger_random();

        session.reset();

        assert!(session.state.logo.is_none());
        assert!(session.state.pending_action.is_none());
        assert_eq!(session.state.transcript.len(), 1);
    }
}
