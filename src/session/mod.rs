//! Session data model: generated images, the chat transcript, pending
//! actions, and the aggregate [`SessionState`].

pub mod controller;

pub use controller::{CancelHandle, Session};

use crate::gen::batch::BatchSink;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Initial,
    Modification,
    Upload,
}

/// One gallery entry. Immutable once created; the gallery only appends or
/// removes whole entries.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub id: String,
    pub url: String,
    pub prompt: String,
    pub timestamp: DateTime<Utc>,
    pub kind: ImageKind,
}

impl GeneratedImage {
    pub fn new(url: String, prompt: String, kind: ImageKind) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            url,
            prompt,
            timestamp: Utc::now(),
            kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
    System,
}

/// One transcript entry. `related_image_id` is a weak reference: it is
/// resolved by lookup and may dangle after the gallery is cleared.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub text: String,
    pub related_image_id: Option<String>,
}

impl ChatMessage {
    fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            text: text.into(),
            related_image_id: None,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new(Role::System, text)
    }

    pub fn with_image(mut self, image_id: String) -> Self {
        self.related_image_id = Some(image_id);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Generate,
    Modify,
    Random,
}

/// A suggested operation awaiting explicit user confirmation.
#[derive(Debug, Clone)]
pub struct DesignAction {
    pub kind: ActionKind,
    pub label: String,
    pub description: String,
    pub query: String,
}

/// Newest-first image sequence with a prepend-batch insertion policy.
/// An incoming image whose id is already present is dropped.
#[derive(Debug, Default)]
pub struct Gallery {
    images: Vec<GeneratedImage>,
}

impl Gallery {
    pub fn prepend_batch(&mut self, batch: Vec<GeneratedImage>) {
        let mut fresh: Vec<GeneratedImage> = Vec::with_capacity(batch.len() + self.images.len());
        for image in batch {
            if !self.contains(&image.id) && !fresh.iter().any(|i| i.id == image.id) {
                fresh.push(image);
            }
        }
        fresh.append(&mut self.images);
        self.images = fresh;
    }

    pub fn contains(&self, id: &str) -> bool {
        self.images.iter().any(|i| i.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&GeneratedImage> {
        self.images.iter().find(|i| i.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeneratedImage> {
        self.images.iter()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn clear(&mut self) {
        self.images.clear();
    }
}

/// The single source of truth for one user session.
#[derive(Debug, Default)]
pub struct SessionState {
    pub logo: Option<String>,
    pub gallery: Gallery,
    pub transcript: Vec<ChatMessage>,
    pub pending_action: Option<DesignAction>,
    pub edit_target: Option<GeneratedImage>,
    pub analyzing: bool,
    pub generating: bool,
    pub status: String,
}

impl SessionState {
    /// Fresh state carrying the initial system greeting.
    pub fn new() -> Self {
        let mut state = Self::default();
        state.push_message(ChatMessage::system(
            "SYSTEM ONLINE.\n\nUpload a logo to begin. A full Visual Identity System \
             will be generated: logo standards, color systems, typography guides, \
             and application mockups.",
        ));
        state
    }

    pub fn push_message(&mut self, message: ChatMessage) {
        self.transcript.push(message);
    }

    /// Both busy gates block new user submissions.
    pub fn is_busy(&self) -> bool {
        self.analyzing || self.generating
    }

    /// Replace any previously pending action; at most one exists at a time.
    pub fn set_pending_action(&mut self, action: DesignAction) {
        self.pending_action = Some(action);
    }
}

impl BatchSink for SessionState {
    fn commit(&mut self, images: Vec<GeneratedImage>) {
        self.gallery.prepend_batch(images);
    }

    fn status(&mut self, status: String) {
        self.status = status;
    }
}
