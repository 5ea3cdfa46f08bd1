//! Chat-completion endpoint: client and model-output JSON helpers.

pub mod client;
pub mod parse;

pub use client::{ChatBackend, ChatClient, ChatTurn};
