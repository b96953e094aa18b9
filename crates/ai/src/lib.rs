//! `barkeep-ai`
//!
//! **Responsibility:** the generative-AI boundary.
//!
//! This crate owns the completion client, the bartender prompt, and the two
//! workflows built on top of it (guest chat and flavor-note enrichment). It
//! never persists anything itself: workflows return updated records and the
//! caller decides whether to save them.

pub mod chat;
pub mod client;
pub mod enrich;
pub mod error;
pub mod prompt;

pub use chat::{ChatOutcome, ChatService};
pub use client::{
    AnthropicClient, ChatTurn, CompletionClient, CompletionRequest, DEFAULT_MODEL,
    MockCompletionClient, Role,
};
pub use enrich::{ENRICH_BATCH_LIMIT, FlavorNoteEnricher};
pub use error::{AiError, AiResult};
