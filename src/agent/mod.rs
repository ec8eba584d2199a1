//! Honeypot agent — per-turn orchestration and the chat service around it.

pub mod chat;
pub mod orchestrator;

pub use chat::{ChatRequest, ChatResponse, ChatService};
pub use orchestrator::{AgentTurnResult, TurnOrchestrator, session_key};
