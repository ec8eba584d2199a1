//! scam-pot — a conversational honeypot for payment scams.

pub mod agent;
pub mod config;
pub mod error;
pub mod metrics;
pub mod persona;
pub mod pipeline;
pub mod server;
pub mod store;
