//! Session persistence — history and persona state per session.

pub mod file;
pub mod memory;
pub mod traits;

pub use file::JsonFileSessionStore;
pub use memory::InMemorySessionStore;
pub use traits::{SessionRecord, SessionStore, Turn};
