//! Conversation handling: session state, turn orchestration, log persistence.

pub mod log;
pub mod service;
pub mod session;

pub use log::ConversationLogService;
pub use service::ChatService;
pub use session::Session;
