//! Shared domain types for stratboard.
//!
//! This crate contains the core domain types used across the stratboard
//! service: chat messages, conversation logs, board configuration, and
//! their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
