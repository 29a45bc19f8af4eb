//! Business logic and port trait definitions for stratboard.
//!
//! This crate defines the "ports" (the [`store::DocumentStore`] and
//! [`llm::provider::ChatProvider`] traits) that the infrastructure layer
//! implements. It depends only on `stratboard-types` -- never on
//! `stratboard-infra` or any HTTP/IO crate.

pub mod chat;
pub mod config;
pub mod llm;
pub mod prompt;
pub mod store;
