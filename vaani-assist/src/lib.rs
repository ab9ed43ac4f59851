//! Legal-FAQ assistant for Vaani-Nyay.
//!
//! An [`Assistant`] wraps a [`ChatBackend`] with the policy the app
//! promises its users: every question gets an answer. Rate limits are
//! retried with backoff; a backend that stays rate limited is abandoned
//! for the session and questions are answered from a canned table of
//! legal guidance instead. Refused questions and transport failures get
//! apologetic replies.

mod client;
mod offline;
mod policy;

pub use client::{ChatBackend, ChatError, ChatTurn, GeminiClient, Speaker};
pub use offline::answer as offline_answer;
pub use policy::Assistant;
