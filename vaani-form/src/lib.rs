//! # vaani-form
//!
//! Guided form-filling sessions. Renderer-agnostic.
//!
//! A [`FormSession`] owns the answers for one form and a cursor through its
//! visible fields. Renderers (TUI wizard, scripted test driver) push user
//! input through the session's operations and read everything they show
//! back out of it; the session holds no presentation state.
//!
//! ```rust,ignore
//! use vaani_form::{FormSession, StepOutcome};
//!
//! let mut session = FormSession::new(vaani_forms::voter_id::schema());
//! session.set_value("applicantName", "Asha Devi")?;
//! while session.advance() == StepOutcome::Moved {}
//! assert!(session.in_preview());
//! ```

// Re-export all types from vaani-form-types
pub use vaani_form_types::*;

mod session;
pub use session::{Cursor, FormSession, StepOutcome};

mod rules;

pub mod display;

// Scripted answer source for driving sessions without user interaction
mod scripted;
pub use scripted::{ScriptedAnswers, ScriptedError};
