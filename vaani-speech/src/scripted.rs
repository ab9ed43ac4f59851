//! Scripted capture source for driving renderers without a microphone.
//!
//! Each `start_capture` call consumes the next scripted outcome, settled
//! on the first poll. An exhausted script behaves like a device without
//! speech support.
//!
//! # Example
//!
//! ```rust,ignore
//! use vaani_speech::{CaptureError, ScriptedCapture, SpeechCapture};
//!
//! let mut capture = ScriptedCapture::new()
//!     .with_transcript("मेरा नाम आशा है")
//!     .with_error(CaptureError::NoPermission);
//!
//! let mut handle = capture.start_capture("hi")?;
//! assert!(handle.poll().is_some());
//! ```

use std::collections::VecDeque;

use crate::capture::{CaptureError, CaptureHandle, SpeechCapture, Transcript};

#[derive(Debug, Clone)]
enum ScriptedOutcome {
    Text(String),
    Error(CaptureError),
}

/// Pre-scripted capture outcomes, delivered in order.
#[derive(Debug, Clone, Default)]
pub struct ScriptedCapture {
    outcomes: VecDeque<ScriptedOutcome>,
}

impl ScriptedCapture {
    /// Create an empty script.
    pub fn new() -> Self {
        Self {
            outcomes: VecDeque::new(),
        }
    }

    /// Script a successful transcript. The capture language is filled in
    /// when the capture starts.
    pub fn with_transcript(mut self, text: impl Into<String>) -> Self {
        self.outcomes.push_back(ScriptedOutcome::Text(text.into()));
        self
    }

    /// Script a failed capture.
    pub fn with_error(mut self, error: CaptureError) -> Self {
        self.outcomes.push_back(ScriptedOutcome::Error(error));
        self
    }
}

impl SpeechCapture for ScriptedCapture {
    fn start_capture(&mut self, language: &str) -> Result<CaptureHandle, CaptureError> {
        match self.outcomes.pop_front() {
            Some(ScriptedOutcome::Text(text)) => {
                Ok(CaptureHandle::settled(Ok(Transcript::new(text, language))))
            }
            Some(ScriptedOutcome::Error(error)) => Ok(CaptureHandle::settled(Err(error))),
            None => Err(CaptureError::Unsupported),
        }
    }
}
