//! Capture interface shared by live and scripted speech backends.
//!
//! A capture is a single utterance: the caller starts it, polls the
//! returned handle from its event loop, and receives exactly one terminal
//! outcome. Cancellation is caller-initiated only; there is no timeout.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, TryRecvError};

/// One recognized utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    text: String,
    language: String,
}

impl Transcript {
    pub fn new(text: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: language.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Language code the utterance was captured in, e.g. `"hi"`.
    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// Why a capture could not produce a transcript.
///
/// None of these are fatal to the caller: a form keeps accepting keyboard
/// input when speech fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaptureError {
    #[error("speech capture is not supported here")]
    Unsupported,

    #[error("microphone permission was denied")]
    NoPermission,

    #[error("speech engine error: {0}")]
    Engine(String),
}

/// A source of single-utterance captures.
///
/// Renderers take this as a trait object so tests can swap the live
/// backend for a scripted one.
pub trait SpeechCapture {
    /// Begin one capture in the given language.
    ///
    /// Errors returned here are known before any recording starts, such as
    /// a backend without speech support. Everything that happens after
    /// recording begins arrives through the handle instead.
    fn start_capture(&mut self, language: &str) -> Result<CaptureHandle, CaptureError>;
}

/// An in-flight capture.
///
/// Poll it from the event loop until it yields its single outcome, or
/// cancel it to discard whatever the worker produces.
#[derive(Debug)]
pub struct CaptureHandle {
    outcome: Receiver<Result<Transcript, CaptureError>>,
    cancel: Arc<AtomicBool>,
    done: bool,
}

impl CaptureHandle {
    pub(crate) fn new(
        outcome: Receiver<Result<Transcript, CaptureError>>,
        cancel: Arc<AtomicBool>,
    ) -> Self {
        Self {
            outcome,
            cancel,
            done: false,
        }
    }

    /// A handle whose outcome is already decided. Used by scripted
    /// backends, where the first poll settles immediately.
    pub(crate) fn settled(outcome: Result<Transcript, CaptureError>) -> Self {
        let (tx, rx) = std::sync::mpsc::channel();
        let _ = tx.send(outcome);
        Self::new(rx, Arc::new(AtomicBool::new(false)))
    }

    /// Check for the terminal outcome without blocking.
    ///
    /// Returns `None` while the capture is still running, `Some` exactly
    /// once when it settles, and `None` forever after.
    pub fn poll(&mut self) -> Option<Result<Transcript, CaptureError>> {
        if self.done {
            return None;
        }
        match self.outcome.try_recv() {
            Ok(outcome) => {
                self.done = true;
                Some(outcome)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.done = true;
                Some(Err(CaptureError::Engine(
                    "capture worker exited without a result".to_string(),
                )))
            }
        }
    }

    /// Abandon the capture. The worker sees the flag and drops its result;
    /// anything it sends afterwards has nowhere to land.
    pub fn cancel(self) {
        self.cancel.store(true, Ordering::Relaxed);
    }
}
