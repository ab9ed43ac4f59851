//! Speech-to-text capture for Vaani-Nyay.
//!
//! Captures are single utterances: a renderer starts one, keeps handling
//! keyboard input while it runs, and polls the handle for the one
//! terminal outcome. [`LiveCapture`] records audio and sends it through a
//! Bhashini pipeline; [`ScriptedCapture`] replays canned outcomes so
//! renderers can be tested without a microphone or network.
//!
//! Capture failures are ordinary values, not panics: a form that loses
//! its speech backend keeps working from the keyboard.

mod bhashini;
mod capture;
mod live;
mod scripted;

pub use bhashini::{BhashiniClient, BhashiniError};
pub use capture::{CaptureError, CaptureHandle, SpeechCapture, Transcript};
pub use live::{AudioSource, LiveCapture, WavFileSource};
pub use scripted::ScriptedCapture;
