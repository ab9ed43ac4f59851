//! Live capture backed by the Bhashini pipeline.
//!
//! `LiveCapture` records one utterance from an [`AudioSource`], ships it
//! to the transcription endpoint, and optionally translates the result,
//! all on a worker thread so the caller's event loop never blocks. The
//! outcome comes back through the [`CaptureHandle`] channel.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread;

use tracing::debug;

use crate::bhashini::BhashiniClient;
use crate::capture::{CaptureError, CaptureHandle, SpeechCapture, Transcript};

/// Something that can record one utterance of WAV audio.
///
/// Implementations should watch `cancel` and return early when it flips;
/// a source that cannot record (no device, no permission) reports the
/// matching [`CaptureError`] instead of audio.
pub trait AudioSource: Send + Sync {
    fn record_utterance(&self, cancel: &AtomicBool) -> Result<Vec<u8>, CaptureError>;
}

/// An audio source that replays a WAV file from disk.
///
/// Stands in for microphone hardware, which is platform chrome outside
/// this crate. Useful for piping pre-recorded utterances through the real
/// pipeline.
#[derive(Debug, Clone)]
pub struct WavFileSource {
    path: PathBuf,
}

impl WavFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AudioSource for WavFileSource {
    fn record_utterance(&self, _cancel: &AtomicBool) -> Result<Vec<u8>, CaptureError> {
        std::fs::read(&self.path).map_err(|err| {
            CaptureError::Engine(format!("could not read {}: {err}", self.path.display()))
        })
    }
}

/// Speech capture over a [`BhashiniClient`] and an [`AudioSource`].
pub struct LiveCapture {
    client: BhashiniClient,
    source: Arc<dyn AudioSource>,
    translate_to: Option<String>,
}

impl LiveCapture {
    pub fn new(client: BhashiniClient, source: impl AudioSource + 'static) -> Self {
        Self {
            client,
            source: Arc::new(source),
            translate_to: None,
        }
    }

    /// Translate every transcript into the given language before it is
    /// delivered. Captures already in that language pass through.
    pub fn with_translation(mut self, target_language: impl Into<String>) -> Self {
        self.translate_to = Some(target_language.into());
        self
    }
}

impl SpeechCapture for LiveCapture {
    fn start_capture(&mut self, language: &str) -> Result<CaptureHandle, CaptureError> {
        debug!("starting speech capture in {language}");

        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));

        let client = self.client.clone();
        let source = Arc::clone(&self.source);
        let translate_to = self.translate_to.clone();
        let language = language.to_string();
        let flag = Arc::clone(&cancel);

        thread::Builder::new()
            .name("speech-capture".to_string())
            .spawn(move || {
                let outcome =
                    run_capture(&client, source.as_ref(), &language, translate_to, &flag);
                if !flag.load(Ordering::Relaxed) {
                    let _ = tx.send(outcome);
                }
            })
            .map_err(|err| {
                CaptureError::Engine(format!("could not start capture worker: {err}"))
            })?;

        Ok(CaptureHandle::new(rx, cancel))
    }
}

/// Record, transcribe and optionally translate one utterance. Runs on the
/// worker thread with its own single-threaded runtime.
fn run_capture(
    client: &BhashiniClient,
    source: &dyn AudioSource,
    language: &str,
    translate_to: Option<String>,
    cancel: &AtomicBool,
) -> Result<Transcript, CaptureError> {
    let audio = source.record_utterance(cancel)?;
    if cancel.load(Ordering::Relaxed) {
        return Err(CaptureError::Engine("capture cancelled".to_string()));
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| CaptureError::Engine(format!("could not start async runtime: {err}")))?;

    let text = runtime
        .block_on(async {
            let text = client.transcribe(audio, language).await?;
            match translate_to {
                Some(target) if target != language => {
                    client.translate(&text, language, &target).await
                }
                _ => Ok(text),
            }
        })
        .map_err(|err| CaptureError::Engine(err.to_string()))?;

    Ok(Transcript::new(text, language))
}
