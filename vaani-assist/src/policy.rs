//! Retry and fallback policy around a chat backend.
//!
//! Every question gets an answer. Rate limits are retried with backoff up
//! to two times; when a third attempt also fails the assistant flips to
//! offline mode for the rest of its life and answers from the canned
//! table, making no further network calls. Safety refusals and other
//! errors are answered with apologies and do not consume retries.

use std::collections::VecDeque;
use std::time::Duration;

use tracing::{debug, warn};

use crate::client::{ChatBackend, ChatError, ChatTurn};
use crate::offline;

/// How many turns of context travel with each completion.
const WINDOW_TURNS: usize = 6;

/// Rate-limited attempts are retried while `retries < MAX_RETRIES`; the
/// failure after the last retry flips the assistant offline.
const MAX_RETRIES: u32 = 2;

const BACKOFF_CAP: Duration = Duration::from_secs(4);

const SAFETY_REPLY: &str =
    "Sorry, I can't help with that question. Please ask about legal procedures \
     such as filing an FIR, an RTI application or a consumer complaint.";

const GENERIC_REPLY: &str =
    "Sorry, something went wrong while answering. Please ask again in a moment.";

/// A legal-FAQ assistant with a rolling conversation window.
#[derive(Debug)]
pub struct Assistant<B> {
    backend: B,
    window: VecDeque<ChatTurn>,
    offline: bool,
    backoff_base: Duration,
}

impl<B: ChatBackend> Assistant<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            window: VecDeque::new(),
            offline: false,
            backoff_base: Duration::from_millis(500),
        }
    }

    /// Override the first backoff delay. Mainly for tests.
    pub fn with_backoff_base(mut self, base: Duration) -> Self {
        self.backoff_base = base;
        self
    }

    /// Whether the assistant has given up on the backend.
    pub fn is_offline(&self) -> bool {
        self.offline
    }

    /// Answer a question. Never fails; error classes map to canned
    /// replies instead.
    ///
    /// Only successful exchanges enter the context window, so a canned
    /// apology never becomes context for the next question.
    pub async fn ask(&mut self, question: &str) -> String {
        if self.offline {
            debug!("answering offline");
            return offline::answer(question).to_string();
        }

        let mut turns: Vec<ChatTurn> = self.window.iter().cloned().collect();
        turns.push(ChatTurn::user(question));
        while turns.len() > WINDOW_TURNS {
            turns.remove(0);
        }

        let mut retries = 0;
        loop {
            match self.backend.complete(&turns).await {
                Ok(reply) => {
                    self.remember(ChatTurn::user(question));
                    self.remember(ChatTurn::model(&reply));
                    return reply;
                }
                Err(ChatError::RateLimited) if retries < MAX_RETRIES => {
                    let delay = (self.backoff_base * 2u32.pow(retries)).min(BACKOFF_CAP);
                    debug!("rate limited, retrying in {delay:?}");
                    tokio::time::sleep(delay).await;
                    retries += 1;
                }
                Err(ChatError::RateLimited) => {
                    warn!("rate limited {} times, switching to offline answers", retries + 1);
                    self.offline = true;
                    return offline::answer(question).to_string();
                }
                Err(ChatError::SafetyFiltered) => {
                    debug!("question was declined by the backend");
                    return SAFETY_REPLY.to_string();
                }
                Err(ChatError::Other(message)) => {
                    warn!("chat completion failed: {message}");
                    return GENERIC_REPLY.to_string();
                }
            }
        }
    }

    fn remember(&mut self, turn: ChatTurn) {
        self.window.push_back(turn);
        while self.window.len() > WINDOW_TURNS {
            self.window.pop_front();
        }
    }
}
