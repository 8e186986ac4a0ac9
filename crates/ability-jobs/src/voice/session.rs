use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::speech::{RecognitionSettings, SpeechCapabilities, Utterance};
use super::turn::{TurnKind, TurnSequencer, VoiceActivity};
use crate::config::VoiceConfig;

pub const WELCOME_PROMPT: &str =
    "Welcome to Ability Jobs. Would you like to use the voice assistant? Say yes or no.";
pub const ACCEPTED_PROMPT: &str =
    "Voice mode activated. I will guide you through the website.";
pub const DECLINED_PROMPT: &str =
    "Okay, you can browse normally. You can turn on voice mode at any time from the menu.";
pub const TOGGLE_CONFIRMATION: &str = "Voice mode activated.";

const AFFIRMATIVE_TOKENS: [&str; 3] = ["yes", "yeah", "sure"];

/// True when the transcript contains one of the accepted affirmative words.
pub fn is_affirmative(transcript: &str) -> bool {
    let lower = transcript.to_lowercase();
    AFFIRMATIVE_TOKENS.iter().any(|token| lower.contains(token))
}

#[derive(Debug, thiserror::Error)]
pub enum VoiceError {
    #[error("speech recognition is not supported on this platform")]
    RecognitionUnsupported,
}

/// How the first-load consent prompt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FirstLoadOutcome {
    Accepted,
    Declined,
    Unsupported,
}

/// Snapshot of the session flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VoiceStatus {
    pub enabled: bool,
    pub listening: bool,
    pub speaking: bool,
    pub has_asked: bool,
}

/// Owns voice-mode state for one application session and runs every spoken turn.
#[derive(Debug)]
pub struct VoiceSession {
    capabilities: SpeechCapabilities,
    config: VoiceConfig,
    enabled: AtomicBool,
    first_load_started: AtomicBool,
    has_asked: AtomicBool,
    /// Bumped by every `speak`; a queued utterance plays only if still newest.
    utterances: AtomicU64,
    turns: TurnSequencer,
}

impl VoiceSession {
    pub fn new(capabilities: SpeechCapabilities, config: VoiceConfig) -> Self {
        Self {
            capabilities,
            config,
            enabled: AtomicBool::new(false),
            first_load_started: AtomicBool::new(false),
            has_asked: AtomicBool::new(false),
            utterances: AtomicU64::new(0),
            turns: TurnSequencer::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    pub fn activity(&self) -> VoiceActivity {
        self.turns.activity()
    }

    pub fn subscribe(&self) -> watch::Receiver<VoiceActivity> {
        self.turns.subscribe()
    }

    pub fn status(&self) -> VoiceStatus {
        let activity = self.activity();
        VoiceStatus {
            enabled: self.is_enabled(),
            listening: activity.is_listening(),
            speaking: activity.is_speaking(),
            has_asked: self.has_asked.load(Ordering::Acquire),
        }
    }

    /// Turn voice mode on or off. Switching it on speaks one confirmation.
    pub async fn enable(&self, on: bool) {
        let was_enabled = self.enabled.swap(on, Ordering::AcqRel);
        info!(enabled = on, "voice mode toggled");
        if on && !was_enabled {
            self.speak(TOGGLE_CONFIRMATION).await;
        }
    }

    /// Speak `text`, interrupting whatever utterance is still playing and
    /// dropping any that are still queued. Silent no-op without a synthesizer;
    /// playback errors are swallowed.
    pub async fn speak(&self, text: &str) {
        let Some(synthesizer) = self.capabilities.synthesizer.as_ref() else {
            return;
        };

        let ticket = self.utterances.fetch_add(1, Ordering::AcqRel) + 1;
        synthesizer.cancel();
        let turn = self.turns.begin(TurnKind::Speak).await;
        if self.utterances.load(Ordering::Acquire) != ticket {
            debug!(text, "queued utterance superseded");
            return;
        }

        let utterance = Utterance {
            text: text.to_string(),
            rate: self.config.rate,
            pitch: self.config.pitch,
        };
        if let Err(err) = synthesizer.speak(&utterance).await {
            debug!(error = %err, "utterance ended with an error");
        }

        turn.settle();
    }

    /// Listen for a single phrase. Recognition errors yield an empty transcript;
    /// only a missing recognizer is reported as an error.
    pub async fn listen(&self) -> Result<String, VoiceError> {
        let recognizer = self
            .capabilities
            .recognizer
            .as_ref()
            .ok_or(VoiceError::RecognitionUnsupported)?;

        let settings = RecognitionSettings::from(&self.config);
        let turn = self.turns.begin(TurnKind::Listen).await;

        let transcript = match recognizer.recognize(&settings).await {
            Ok(transcript) => transcript,
            Err(err) => {
                debug!(error = %err, "recognition failed");
                String::new()
            }
        };

        turn.settle();
        Ok(transcript)
    }

    /// Start the one-time welcome prompt in the background. Returns `None` when
    /// it has already been started for this session.
    pub fn start_first_load(self: &Arc<Self>) -> Option<JoinHandle<FirstLoadOutcome>> {
        if self.first_load_started.swap(true, Ordering::AcqRel) {
            return None;
        }

        let session = Arc::clone(self);
        Some(tokio::spawn(async move {
            tokio::time::sleep(session.config.first_load_delay).await;
            let outcome = session.ask_for_voice_mode().await;
            session.has_asked.store(true, Ordering::Release);
            info!(?outcome, "first-load voice prompt finished");
            outcome
        }))
    }

    async fn ask_for_voice_mode(&self) -> FirstLoadOutcome {
        self.speak(WELCOME_PROMPT).await;

        let response = match self.listen().await {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "continuing without voice mode");
                return FirstLoadOutcome::Unsupported;
            }
        };

        if is_affirmative(&response) {
            self.enabled.store(true, Ordering::Release);
            self.speak(ACCEPTED_PROMPT).await;
            FirstLoadOutcome::Accepted
        } else {
            self.speak(DECLINED_PROMPT).await;
            FirstLoadOutcome::Declined
        }
    }
}
