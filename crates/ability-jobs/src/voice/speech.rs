//! Platform speech adapters.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::VoiceConfig;

/// A single piece of text to synthesize.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub rate: f32,
    pub pitch: f32,
}

/// One-shot recognition parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionSettings {
    pub locale: String,
    pub interim_results: bool,
    pub max_alternatives: u8,
}

impl RecognitionSettings {
    pub fn single_shot(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            interim_results: false,
            max_alternatives: 1,
        }
    }
}

impl From<&VoiceConfig> for RecognitionSettings {
    fn from(config: &VoiceConfig) -> Self {
        Self::single_shot(config.locale.clone())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("speech playback failed: {0}")]
    Playback(String),
    #[error("speech recognition failed: {0}")]
    Recognition(String),
}

/// Text-to-speech output.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Stop the utterance currently playing, if any. Its `speak` call resolves.
    fn cancel(&self);

    /// Resolves once playback has ended or failed.
    async fn speak(&self, utterance: &Utterance) -> Result<(), SpeechError>;
}

/// Speech-to-text input.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Recognize a single phrase and return its transcript.
    async fn recognize(&self, settings: &RecognitionSettings) -> Result<String, SpeechError>;
}

/// The speech features the current platform actually offers.
#[derive(Clone, Default)]
pub struct SpeechCapabilities {
    pub synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    pub recognizer: Option<Arc<dyn SpeechRecognizer>>,
}

impl SpeechCapabilities {
    /// No speech support at all; voice mode degrades to silence.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(
        synthesizer: Arc<dyn SpeechSynthesizer>,
        recognizer: Arc<dyn SpeechRecognizer>,
    ) -> Self {
        Self {
            synthesizer: Some(synthesizer),
            recognizer: Some(recognizer),
        }
    }

    pub fn with_synthesizer(mut self, synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        self.synthesizer = Some(synthesizer);
        self
    }

    pub fn with_recognizer(mut self, recognizer: Arc<dyn SpeechRecognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }
}

impl fmt::Debug for SpeechCapabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpeechCapabilities")
            .field("synthesizer", &self.synthesizer.is_some())
            .field("recognizer", &self.recognizer.is_some())
            .finish()
    }
}
