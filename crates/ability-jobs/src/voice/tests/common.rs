use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, Notify};

use crate::config::VoiceConfig;
use crate::voice::session::VoiceSession;
use crate::voice::speech::{
    RecognitionSettings, SpeechCapabilities, SpeechError, SpeechRecognizer, SpeechSynthesizer,
    Utterance,
};

pub(crate) fn instant_config() -> VoiceConfig {
    VoiceConfig {
        first_load_delay: Duration::ZERO,
        ..VoiceConfig::default()
    }
}

/// Synthesizer that finishes immediately and remembers what it said.
#[derive(Default)]
pub(crate) struct RecordingSynthesizer {
    spoken: Mutex<Vec<Utterance>>,
    cancels: AtomicUsize,
    fail: bool,
}

impl RecordingSynthesizer {
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn texts(&self) -> Vec<String> {
        self.spoken
            .lock()
            .expect("spoken mutex poisoned")
            .iter()
            .map(|utterance| utterance.text.clone())
            .collect()
    }

    pub(crate) fn utterances(&self) -> Vec<Utterance> {
        self.spoken.lock().expect("spoken mutex poisoned").clone()
    }

    pub(crate) fn cancels(&self) -> usize {
        self.cancels.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechSynthesizer for RecordingSynthesizer {
    fn cancel(&self) {
        self.cancels.fetch_add(1, Ordering::SeqCst);
    }

    async fn speak(&self, utterance: &Utterance) -> Result<(), SpeechError> {
        self.spoken
            .lock()
            .expect("spoken mutex poisoned")
            .push(utterance.clone());
        if self.fail {
            return Err(SpeechError::Playback("audio device busy".to_string()));
        }
        Ok(())
    }
}

/// Synthesizer whose utterances keep playing until cancelled.
#[derive(Default)]
pub(crate) struct UntilCancelledSynthesizer {
    stop: Notify,
    started: AtomicUsize,
}

impl UntilCancelledSynthesizer {
    pub(crate) fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechSynthesizer for UntilCancelledSynthesizer {
    fn cancel(&self) {
        self.stop.notify_waiters();
    }

    async fn speak(&self, _utterance: &Utterance) -> Result<(), SpeechError> {
        let stopped = self.stop.notified();
        self.started.fetch_add(1, Ordering::SeqCst);
        stopped.await;
        Ok(())
    }
}

/// Recognizer replaying a fixed list of results, then empty transcripts.
#[derive(Default)]
pub(crate) struct ScriptedRecognizer {
    responses: Mutex<VecDeque<Result<String, SpeechError>>>,
    settings: Mutex<Vec<RecognitionSettings>>,
}

impl ScriptedRecognizer {
    pub(crate) fn saying(responses: &[&str]) -> Self {
        Self {
            responses: Mutex::new(responses.iter().map(|r| Ok(r.to_string())).collect()),
            ..Self::default()
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            responses: Mutex::new(VecDeque::from([Err(SpeechError::Recognition(
                "no-speech".to_string(),
            ))])),
            ..Self::default()
        }
    }

    pub(crate) fn settings(&self) -> Vec<RecognitionSettings> {
        self.settings.lock().expect("settings mutex poisoned").clone()
    }
}

#[async_trait]
impl SpeechRecognizer for ScriptedRecognizer {
    async fn recognize(&self, settings: &RecognitionSettings) -> Result<String, SpeechError> {
        self.settings
            .lock()
            .expect("settings mutex poisoned")
            .push(settings.clone());
        self.responses
            .lock()
            .expect("responses mutex poisoned")
            .pop_front()
            .unwrap_or_else(|| Ok(String::new()))
    }
}

/// Recognizer that waits for the test to hand it a transcript.
pub(crate) struct GatedRecognizer {
    transcripts: tokio::sync::Mutex<mpsc::Receiver<String>>,
}

impl GatedRecognizer {
    pub(crate) fn new() -> (Self, mpsc::Sender<String>) {
        let (tx, rx) = mpsc::channel(4);
        (
            Self {
                transcripts: tokio::sync::Mutex::new(rx),
            },
            tx,
        )
    }
}

#[async_trait]
impl SpeechRecognizer for GatedRecognizer {
    async fn recognize(&self, _settings: &RecognitionSettings) -> Result<String, SpeechError> {
        self.transcripts
            .lock()
            .await
            .recv()
            .await
            .ok_or_else(|| SpeechError::Recognition("aborted".to_string()))
    }
}

pub(crate) fn session_with(
    synthesizer: Arc<RecordingSynthesizer>,
    recognizer: Arc<ScriptedRecognizer>,
) -> Arc<VoiceSession> {
    Arc::new(VoiceSession::new(
        SpeechCapabilities::new(synthesizer, recognizer),
        instant_config(),
    ))
}
