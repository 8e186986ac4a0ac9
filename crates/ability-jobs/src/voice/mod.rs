//! Voice mode: speech adapters, turn sequencing, the session controller and page scripts.

pub mod scripts;
pub mod session;
pub mod speech;
pub mod turn;

#[cfg(test)]
pub(crate) mod tests;

pub use scripts::{PageScript, ScriptOutcome};
pub use session::{is_affirmative, FirstLoadOutcome, VoiceError, VoiceSession, VoiceStatus};
pub use speech::{
    RecognitionSettings, SpeechCapabilities, SpeechError, SpeechRecognizer, SpeechSynthesizer,
    Utterance,
};
pub use turn::{Turn, TurnKind, TurnSequencer, VoiceActivity};
