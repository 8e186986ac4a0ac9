//! Serializes speak and listen turns so at most one is in flight.

use serde::Serialize;
use tokio::sync::{watch, Mutex, MutexGuard};

/// What the voice session is doing right now. A single value, so speaking and
/// listening can never be reported together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VoiceActivity {
    #[default]
    Idle,
    Speaking,
    Listening,
}

impl VoiceActivity {
    pub const fn is_speaking(self) -> bool {
        matches!(self, Self::Speaking)
    }

    pub const fn is_listening(self) -> bool {
        matches!(self, Self::Listening)
    }

    /// Indicator text shown while a turn is active.
    pub const fn indicator(self) -> Option<&'static str> {
        match self {
            Self::Idle => None,
            Self::Speaking => Some("Speaking..."),
            Self::Listening => Some("Listening..."),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnKind {
    Speak,
    Listen,
}

impl From<TurnKind> for VoiceActivity {
    fn from(kind: TurnKind) -> Self {
        match kind {
            TurnKind::Speak => Self::Speaking,
            TurnKind::Listen => Self::Listening,
        }
    }
}

#[derive(Debug)]
pub struct TurnSequencer {
    gate: Mutex<()>,
    activity: watch::Sender<VoiceActivity>,
}

impl Default for TurnSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnSequencer {
    pub fn new() -> Self {
        let (activity, _) = watch::channel(VoiceActivity::Idle);
        Self {
            gate: Mutex::new(()),
            activity,
        }
    }

    /// Wait for the previous turn to finish, then start a new one.
    pub async fn begin(&self, kind: TurnKind) -> Turn<'_> {
        let permit = self.gate.lock().await;
        self.activity.send_replace(kind.into());
        Turn {
            _permit: permit,
            activity: &self.activity,
            kind,
            settled: false,
        }
    }

    pub fn activity(&self) -> VoiceActivity {
        *self.activity.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<VoiceActivity> {
        self.activity.subscribe()
    }
}

/// An in-flight turn. Pending until settled or dropped; either way the session
/// returns to idle before the next turn can begin.
#[derive(Debug)]
pub struct Turn<'a> {
    _permit: MutexGuard<'a, ()>,
    activity: &'a watch::Sender<VoiceActivity>,
    kind: TurnKind,
    settled: bool,
}

impl Turn<'_> {
    pub fn kind(&self) -> TurnKind {
        self.kind
    }

    pub fn settle(mut self) {
        self.finish();
    }

    fn finish(&mut self) {
        if !self.settled {
            self.settled = true;
            self.activity.send_replace(VoiceActivity::Idle);
        }
    }
}

impl Drop for Turn<'_> {
    fn drop(&mut self) {
        self.finish();
    }
}
