use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Generation counter for page activations. Each activation supersedes the
/// previous one so late results can be recognized and dropped.
#[derive(Debug, Clone, Default)]
pub struct ActivationTracker {
    generation: Arc<AtomicU64>,
}

impl ActivationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activate(&self) -> ActivationToken {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        ActivationToken {
            generation,
            current: self.generation.clone(),
        }
    }

    /// Token for the activation already in effect.
    pub fn current(&self) -> ActivationToken {
        ActivationToken {
            generation: self.generation.load(Ordering::Acquire),
            current: self.generation.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ActivationToken {
    generation: u64,
    current: Arc<AtomicU64>,
}

impl ActivationToken {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::Acquire) == self.generation
    }
}
