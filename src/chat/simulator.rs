use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

const TEMPLATES: [&str; 4] = [
    "You said: \"{}\". Tell me more!",
    "Interesting! I heard \"{}\".",
    "Thanks for sharing \"{}\". How else can I help?",
    "Got it: \"{}\". Let me think about that.",
];

/// Chooses which canned reply to send. `pick(n)` must return an index below `n`.
pub trait ReplyPicker: Send + Sync {
    fn pick(&self, n: usize) -> usize;
}

/// Uniform choice backed by `StdRng`.
pub struct RandomPicker {
    rng: Mutex<StdRng>,
}

impl RandomPicker {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplyPicker for RandomPicker {
    fn pick(&self, n: usize) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_range(0..n)
    }
}

pub struct ResponseSimulator<P> {
    picker: P,
}

impl<P: ReplyPicker> ResponseSimulator<P> {
    pub fn new(picker: P) -> Self {
        Self { picker }
    }

    pub fn reply_to(&self, text: &str) -> String {
        let index = self.picker.pick(TEMPLATES.len()).min(TEMPLATES.len() - 1);
        TEMPLATES[index].replacen("{}", text, 1)
    }
}
