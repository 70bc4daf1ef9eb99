use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Chooses one of several reply templates.
pub trait TemplatePicker: Send + Sync {
    /// Returns an index in `0..len`. Callers never pass `len == 0`.
    fn pick(&self, len: usize) -> usize;
}

/// Uniform pick from the thread-local RNG.
pub struct RandomPicker;

impl TemplatePicker for RandomPicker {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Uniform pick from a seeded RNG, reproducible across runs.
pub struct SeededPicker {
    rng: Mutex<StdRng>,
}

impl SeededPicker {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl TemplatePicker for SeededPicker {
    fn pick(&self, len: usize) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(0..len)
    }
}

/// Always picks the same slot (wrapped into range).
pub struct FixedPicker(pub usize);

impl TemplatePicker for FixedPicker {
    fn pick(&self, len: usize) -> usize {
        self.0 % len
    }
}
