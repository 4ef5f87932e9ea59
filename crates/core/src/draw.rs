//! Non-repeating question draw.
//!
//! A draw picks `session_size` distinct bank indices. Indices drawn by the
//! previous session are excluded once, unless too few indices remain, in which
//! case the whole bank is eligible again.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

use crate::model::ConfigError;

//
// ─── INDEX PICKERS ────────────────────────────────────────────────────────────
//

/// Source of positions for the draw.
pub trait IndexPicker {
    /// Return a position in `0..len`. Called only with `len > 0`.
    fn pick(&mut self, len: usize) -> usize;
}

impl<P: IndexPicker + ?Sized> IndexPicker for &mut P {
    fn pick(&mut self, len: usize) -> usize {
        (**self).pick(len)
    }
}

impl<P: IndexPicker + ?Sized> IndexPicker for Box<P> {
    fn pick(&mut self, len: usize) -> usize {
        (**self).pick(len)
    }
}

/// Uniform picker backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomPicker<R = StdRng> {
    rng: R,
}

impl<R: Rng> RandomPicker<R> {
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomPicker<StdRng> {
    /// Reproducible picker: equal seeds yield equal draws.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Picker seeded from operating system entropy.
    #[must_use]
    pub fn from_os() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> IndexPicker for RandomPicker<R> {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

/// Replays scripted positions, cycling when exhausted.
///
/// Each scripted value is reduced modulo the current `len`. An empty script
/// always picks position 0.
#[derive(Debug, Clone, Default)]
pub struct SequencePicker {
    script: Vec<usize>,
    next: usize,
}

impl SequencePicker {
    #[must_use]
    pub fn new(script: impl Into<Vec<usize>>) -> Self {
        Self {
            script: script.into(),
            next: 0,
        }
    }

    /// Always picks the first remaining index, so draws come out in bank order.
    #[must_use]
    pub fn first() -> Self {
        Self::default()
    }
}

impl IndexPicker for SequencePicker {
    fn pick(&mut self, len: usize) -> usize {
        if self.script.is_empty() {
            return 0;
        }
        let value = self.script[self.next % self.script.len()];
        self.next += 1;
        value % len
    }
}

//
// ─── DRAW ─────────────────────────────────────────────────────────────────────
//

/// Ordered bank indices selected for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draw {
    indices: Vec<usize>,
    ignored_exclusions: bool,
}

impl Draw {
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    #[must_use]
    pub fn into_indices(self) -> Vec<usize> {
        self.indices
    }

    /// True when the exclusion set had to be discarded for this draw.
    #[must_use]
    pub fn ignored_exclusions(&self) -> bool {
        self.ignored_exclusions
    }

    /// Indices to exclude from the next draw: exactly the ones drawn here.
    #[must_use]
    pub fn exclusions(&self) -> HashSet<usize> {
        self.indices.iter().copied().collect()
    }
}

/// Draw `session_size` distinct indices out of `0..bank_len`.
///
/// # Errors
///
/// Returns `ConfigError::InvalidSessionSize` if `session_size` is zero, and
/// `ConfigError::InsufficientBank` if `bank_len < session_size`.
pub fn draw(
    bank_len: usize,
    session_size: usize,
    excluded: &HashSet<usize>,
    picker: &mut impl IndexPicker,
) -> Result<Draw, ConfigError> {
    if session_size == 0 {
        return Err(ConfigError::InvalidSessionSize);
    }
    if bank_len < session_size {
        return Err(ConfigError::InsufficientBank {
            available: bank_len,
            required: session_size,
        });
    }

    let mut available: Vec<usize> = (0..bank_len).filter(|i| !excluded.contains(i)).collect();
    let ignored_exclusions = available.len() < session_size;
    if ignored_exclusions {
        available = (0..bank_len).collect();
    }

    let mut indices = Vec::with_capacity(session_size);
    while indices.len() < session_size {
        let pos = picker.pick(available.len()).min(available.len() - 1);
        indices.push(available.remove(pos));
    }

    Ok(Draw {
        indices,
        ignored_exclusions,
    })
}
