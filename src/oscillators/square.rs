//! Square wave oscillator implementation.

use crate::Signal;
use crate::config::ToneConfig;
use crate::error::Result;

/// A square wave oscillator that flips polarity every half cycle.
///
/// Emits `sign` (either `+0.5 * amplitude` or `-0.5 * amplitude`) and counts
/// frames; when the counter reaches the half-cycle length the sign flips and
/// the counter resets. The threshold is checked after every single-frame
/// increment, never once per buffer, so the flip lands on the exact frame
/// even when the buffer size is not a multiple of the half cycle.
pub struct SquareOscillator {
    /// Frames emitted at the current polarity, 0 <= counter < half cycle.
    counter: u64,
    /// Current output level, +/- half the configured amplitude.
    sign: f64,
    /// Whole frames per half cycle at the configured frequency.
    frames_per_half_cycle: u64,
}

impl SquareOscillator {
    /// Creates a new square oscillator from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the configuration cannot stream, e.g. the
    /// frequency truncates to a zero-length half cycle.
    pub fn new(config: &ToneConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            counter: 0,
            sign: 0.5 * config.amplitude,
            frames_per_half_cycle: config.frames_per_half_cycle(),
        })
    }
}

impl Signal for SquareOscillator {
    fn next_sample(&mut self) -> f64 {
        let sample = self.sign;
        self.counter += 1;
        if self.counter >= self.frames_per_half_cycle {
            self.sign = -self.sign;
            self.counter = 0;
        }
        sample
    }
}
