//! Sine wave oscillator implementation.

use crate::Signal;
use crate::config::ToneConfig;
use crate::error::Result;
use std::f64::consts::TAU;

/// A sine wave oscillator driven by an integer frame counter.
///
/// Each sample is `0.5 * amplitude * sin(2π * phase / frames_per_cycle)`.
/// The phase counter is kept bounded modulo the cycle length so it cannot
/// lose precision over long sessions, and it advances by exactly one frame
/// per produced sample, so output is phase-continuous across buffer
/// boundaries.
///
/// # Examples
///
/// ```
/// use sweeptone::{Signal, SineOscillator, ToneConfig};
///
/// let mut osc = SineOscillator::new(&ToneConfig::default()).unwrap();
/// let sample = osc.next_sample();
/// assert_eq!(sample, 0.0); // phase 0
/// ```
pub struct SineOscillator {
    /// Current phase in frames, 0 <= phase < frames_per_cycle.
    phase: u64,
    /// Whole frames per cycle at the configured frequency.
    frames_per_cycle: u64,
    /// Peak-to-peak amplitude.
    amplitude: f64,
}

impl SineOscillator {
    /// Creates a new sine oscillator from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the configuration cannot stream, e.g. the
    /// frequency truncates to a zero-length cycle.
    pub fn new(config: &ToneConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            phase: 0,
            frames_per_cycle: config.frames_per_cycle(),
            amplitude: config.amplitude,
        })
    }
}

impl Signal for SineOscillator {
    fn next_sample(&mut self) -> f64 {
        let sample =
            0.5 * self.amplitude * (TAU * self.phase as f64 / self.frames_per_cycle as f64).sin();
        self.phase = (self.phase + 1) % self.frames_per_cycle;
        sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oscillator() -> SineOscillator {
        SineOscillator::new(&ToneConfig::default()).unwrap()
    }

    fn expected(n: u64, config: &ToneConfig) -> f64 {
        0.5 * config.amplitude * (TAU * n as f64 / config.frames_per_cycle() as f64).sin()
    }

    #[test]
    fn test_closed_form() {
        let config = ToneConfig::default();
        let mut osc = oscillator();
        for n in 0..1000 {
            let sample = osc.next_sample();
            assert!(
                (sample - expected(n % config.frames_per_cycle(), &config)).abs() < 1e-12,
                "mismatch at frame {n}"
            );
        }
    }

    #[test]
    fn test_first_sample_is_zero() {
        let mut osc = oscillator();
        assert_eq!(osc.next_sample(), 0.0);
    }

    #[test]
    fn test_sample_range() {
        let config = ToneConfig::default();
        let mut osc = oscillator();
        let peak = 0.5 * config.amplitude;
        for _ in 0..48_000 {
            let sample = osc.next_sample();
            assert!(sample.abs() <= peak + 1e-12);
        }
    }

    #[test]
    fn test_split_invariance() {
        // Producing 2048 then 2048 frames yields the same sequence as
        // producing 4096 at once.
        let mut whole = oscillator();
        let mut split = oscillator();

        let mut expected = vec![0.0; 4096];
        whole.process(&mut expected);

        let mut actual = vec![0.0; 4096];
        let (first, second) = actual.split_at_mut(2048);
        split.process(first);
        split.process(second);

        assert_eq!(actual, expected);
    }

    #[test]
    fn test_phase_stays_bounded() {
        let mut osc = oscillator();
        for _ in 0..1_000_000 {
            osc.next_sample();
        }
        assert!(osc.phase < osc.frames_per_cycle);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ToneConfig {
            frequency: 0,
            ..Default::default()
        };
        assert!(SineOscillator::new(&config).is_err());
    }
}
