//! Lockstep mixer over staggered sweep voices.

use super::SweepOscillator;
use crate::Signal;
use crate::config::ShepardConfig;
use crate::error::Result;

/// Mixes N staggered sweep voices into one Shepard tone.
///
/// Every call to `next_sample()` draws exactly one sample from every voice
/// and returns their average. The lockstep advance is the load-bearing
/// property: if any voice skipped a round, its pitch and stagger timing
/// would drift against the others and the chorus illusion would break. The
/// voice set is fixed for the session; voices are never added or removed.
pub struct ShepardMixer {
    tones: Vec<SweepOscillator>,
}

impl ShepardMixer {
    /// Creates a mixer with `ntones` voices, voice `i` delayed by
    /// `i * tone_start_secs` worth of frames.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the configuration cannot stream, e.g. no
    /// tones or a zero-length sweep.
    ///
    /// # Examples
    ///
    /// ```
    /// use sweeptone::{Signal, ShepardConfig, ShepardMixer};
    ///
    /// let mut mixer = ShepardMixer::new(&ShepardConfig::default()).unwrap();
    /// let sample = mixer.next_sample();
    /// ```
    pub fn new(config: &ShepardConfig) -> Result<Self> {
        config.validate()?;
        let tones = (0..config.ntones)
            .map(|i| SweepOscillator::new(config, config.tone_delay_frames(i)))
            .collect();
        Ok(Self { tones })
    }

    /// Number of voices in the chorus.
    pub fn tone_count(&self) -> usize {
        self.tones.len()
    }
}

impl Signal for ShepardMixer {
    fn next_sample(&mut self) -> f64 {
        let sum: f64 = self.tones.iter_mut().map(|tone| tone.next_sample()).sum();
        sum / self.tones.len() as f64
    }
}
