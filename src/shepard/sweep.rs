//! Single frequency-sweep voice.

use crate::Signal;
use crate::config::ShepardConfig;
use std::f64::consts::{PI, TAU};

/// One frequency-modulated tone of a Shepard chorus.
///
/// The voice is silent for its configured startup delay, then repeats an
/// exponential frequency ramp from `start_freq` to `end_freq` forever. A
/// bell-shaped amplitude envelope is zero at both ends of the sweep and
/// peaks mid-sweep, additionally scaled by the exponential interpolation
/// factor so the low-frequency end enters quietly.
///
/// The delay counter counts down to zero exactly once and never rearms; the
/// sweep position advances one frame per sample and wraps at the sweep
/// length, restarting the ramp immediately.
pub struct SweepOscillator {
    /// Startup silence still to emit, in frames.
    delay_remaining: u64,
    /// Position within the current sweep, 0 <= position < sweep_frames.
    position: u64,
    /// Sweep length in frames.
    sweep_frames: u64,
    start_freq: f64,
    end_freq: f64,
    /// Peak amplitude of this voice.
    loudness: f64,
}

impl SweepOscillator {
    /// Creates a sweep voice with the given startup delay.
    ///
    /// The caller is expected to have validated `config`; the mixer does so
    /// once for all of its voices.
    pub fn new(config: &ShepardConfig, delay_frames: u64) -> Self {
        Self {
            delay_remaining: delay_frames,
            position: 0,
            sweep_frames: config.sweep_frames(),
            start_freq: config.start_freq,
            end_freq: config.end_freq,
            loudness: config.loudness,
        }
    }

    /// Frames of startup silence still to emit.
    pub fn delay_remaining(&self) -> u64 {
        self.delay_remaining
    }
}

impl Signal for SweepOscillator {
    fn next_sample(&mut self) -> f64 {
        if self.delay_remaining > 0 {
            self.delay_remaining -= 1;
            return 0.0;
        }

        let frac = self.position as f64 / self.sweep_frames as f64;
        let scale = 2.0_f64.powf(frac) - 1.0;
        let freq = self.start_freq + (self.end_freq - self.start_freq) * scale;
        let amplitude = 0.5 * self.loudness * (PI * frac).sin() * scale;
        let angle = TAU * freq * self.position as f64 / self.sweep_frames as f64;
        let sample = amplitude * angle.sin();

        self.position += 1;
        if self.position >= self.sweep_frames {
            self.position = 0;
        }
        sample
    }
}
