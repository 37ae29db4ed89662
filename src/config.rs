//! Session configuration and the quantities derived from it.
//!
//! All cycle lengths are whole frame counts obtained by integer division, so
//! the realized frequency is always at or above the requested one. This is a
//! documented approximation, not a defect.

use crate::error::{Error, Result};

/// Configuration for a fixed-pitch (sine or square) session.
///
/// Immutable for the lifetime of a session; frequency and amplitude cannot
/// change mid-stream.
#[derive(Debug, Clone, PartialEq)]
pub struct ToneConfig {
    /// Sample rate in frames per second.
    pub sample_rate: u32,
    /// Frequency in cycles per second.
    pub frequency: u32,
    /// Peak-to-peak amplitude. No clamping is applied downstream, so the
    /// caller is responsible for keeping output within [-1.0, 1.0].
    pub amplitude: f64,
    /// Output buffer size in frames. Less than 1024 is not recommended, as
    /// most audio interfaces will choke horribly.
    pub buffer_size: usize,
    /// Output time in milliseconds.
    pub msecs: u64,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000,
            frequency: 400,
            amplitude: 0.1,
            buffer_size: 2048,
            msecs: 3000,
        }
    }
}

impl ToneConfig {
    /// Rejects configurations that cannot stream.
    ///
    /// A frequency high enough to truncate the half-cycle to zero frames is
    /// the interesting case; zero-sized buffers and zero durations are
    /// rejected for the same reason.
    pub fn validate(&self) -> Result<()> {
        if self.frequency == 0 {
            return Err(Error::Config("frequency must be positive".into()));
        }
        if self.frames_per_half_cycle() == 0 {
            return Err(Error::Config(format!(
                "frequency {} Hz yields a zero-length half cycle at {} Hz sample rate",
                self.frequency, self.sample_rate
            )));
        }
        if self.buffer_size == 0 {
            return Err(Error::Config("buffer size must be positive".into()));
        }
        if self.msecs == 0 {
            return Err(Error::Config("duration must be positive".into()));
        }
        Ok(())
    }

    /// Frames constituting one full cycle at the configured frequency.
    pub fn frames_per_cycle(&self) -> u64 {
        if self.frequency == 0 {
            return 0;
        }
        (self.sample_rate / self.frequency) as u64
    }

    /// Frames during which a square wave holds one polarity.
    pub fn frames_per_half_cycle(&self) -> u64 {
        if self.frequency == 0 {
            return 0;
        }
        (self.sample_rate / (2 * self.frequency)) as u64
    }

    /// Total number of frames to be sent.
    pub fn total_frames(&self) -> u64 {
        self.sample_rate as u64 * self.msecs / 1000
    }

    /// Total number of whole buffers in the configured duration. The audio
    /// interface requires whole buffers, so this number may be one low due
    /// to truncation.
    pub fn total_buffers(&self) -> u64 {
        self.total_frames() / self.buffer_size as u64
    }

    /// Surplus frames carried by the final buffer: buffers are always sent
    /// full, so playback runs up to one buffer past the nominal duration.
    pub fn last_buffer_nominal(&self) -> u64 {
        self.buffer_size as u64 * (self.total_buffers() + 1) - self.total_frames()
    }
}

/// Configuration for a Shepard-tone session.
///
/// Runs until externally stopped; there is no total duration.
#[derive(Debug, Clone, PartialEq)]
pub struct ShepardConfig {
    /// Sample rate in frames per second.
    pub sample_rate: u32,
    /// Output buffer size in frames. Less than 1024 is not recommended, as
    /// most audio interfaces will choke horribly.
    pub buffer_size: usize,
    /// Number of tones to keep in play.
    pub ntones: usize,
    /// Interval between tone starts in seconds.
    pub tone_start_secs: f64,
    /// Sweep start frequency in Hz.
    pub start_freq: f64,
    /// Sweep end frequency in Hz.
    pub end_freq: f64,
    /// Peak amplitude of a single tone.
    pub loudness: f64,
}

impl Default for ShepardConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000,
            buffer_size: 2048,
            ntones: 4,
            tone_start_secs: 4.0,
            start_freq: 20.0,
            end_freq: 18_000.0,
            loudness: 0.8,
        }
    }
}

impl ShepardConfig {
    /// Rejects configurations that cannot stream.
    pub fn validate(&self) -> Result<()> {
        if self.ntones == 0 {
            return Err(Error::Config("at least one tone is required".into()));
        }
        if self.buffer_size == 0 {
            return Err(Error::Config("buffer size must be positive".into()));
        }
        if self.sweep_frames() == 0 {
            return Err(Error::Config("sweep must span at least one frame".into()));
        }
        if self.tone_start_secs < 0.0 {
            return Err(Error::Config("tone stagger must not be negative".into()));
        }
        Ok(())
    }

    /// Tone sweep time in seconds: one full rotation of the stagger.
    pub fn sweep_secs(&self) -> f64 {
        self.tone_start_secs * self.ntones as f64
    }

    /// Tone sweep time in frames.
    pub fn sweep_frames(&self) -> u64 {
        (self.sweep_secs() * self.sample_rate as f64) as u64
    }

    /// Startup delay of tone `index`, in frames.
    pub fn tone_delay_frames(&self, index: usize) -> u64 {
        (self.tone_start_secs * index as f64 * self.sample_rate as f64) as u64
    }
}
