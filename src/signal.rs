//! Core signal processing trait.
//!
//! This module provides the fundamental `Signal` trait implemented by every
//! sample source in the crate: the fixed-pitch oscillators, the sweep
//! voices, and the Shepard mixer.

/// Common interface for all sample sources.
///
/// A `Signal` produces one mono sample per call and advances its internal
/// state by exactly one frame each time. State is never reset implicitly, so
/// output is phase-continuous across calls regardless of how a run of frames
/// is split into batches.
///
/// The trait provides two fundamental operations:
/// - Single sample generation via `next_sample()`
/// - Batch processing via `process()`
pub trait Signal {
    /// Generates the next sample from the signal.
    ///
    /// # Returns
    ///
    /// A sample value, typically between -1.0 and 1.0 for audio signals
    fn next_sample(&mut self) -> f64;

    /// Generates multiple samples into a buffer.
    ///
    /// Default implementation calls `next_sample()` for each element.
    /// Implementors may override this for more efficient batch processing.
    ///
    /// # Arguments
    ///
    /// * `buffer` - Mutable slice to fill with samples
    fn process(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }
}

/// Implementation of `Signal` for `f64` representing a constant signal value.
///
/// This allows using constant values anywhere a `Signal` is expected,
/// which is useful for DC offsets or testing.
///
/// # Examples
///
/// ```
/// use sweeptone::Signal;
///
/// let mut constant = 0.5_f64;
/// assert_eq!(constant.next_sample(), 0.5);
/// assert_eq!(constant.next_sample(), 0.5);
///
/// let mut buffer = vec![0.0; 4];
/// constant.process(&mut buffer);
/// assert_eq!(buffer, vec![0.5, 0.5, 0.5, 0.5]);
/// ```
impl Signal for f64 {
    fn next_sample(&mut self) -> f64 {
        *self
    }

    fn process(&mut self, buffer: &mut [f64]) {
        // Optimized implementation for constant values
        buffer.fill(*self);
    }
}
