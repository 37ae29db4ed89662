//! Frame-buffer filling: samples to flat 32-bit float PCM.

use crate::Signal;

/// Draws `pcm.len()` samples from `signal` and serializes them in order as
/// 32-bit floats.
///
/// No resampling, clipping, or dithering happens here: the configuration is
/// responsible for keeping the theoretical peak within [-1.0, 1.0], and a
/// misconfigured amplitude silently produces out-of-range samples that the
/// downstream sink may clip or distort.
pub fn fill(signal: &mut (impl Signal + ?Sized), pcm: &mut [f32]) {
    for slot in pcm.iter_mut() {
        *slot = signal.next_sample() as f32;
    }
}

/// A reusable PCM buffer of a fixed frame count.
///
/// One buffer is allocated per session and overwritten in place every cycle,
/// so the steady-state delivery path performs no allocation.
pub struct FrameBuffer {
    pcm: Vec<f32>,
}

impl FrameBuffer {
    /// Creates a buffer holding `frames` mono frames.
    pub fn new(frames: usize) -> Self {
        Self {
            pcm: vec![0.0; frames],
        }
    }

    /// Number of frames per fill.
    pub fn frames(&self) -> usize {
        self.pcm.len()
    }

    /// Refills the buffer from `signal` and returns the PCM slice.
    pub fn fill(&mut self, signal: &mut (impl Signal + ?Sized)) -> &[f32] {
        fill(signal, &mut self.pcm);
        &self.pcm
    }

    /// The most recently filled PCM contents.
    pub fn pcm(&self) -> &[f32] {
        &self.pcm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ToneConfig;
    use crate::oscillators::SquareOscillator;

    #[test]
    fn test_fill_draws_in_order() {
        // A constant signal is the simplest Signal impl.
        let mut constant = 0.25_f64;
        let mut pcm = [0.0_f32; 8];
        fill(&mut constant, &mut pcm);
        assert_eq!(pcm, [0.25_f32; 8]);
    }

    #[test]
    fn test_fill_narrows_to_f32() {
        let mut value = 0.1_f64;
        let mut pcm = [0.0_f32; 1];
        fill(&mut value, &mut pcm);
        assert_eq!(pcm[0], 0.1_f64 as f32);
    }

    #[test]
    fn test_frame_buffer_reuse_is_continuous() {
        let config = ToneConfig::default();
        let mut chunked = SquareOscillator::new(&config).unwrap();
        let mut straight = SquareOscillator::new(&config).unwrap();

        let mut buffer = FrameBuffer::new(64);
        let mut collected: Vec<f32> = Vec::new();
        for _ in 0..4 {
            collected.extend_from_slice(buffer.fill(&mut chunked));
        }

        let expected: Vec<f32> = (0..256).map(|_| straight.next_sample() as f32).collect();
        assert_eq!(collected, expected);
    }

    #[test]
    fn test_frame_buffer_length_fixed() {
        let mut buffer = FrameBuffer::new(2048);
        assert_eq!(buffer.frames(), 2048);
        let mut constant = 0.0_f64;
        assert_eq!(buffer.fill(&mut constant).len(), 2048);
        assert_eq!(buffer.pcm().len(), 2048);
    }
}
