//! Delivery drivers for the two protocols.
//!
//! Push mode is a single-threaded loop: fill a buffer, blocking-write it,
//! repeat until the frame target is met. Pull mode hands the generator to
//! the sink and only manages the stream's lifetime from the driving thread.

use crate::Signal;
use crate::error::Result;
use crate::pcm::FrameBuffer;
use crate::sink::{BlockingSink, CpalCallbackSink};
use std::thread;
use std::time::Duration;

/// Lifecycle of a blocking delivery session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Sink opened, nothing written yet.
    Idle,
    /// Buffers are being written.
    Streaming,
    /// Frame target reached; the sink is finishing in-flight buffers.
    Draining,
    /// Sink stopped; the session is over.
    Closed,
}

/// Push-mode driver: writes full buffers until a total-frame target.
///
/// Buffers are always written full, so when `total_frames` is not an exact
/// multiple of the buffer size the final buffer overshoots the target and
/// actual playback runs up to one buffer long.
pub struct BlockingDriver<S: BlockingSink> {
    sink: S,
    buffer: FrameBuffer,
    total_frames: u64,
    frames_written: u64,
    state: DriverState,
}

impl<S: BlockingSink> BlockingDriver<S> {
    /// Creates a driver that will deliver at least `total_frames` frames in
    /// buffers of `buffer_size`.
    pub fn new(sink: S, buffer_size: usize, total_frames: u64) -> Self {
        Self {
            sink,
            buffer: FrameBuffer::new(buffer_size),
            total_frames,
            frames_written: 0,
            state: DriverState::Idle,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Frames delivered so far, counting the overshoot of the final buffer.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Runs the session to completion.
    ///
    /// The first buffer is filled and written before the sink starts, so the
    /// device finds data in place from its very first callback rather than
    /// racing the writer for it. A write failure aborts immediately: the
    /// error is surfaced and no retry is attempted, since an underflow here
    /// signals a systemic timing problem.
    ///
    /// # Returns
    ///
    /// The total number of frames written, which is >= `total_frames`.
    pub fn run(&mut self, signal: &mut (impl Signal + ?Sized)) -> Result<u64> {
        let frames_per_buffer = self.buffer.frames() as u64;

        self.buffer.fill(signal);
        if let Err(err) = self.sink.write(self.buffer.pcm()) {
            self.state = DriverState::Closed;
            return Err(err);
        }
        self.frames_written += frames_per_buffer;

        self.sink.start()?;
        self.state = DriverState::Streaming;

        while self.frames_written < self.total_frames {
            self.buffer.fill(signal);
            if let Err(err) = self.sink.write(self.buffer.pcm()) {
                self.state = DriverState::Closed;
                return Err(err);
            }
            self.frames_written += frames_per_buffer;
        }

        self.state = DriverState::Draining;
        self.sink.stop()?;
        self.state = DriverState::Closed;
        Ok(self.frames_written)
    }
}

/// Pull-mode run with a fixed duration: start the stream, idle for the
/// configured time while the sink pulls samples on its own cadence, then
/// stop and close.
pub fn run_pull_for(sink: &CpalCallbackSink, duration: Duration) -> Result<()> {
    sink.start()?;
    thread::sleep(duration);
    sink.stop()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ToneConfig;
    use crate::error::Error;
    use crate::generator::{Generator, Waveform};

    /// Records every sink call; optionally fails the nth write.
    struct MockSink {
        started: bool,
        stopped: bool,
        writes: Vec<Vec<f32>>,
        writes_before_start: usize,
        fail_on_write: Option<usize>,
    }

    impl MockSink {
        fn new() -> Self {
            Self {
                started: false,
                stopped: false,
                writes: Vec::new(),
                writes_before_start: 0,
                fail_on_write: None,
            }
        }

        fn failing_on(write: usize) -> Self {
            Self {
                fail_on_write: Some(write),
                ..Self::new()
            }
        }
    }

    impl BlockingSink for MockSink {
        fn start(&mut self) -> Result<()> {
            self.started = true;
            Ok(())
        }

        fn write(&mut self, pcm: &[f32]) -> Result<()> {
            if self.fail_on_write == Some(self.writes.len()) {
                return Err(Error::Underflow);
            }
            if !self.started {
                self.writes_before_start += 1;
            }
            self.writes.push(pcm.to_vec());
            Ok(())
        }

        fn stop(&mut self) -> Result<()> {
            self.stopped = true;
            Ok(())
        }
    }

    #[test]
    fn test_buffer_count_scenario() {
        // 48000 Hz for 3000 ms in 2048-frame buffers: 70 whole buffers fit,
        // 71 full buffers are written, 145408 frames total.
        let config = ToneConfig::default();
        let mut generator = Generator::tone(Waveform::Square, &config).unwrap();
        let mut driver =
            BlockingDriver::new(MockSink::new(), config.buffer_size, config.total_frames());

        let written = driver.run(&mut generator).unwrap();

        assert_eq!(written, 145_408);
        assert_eq!(written - config.total_frames(), config.last_buffer_nominal());
        assert_eq!(driver.sink.writes.len(), 71);
        assert!(driver.sink.writes.iter().all(|w| w.len() == 2048));
    }

    #[test]
    fn test_state_machine_transitions() {
        let mut generator = 0.0_f64;
        let mut driver = BlockingDriver::new(MockSink::new(), 16, 64);
        assert_eq!(driver.state(), DriverState::Idle);

        driver.run(&mut generator).unwrap();
        assert_eq!(driver.state(), DriverState::Closed);
        assert!(driver.sink.started);
        assert!(driver.sink.stopped);
        assert_eq!(driver.frames_written(), 64);
    }

    #[test]
    fn test_written_stream_is_continuous() {
        let config = ToneConfig::default();
        let mut chunked = Generator::tone(Waveform::Square, &config).unwrap();
        let mut straight = Generator::tone(Waveform::Square, &config).unwrap();

        let mut driver = BlockingDriver::new(MockSink::new(), 128, 1024);
        driver.run(&mut chunked).unwrap();
        let delivered: Vec<f32> = driver.sink.writes.concat();

        let expected: Vec<f32> = (0..1024).map(|_| straight.next_sample() as f32).collect();
        assert_eq!(delivered, expected);
    }

    #[test]
    fn test_exact_multiple_writes_no_surplus() {
        let mut generator = 0.5_f64;
        let mut driver = BlockingDriver::new(MockSink::new(), 32, 96);
        let written = driver.run(&mut generator).unwrap();
        assert_eq!(written, 96);
        assert_eq!(driver.sink.writes.len(), 3);
    }

    #[test]
    fn test_write_error_aborts_without_retry() {
        let mut generator = 0.0_f64;
        let mut driver = BlockingDriver::new(MockSink::failing_on(2), 16, 160);

        let result = driver.run(&mut generator);

        assert!(matches!(result, Err(Error::Underflow)));
        assert_eq!(driver.state(), DriverState::Closed);
        // Two writes landed before the failure; nothing after it.
        assert_eq!(driver.sink.writes.len(), 2);
        assert!(!driver.sink.stopped);
    }

    #[test]
    fn test_first_buffer_written_before_start() {
        // The preload must land in the sink before playback begins, or an
        // eager device callback finds nothing and reports a false underflow.
        let mut generator = 0.0_f64;
        let mut driver = BlockingDriver::new(MockSink::new(), 16, 64);
        driver.run(&mut generator).unwrap();
        assert_eq!(driver.sink.writes_before_start, 1);
        assert_eq!(driver.sink.writes.len(), 4);
    }

    #[test]
    fn test_immediate_failure_leaves_no_writes() {
        // The preload write fails, so playback is never started at all.
        let mut generator = 0.0_f64;
        let mut driver = BlockingDriver::new(MockSink::failing_on(0), 16, 160);
        assert!(driver.run(&mut generator).is_err());
        assert!(driver.sink.writes.is_empty());
        assert!(!driver.sink.started);
        assert_eq!(driver.state(), DriverState::Closed);
    }
}
