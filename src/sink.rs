//! Audio sinks: the device-facing side of both delivery protocols.
//!
//! `CpalBlockingSink` adapts cpal's callback model to a blocking push
//! interface: the caller's thread writes PCM into an SPSC ring buffer and
//! the stream callback drains it. `CpalCallbackSink` is the pull protocol
//! directly: the generator moves into the stream callback, which is its sole
//! writer from then on.

use crate::Signal;
use crate::error::{Error, Result};
use crate::pcm;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{BufferSize, FromSample, Sample, SampleFormat, SampleRate, SizedSample, StreamConfig};
use ringbuf::{
    HeapRb,
    traits::{Consumer, Observer, Producer, Split},
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Blocking sink contract used by the push-mode driver.
///
/// `write` blocks until the sink has buffered the whole slice, and fails
/// with `Error::Underflow` if the device ran dry since the previous write.
/// Writes are permitted before `start`, so the driver can preload the sink
/// and the device finds data in place from its very first callback.
pub trait BlockingSink {
    /// Starts playback.
    fn start(&mut self) -> Result<()>;

    /// Writes one PCM buffer, blocking until the sink has accepted it.
    fn write(&mut self, pcm: &[f32]) -> Result<()>;

    /// Stops playback. In-flight buffers are allowed to finish delivering.
    fn stop(&mut self) -> Result<()>;
}

/// How long the writer parks when the ring buffer is full.
const WRITE_PARK: Duration = Duration::from_millis(1);

/// Duration of `frames` frames of playback at `sample_rate`.
fn frames_duration(frames: usize, sample_rate: u32) -> Duration {
    Duration::from_secs_f64(frames as f64 / sample_rate as f64)
}

/// Polls at the write-park cadence until `drained` reports true.
///
/// Gives up when `aborted` reports true or `timeout` elapses, so a stalled
/// consumer cannot hang a shutdown.
///
/// # Returns
///
/// `true` if the sink drained, `false` on abort or timeout.
fn wait_for_drain(
    mut drained: impl FnMut() -> bool,
    mut aborted: impl FnMut() -> bool,
    timeout: Duration,
) -> bool {
    let deadline = Instant::now() + timeout;
    while !drained() {
        if aborted() || Instant::now() >= deadline {
            return false;
        }
        thread::sleep(WRITE_PARK);
    }
    true
}

fn open_output_device() -> Result<(cpal::Device, cpal::SupportedStreamConfig)> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| Error::Device("no output device available".into()))?;
    let supported = device
        .default_output_config()
        .map_err(|err| Error::Device(err.to_string()))?;
    Ok((device, supported))
}

fn stream_config(
    supported: &cpal::SupportedStreamConfig,
    sample_rate: u32,
    buffer_size: usize,
) -> StreamConfig {
    StreamConfig {
        channels: supported.channels(),
        sample_rate: SampleRate(sample_rate),
        buffer_size: BufferSize::Fixed(buffer_size as u32),
    }
}

/// A cpal-backed sink with blocking writes.
///
/// The ring buffer holds two output buffers' worth of frames, so one full
/// buffer can be preloaded before the stream starts while the next is
/// written behind it. The stream callback sets the underflow flag whenever
/// it runs dry while playing; the next `write` observes the flag and fails.
pub struct CpalBlockingSink {
    producer: ringbuf::HeapProd<f32>,
    stream: cpal::Stream,
    playing: Arc<AtomicBool>,
    underflow: Arc<AtomicBool>,
    /// Playback time of one output buffer.
    buffer_period: Duration,
    /// Upper bound on how long `stop` waits for the ring to drain.
    drain_timeout: Duration,
}

impl CpalBlockingSink {
    /// Opens the default output device at the given rate and buffer size.
    ///
    /// # Errors
    ///
    /// Returns `Error::Device` if there is no output device or it cannot be
    /// configured for mono-expanded f32 delivery at `sample_rate`.
    pub fn open(sample_rate: u32, buffer_size: usize) -> Result<Self> {
        let (device, supported) = open_output_device()?;
        let config = stream_config(&supported, sample_rate, buffer_size);

        let ring = HeapRb::<f32>::new(2 * buffer_size);
        let (producer, consumer) = ring.split();
        let playing = Arc::new(AtomicBool::new(false));
        let underflow = Arc::new(AtomicBool::new(false));

        let stream = match supported.sample_format() {
            SampleFormat::F32 => build_drain_stream::<f32>(
                &device,
                &config,
                consumer,
                playing.clone(),
                underflow.clone(),
            )?,
            SampleFormat::I16 => build_drain_stream::<i16>(
                &device,
                &config,
                consumer,
                playing.clone(),
                underflow.clone(),
            )?,
            SampleFormat::U16 => build_drain_stream::<u16>(
                &device,
                &config,
                consumer,
                playing.clone(),
                underflow.clone(),
            )?,
            sample_format => {
                return Err(Error::Device(format!(
                    "unsupported sample format: {sample_format}"
                )));
            }
        };

        Ok(Self {
            producer,
            stream,
            playing,
            underflow,
            buffer_period: frames_duration(buffer_size, sample_rate),
            // Twice the ring's playback time covers scheduling slack.
            drain_timeout: 2 * frames_duration(2 * buffer_size, sample_rate),
        })
    }
}

impl BlockingSink for CpalBlockingSink {
    fn start(&mut self) -> Result<()> {
        self.stream
            .play()
            .map_err(|err| Error::Device(err.to_string()))?;
        self.playing.store(true, Ordering::Relaxed);
        Ok(())
    }

    fn write(&mut self, pcm: &[f32]) -> Result<()> {
        let mut offset = 0;
        while offset < pcm.len() {
            if self.underflow.load(Ordering::Relaxed) {
                return Err(Error::Underflow);
            }
            let pushed = self.producer.push_slice(&pcm[offset..]);
            offset += pushed;
            if pushed == 0 {
                // Ring is full: the device is consuming. This park is the
                // sole suspension point of blocking mode.
                thread::sleep(WRITE_PARK);
            }
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        // In-flight buffers are allowed to finish delivering: wait for the
        // callback to drain the ring, then give the frames already handed to
        // the device one buffer's playback time before freezing the stream.
        let drained = wait_for_drain(
            || self.producer.is_empty(),
            || self.underflow.load(Ordering::Relaxed),
            self.drain_timeout,
        );
        if drained {
            thread::sleep(self.buffer_period);
        }
        self.playing.store(false, Ordering::Relaxed);
        self.stream
            .pause()
            .map_err(|err| Error::Device(err.to_string()))
    }
}

/// Builds the stream that drains the ring buffer, expanding each mono frame
/// across the device's channels.
fn build_drain_stream<T>(
    device: &cpal::Device,
    config: &StreamConfig,
    mut consumer: ringbuf::HeapCons<f32>,
    playing: Arc<AtomicBool>,
    underflow: Arc<AtomicBool>,
) -> Result<cpal::Stream>
where
    T: Sample + FromSample<f32> + SizedSample,
{
    let channels = config.channels as usize;
    let mut scratch: Vec<f32> = vec![0.0; 4096];

    let stream = device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                let frames = data.len() / channels;
                if scratch.len() < frames {
                    scratch.resize(frames, 0.0);
                }
                let popped = consumer.pop_slice(&mut scratch[..frames]);
                if popped < frames && playing.load(Ordering::Relaxed) {
                    underflow.store(true, Ordering::Relaxed);
                }
                // Fill any shortfall with silence.
                scratch[popped..frames].fill(0.0);
                for (frame, &sample) in data.chunks_mut(channels).zip(scratch[..frames].iter()) {
                    let value = T::from_sample(sample);
                    for slot in frame.iter_mut() {
                        *slot = value;
                    }
                }
            },
            |err| eprintln!("audio stream error: {err}"),
            None,
        )
        .map_err(|err| Error::Device(err.to_string()))?;
    Ok(stream)
}

/// A cpal-backed sink that pulls samples from a generator it owns.
///
/// The stream callback is the generator's single writer: it draws exactly
/// the requested number of frames through the PCM filler and returns. It
/// never blocks, sleeps, or allocates in steady state, keeping well inside
/// the one-buffer deadline the device imposes.
pub struct CpalCallbackSink {
    stream: cpal::Stream,
}

impl CpalCallbackSink {
    /// Opens the default output device and moves `signal` into the stream
    /// callback.
    ///
    /// # Errors
    ///
    /// Returns `Error::Device` if there is no output device or it cannot be
    /// configured at `sample_rate`.
    pub fn open(
        sample_rate: u32,
        buffer_size: usize,
        signal: impl Signal + Send + 'static,
    ) -> Result<Self> {
        let (device, supported) = open_output_device()?;
        let config = stream_config(&supported, sample_rate, buffer_size);

        let stream = match supported.sample_format() {
            SampleFormat::F32 => build_pull_stream::<f32, _>(&device, &config, signal)?,
            SampleFormat::I16 => build_pull_stream::<i16, _>(&device, &config, signal)?,
            SampleFormat::U16 => build_pull_stream::<u16, _>(&device, &config, signal)?,
            sample_format => {
                return Err(Error::Device(format!(
                    "unsupported sample format: {sample_format}"
                )));
            }
        };

        Ok(Self { stream })
    }

    /// Starts playback; the device begins invoking the callback on its own
    /// timing domain.
    pub fn start(&self) -> Result<()> {
        self.stream
            .play()
            .map_err(|err| Error::Device(err.to_string()))
    }

    /// Stops playback; further callback invocations cease.
    pub fn stop(&self) -> Result<()> {
        self.stream
            .pause()
            .map_err(|err| Error::Device(err.to_string()))
    }
}

fn build_pull_stream<T, S>(
    device: &cpal::Device,
    config: &StreamConfig,
    mut signal: S,
) -> Result<cpal::Stream>
where
    T: Sample + FromSample<f32> + SizedSample,
    S: Signal + Send + 'static,
{
    let channels = config.channels as usize;
    // Preallocated so the callback does not allocate; the device may request
    // a frame count that differs from the configured buffer size.
    let mut scratch: Vec<f32> = vec![0.0; 4096];

    let stream = device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                let frames = data.len() / channels;
                if scratch.len() < frames {
                    scratch.resize(frames, 0.0);
                }
                pcm::fill(&mut signal, &mut scratch[..frames]);
                for (frame, &sample) in data.chunks_mut(channels).zip(scratch[..frames].iter()) {
                    let value = T::from_sample(sample);
                    for slot in frame.iter_mut() {
                        *slot = value;
                    }
                }
            },
            |err| eprintln!("audio stream error: {err}"),
            None,
        )
        .map_err(|err| Error::Device(err.to_string()))?;
    Ok(stream)
}
