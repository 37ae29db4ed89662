//! Sweeptone - real-time synthesis of square waves, sine waves, and Shepard
//! tones.
//!
//! The crate is split into stateful sample generators (phase-continuous
//! across buffer boundaries) and the delivery machinery that keeps an audio
//! sink supplied with exactly the frames it demands, either by blocking
//! pushes or from the sink's own pull callback.

pub mod config;
pub mod driver;
pub mod error;
pub mod generator;
pub mod oscillators;
pub mod pcm;
pub mod shepard;
pub mod signal;
pub mod sink;

// Re-export commonly used types at the crate root
pub use config::{ShepardConfig, ToneConfig};
pub use driver::{BlockingDriver, DriverState, run_pull_for};
pub use error::{Error, Result};
pub use generator::{Generator, Waveform};
pub use oscillators::{SineOscillator, SquareOscillator};
pub use pcm::FrameBuffer;
pub use shepard::{ShepardMixer, SweepOscillator};
pub use signal::Signal;
pub use sink::{BlockingSink, CpalBlockingSink, CpalCallbackSink};
