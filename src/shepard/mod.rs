//! Shepard tone synthesis.
//!
//! A Shepard tone is built from several simultaneous exponential frequency
//! sweeps staggered in start time. Each sweep fades in from silence, peaks
//! mid-sweep, and fades out as it approaches the top, then restarts at the
//! bottom; averaging the staggered voices produces the illusion of a pitch
//! that rises forever.

mod mixer;
mod sweep;

pub use mixer::ShepardMixer;
pub use sweep::SweepOscillator;
