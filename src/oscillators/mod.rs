//! Fixed-pitch oscillators.
//!
//! Both oscillators count whole frames rather than accumulating a floating
//! point phase: the cycle lengths are derived once from the session
//! configuration by integer division, and state stays exact over arbitrarily
//! long sessions.

mod sine;
mod square;

pub use sine::SineOscillator;
pub use square::SquareOscillator;
