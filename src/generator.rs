//! The closed set of sample generators a session can run.

use crate::Signal;
use crate::config::{ShepardConfig, ToneConfig};
use crate::error::{Error, Result};
use crate::oscillators::{SineOscillator, SquareOscillator};
use crate::shepard::ShepardMixer;
use std::fmt;
use std::str::FromStr;

/// Fixed-pitch waveform shapes selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
}

impl FromStr for Waveform {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "sine" => Ok(Waveform::Sine),
            "square" => Ok(Waveform::Square),
            other => Err(Error::Config(format!("unknown waveform {other:?}"))),
        }
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Waveform::Sine => write!(f, "sine"),
            Waveform::Square => write!(f, "square"),
        }
    }
}

/// One generator of any supported kind.
///
/// A session owns exactly one `Generator` for its lifetime. The set of
/// variants is closed on purpose: delivery code matches on nothing and only
/// sees the `Signal` capability, while construction sites get exhaustive
/// checking instead of name-keyed dynamic dispatch.
pub enum Generator {
    Sine(SineOscillator),
    Square(SquareOscillator),
    Shepard(ShepardMixer),
}

impl Generator {
    /// Builds a fixed-pitch generator of the requested shape.
    pub fn tone(waveform: Waveform, config: &ToneConfig) -> Result<Self> {
        match waveform {
            Waveform::Sine => Ok(Generator::Sine(SineOscillator::new(config)?)),
            Waveform::Square => Ok(Generator::Square(SquareOscillator::new(config)?)),
        }
    }

    /// Builds a Shepard tone generator.
    pub fn shepard(config: &ShepardConfig) -> Result<Self> {
        Ok(Generator::Shepard(ShepardMixer::new(config)?))
    }
}

impl Signal for Generator {
    fn next_sample(&mut self) -> f64 {
        match self {
            Generator::Sine(osc) => osc.next_sample(),
            Generator::Square(osc) => osc.next_sample(),
            Generator::Shepard(mixer) => mixer.next_sample(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waveform_parsing() {
        assert_eq!("sine".parse::<Waveform>().unwrap(), Waveform::Sine);
        assert_eq!("square".parse::<Waveform>().unwrap(), Waveform::Square);
        assert!("triangle".parse::<Waveform>().is_err());
    }

    #[test]
    fn test_waveform_display_round_trips() {
        for waveform in [Waveform::Sine, Waveform::Square] {
            assert_eq!(waveform.to_string().parse::<Waveform>().unwrap(), waveform);
        }
    }

    #[test]
    fn test_tone_generator_matches_oscillator() {
        let config = ToneConfig::default();
        let mut generator = Generator::tone(Waveform::Square, &config).unwrap();
        let mut osc = SquareOscillator::new(&config).unwrap();
        for _ in 0..500 {
            assert_eq!(generator.next_sample(), osc.next_sample());
        }
    }

    #[test]
    fn test_shepard_generator_matches_mixer() {
        let config = ShepardConfig {
            sample_rate: 1000,
            tone_start_secs: 0.05,
            ..Default::default()
        };
        let mut generator = Generator::shepard(&config).unwrap();
        let mut mixer = ShepardMixer::new(&config).unwrap();
        for _ in 0..500 {
            assert_eq!(generator.next_sample(), mixer.next_sample());
        }
    }

    #[test]
    fn test_invalid_configs_rejected() {
        let config = ToneConfig {
            frequency: 0,
            ..Default::default()
        };
        assert!(Generator::tone(Waveform::Sine, &config).is_err());

        let config = ShepardConfig {
            ntones: 0,
            ..Default::default()
        };
        assert!(Generator::shepard(&config).is_err());
    }
}
