//! Plays Shepard tones until the user stops them.
//!
//! The mixer runs inside the device's pull callback; this thread only idles,
//! polling for a quit key. Stopping is a clean exit, not an error.

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::time::Duration;
use sweeptone::{CpalCallbackSink, ShepardConfig, ShepardMixer};

fn main() -> Result<()> {
    let config = ShepardConfig::default();
    let mixer = ShepardMixer::new(&config)?;

    println!("shepard tones");
    println!(
        "sample_rate: {}, tones: {}, tone start: {} secs, sweep: {} secs",
        config.sample_rate,
        config.ntones,
        config.tone_start_secs,
        config.sweep_secs()
    );
    println!(
        "buffer size: {}, sweep frames: {}, freq: {} Hz to {} Hz",
        config.buffer_size,
        config.sweep_frames(),
        config.start_freq,
        config.end_freq
    );
    println!("press q, esc, or ctrl-c to stop");

    let sink = CpalCallbackSink::open(config.sample_rate, config.buffer_size, mixer)?;
    sink.start()?;

    enable_raw_mode()?;
    loop {
        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
        {
            match key.code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => break,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                _ => {}
            }
        }
    }
    let _ = disable_raw_mode();

    sink.stop()?;
    Ok(())
}
