//! Plays a fixed-pitch square or sine wave for a configured duration.
//!
//! The default delivery protocol is the blocking push loop; `--pull` runs
//! the same generator from the device's own callback instead, with the main
//! thread idling for the duration.

use anyhow::{Result, bail};
use std::env;
use std::time::Duration;
use sweeptone::{
    BlockingDriver, CpalBlockingSink, CpalCallbackSink, Generator, ToneConfig, Waveform,
    run_pull_for,
};

fn main() -> Result<()> {
    let mut waveform = Waveform::Square;
    let mut pull = false;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--pull" => pull = true,
            "sine" | "square" => waveform = arg.parse()?,
            _ => bail!("usage: play-wave [sine|square] [--pull]"),
        }
    }

    let config = ToneConfig::default();
    let mut generator = Generator::tone(waveform, &config)?;

    println!(
        "{} {} wave",
        if pull { "pull" } else { "blocking" },
        waveform
    );
    println!(
        "sample_rate: {}, msecs: {}, freq: {}",
        config.sample_rate, config.msecs, config.frequency
    );
    println!(
        "buffer size: {}, buffers: {}, cycle: {}, halfcycle: {}",
        config.buffer_size,
        config.total_buffers(),
        config.frames_per_cycle(),
        config.frames_per_half_cycle()
    );
    println!("last buffer nominal size: {}", config.last_buffer_nominal());

    if pull {
        let sink = CpalCallbackSink::open(config.sample_rate, config.buffer_size, generator)?;
        run_pull_for(&sink, Duration::from_millis(config.msecs))?;
    } else {
        let sink = CpalBlockingSink::open(config.sample_rate, config.buffer_size)?;
        let mut driver = BlockingDriver::new(sink, config.buffer_size, config.total_frames());
        driver.run(&mut generator)?;
    }

    Ok(())
}
