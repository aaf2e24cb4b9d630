mod audio;
mod cli;
mod config;
mod dsp;
mod error;
mod live;
mod meter;
mod offline;
mod sequence;

use anyhow::{Context, Result};
use clap::Parser;

use cli::Cli;
use dsp::FilterParams;
use sequence::BandSequence;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut cli = Cli::parse();

    // Load config: explicit --config path, or auto-detect quadband.toml / global config
    let config_path = cli.config.clone().or_else(|| {
        let local = std::path::PathBuf::from("quadband.toml");
        if local.exists() {
            return Some(local);
        }
        if let Some(home) = dirs::home_dir() {
            let xdg = home.join(".config").join("quadband").join("config.toml");
            if xdg.exists() {
                return Some(xdg);
            }
        }
        if let Some(config_dir) = dirs::config_dir() {
            let platform = config_dir.join("quadband").join("config.toml");
            if platform.exists() {
                return Some(platform);
            }
        }
        None
    });
    if let Some(ref path) = config_path {
        if let Some(cfg) = config::load_config(path) {
            log::info!("Loaded config from {}", path.display());
            // Merge: config values apply only when CLI is at its default
            if cli.frequency == 960.0 { cli.frequency = cfg.filter.frequency; }
            if cli.q == 1.5 { cli.q = cfg.filter.q; }
            if cli.range == 60.0 { cli.range = cfg.meter.range; }
        } else {
            log::warn!("Failed to load config from {}", path.display());
        }
    }

    let params = FilterParams { center_hz: cli.frequency, q: cli.q };

    if let Some(ref path) = cli.dump {
        return dump_records(path, cli.range, cli.at);
    }

    if cli.live {
        log::info!(
            "quadband - live four-band monitor ({} Hz, Q {})",
            cli.frequency, cli.q
        );
        return live::run(params, cli.range);
    }

    let input = cli.input.as_ref().context("Input audio file is required")?;
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let output = cli.output.clone().unwrap_or_else(|| input.with_extension("bytes"));

    log::info!("quadband - four-band loudness analyzer");
    log::info!("Input: {}", input.display());
    log::info!("Output: {}", output.display());
    log::info!("Filter: {} Hz, Q {}", cli.frequency, cli.q);

    let audio_data = audio::decode::decode_audio(input)?;
    let sequence = offline::analyze(&audio_data, &params)?;
    sequence.write_file(&output)?;

    log::info!("Done! {} records -> {}", sequence.len(), output.display());
    Ok(())
}

fn dump_records(path: &std::path::Path, range: f32, at: Option<usize>) -> Result<()> {
    let sequence = BandSequence::read_file(path)?;
    println!("{}: {} records", path.display(), sequence.len());

    if let Some(sample_pos) = at {
        // Playback-synced lookup; past-the-end offsets are skipped with a
        // warning, matching how a meter display would treat them.
        match sequence.lookup(sample_pos) {
            Ok(rec) => print_record(BandSequence::index_for_sample(sample_pos), &rec, range),
            Err(err) => log::warn!("{err}"),
        }
        return Ok(());
    }

    for (i, rec) in sequence.records().iter().enumerate() {
        print_record(i, rec, range);
    }
    Ok(())
}

fn print_record(index: usize, rec: &dsp::filter::BandLevels, range: f32) {
    let sc = meter::scale(rec, range);
    println!(
        "[{:5}] raw {:8.2}  low {:8.2}  band {:8.2}  high {:8.2}  {}",
        index, rec.raw, rec.low, rec.band, rec.high, meter::bar_line(&sc)
    );
}
