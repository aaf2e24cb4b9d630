use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "quadband", about = "Four-band loudness analyzer for audio clips and live output")]
pub struct Cli {
    /// Input audio file (WAV, MP3, FLAC, OGG, AAC)
    pub input: Option<PathBuf>,

    /// Output record file (defaults to the input path with a .bytes extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Band-pass center frequency in Hz
    #[arg(long, default_value_t = 960.0)]
    pub frequency: f32,

    /// Band-pass resonance (Q factor)
    #[arg(long, default_value_t = 1.5)]
    pub q: f32,

    /// Meter display range in dB
    #[arg(long, default_value_t = 60.0)]
    pub range: f32,

    /// Monitor the default output device instead of analyzing a file
    #[arg(long)]
    pub live: bool,

    /// Print the records of an existing .bytes file and exit
    #[arg(long)]
    pub dump: Option<PathBuf>,

    /// With --dump: show only the record at this playback sample offset
    #[arg(long)]
    pub at: Option<usize>,

    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,
}
