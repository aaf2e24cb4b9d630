use anyhow::{Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{
    Device, FromSample, InputCallbackInfo, Sample, SampleFormat, SizedSample, Stream,
    StreamConfig, StreamError,
};
use crossbeam_channel::Sender;

/// Loopback capture of the machine's default output device. Interleaved
/// frames are downmixed to mono inside the callback and shipped to the
/// analysis loop in small chunks; a full channel drops chunks rather
/// than blocking the audio thread.
pub struct LiveCapture {
    /// Held to keep the stream alive for the monitor's lifetime.
    pub stream: Stream,
    pub sample_rate: u32,
}

pub fn start_capture(tx: Sender<Vec<f32>>) -> Result<LiveCapture> {
    let host = cpal::default_host();

    let device = host
        .default_output_device()
        .context("No default output device available")?;
    let device_name = device.name().unwrap_or_else(|_| "unknown device".into());

    let supported = device
        .default_output_config()
        .context("No default output config available")?;
    let config = supported.config();
    let sample_rate = config.sample_rate.0;

    log::info!("Capturing from {} at {} Hz", device_name, sample_rate);

    let stream = match supported.sample_format() {
        SampleFormat::F32 => build_stream::<f32>(&device, &config, tx)?,
        SampleFormat::I16 => build_stream::<i16>(&device, &config, tx)?,
        SampleFormat::U16 => build_stream::<u16>(&device, &config, tx)?,
        other => anyhow::bail!("Unsupported sample format: {:?}", other),
    };

    Ok(LiveCapture { stream, sample_rate })
}

fn build_stream<T>(device: &Device, cfg: &StreamConfig, tx: Sender<Vec<f32>>) -> Result<Stream>
where
    T: Sample + SizedSample + Send + 'static,
    f32: FromSample<<T as Sample>::Float>,
{
    let channels = (cfg.channels as usize).max(1);

    let input_callback = move |data: &[T], _info: &InputCallbackInfo| {
        let mut mono = Vec::with_capacity(data.len() / channels);
        for frame in data.chunks(channels) {
            let sum: f32 = frame
                .iter()
                .map(|s| f32::from_sample(s.to_float_sample()))
                .sum();
            mono.push(sum / frame.len() as f32);
        }
        let _ = tx.try_send(mono);
    };

    let err_callback = |err: StreamError| log::warn!("capture stream error: {err}");

    let stream = device.build_input_stream(cfg, input_callback, err_callback, None)?;
    stream.play()?;
    Ok(stream)
}
