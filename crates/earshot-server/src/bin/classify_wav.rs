//! Post a WAV file to a running earshot service and print the JSON result.
//!
//! Usage: `classify-wav <emotion|scene> <file.wav> [base-url]`
//!
//! The file is downmixed to mono f32 and sent as raw little-endian samples,
//! exactly as the upstream gateway does. No resampling is performed; feed
//! audio at the rate the model expects.

use anyhow::{bail, Context, Result};

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let endpoint = args.next().unwrap_or_default();
    let path = args.next();
    let base_url = args
        .next()
        .unwrap_or_else(|| "http://127.0.0.1:5300".to_string());

    let (endpoint, path) = match (endpoint.as_str(), path) {
        (ep @ ("emotion" | "scene"), Some(p)) => (ep.to_string(), p),
        _ => bail!("usage: classify-wav <emotion|scene> <file.wav> [base-url]"),
    };

    let samples = read_wav_mono_f32(&path)?;
    let bytes: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();

    let response = ureq::post(&format!("{}/{}", base_url, endpoint))
        .set("Content-Type", "application/octet-stream")
        .send_bytes(&bytes)
        .with_context(|| format!("request to {}/{} failed", base_url, endpoint))?;

    println!("{}", response.into_string()?);
    Ok(())
}

/// Read a WAV file and downmix interleaved channels to mono f32.
fn read_wav_mono_f32(path: &str) -> Result<Vec<f32>> {
    let mut reader =
        hound::WavReader::open(path).with_context(|| format!("failed to open {}", path))?;
    let spec = reader.spec();
    let channels = spec.channels as usize;

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>()?,
        hound::SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<_, _>>()?
        }
    };

    if channels <= 1 {
        return Ok(samples);
    }
    Ok(samples
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect())
}
