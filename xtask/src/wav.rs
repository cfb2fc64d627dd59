//! xtask encode / decode: WAV ↔ G.711 byte stream.
//!
//! The byte stream is what the firmware keeps in its sample buffer: one
//! companded byte per 8 kHz sample, no header.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use g711::Law;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use si3000::config::SAMPLE_RATE_HZ;

/// Format written by `decode`.
fn output_spec() -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE_HZ,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

fn law_name(law: Law) -> &'static str {
    match law {
        Law::MuLaw => "mu-law",
        Law::ALaw => "A-law",
    }
}

/// Read a mono 16-bit PCM WAV.
pub(crate) fn read_pcm(input: &Path) -> Result<(WavSpec, Vec<i16>)> {
    let reader = WavReader::open(input)
        .with_context(|| format!("Failed to open {}", input.display()))?;
    let spec = reader.spec();

    if spec.channels != 1 {
        bail!("{}: {} channels, expected mono", input.display(), spec.channels);
    }
    if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != 16 {
        bail!(
            "{}: {}-bit {:?} samples, expected 16-bit PCM",
            input.display(),
            spec.bits_per_sample,
            spec.sample_format
        );
    }

    let samples = reader
        .into_samples::<i16>()
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Failed to read samples from {}", input.display()))?;
    Ok((spec, samples))
}

/// Compress `pcm` with `law`.
pub(crate) fn compress(law: Law, pcm: &[i16]) -> Vec<u8> {
    let mut codes = vec![law.silence(); pcm.len()];
    law.compress_slice(pcm, &mut codes);
    codes
}

/// Expand `codes` with `law`.
pub(crate) fn expand(law: Law, codes: &[u8]) -> Vec<i16> {
    let mut pcm = vec![0i16; codes.len()];
    law.expand_slice(codes, &mut pcm);
    pcm
}

/// Write `pcm` as an 8 kHz mono 16-bit WAV.
pub(crate) fn write_pcm(output: &Path, pcm: &[i16]) -> Result<()> {
    let mut writer = WavWriter::create(output, output_spec())
        .with_context(|| format!("Failed to create {}", output.display()))?;
    for &sample in pcm {
        writer.write_sample(sample)?;
    }
    writer
        .finalize()
        .with_context(|| format!("Failed to finalise {}", output.display()))
}

/// Entry point for `cargo xtask encode`.
pub fn encode(law: Law, input: &Path, output: &Path) -> Result<()> {
    println!();
    println!(
        "{}",
        format!("🎙  Encoding {} ({})", input.display(), law_name(law))
            .cyan()
            .bold()
    );

    let (spec, pcm) = read_pcm(input)?;

    #[allow(clippy::cast_precision_loss)] // display only
    let seconds = pcm.len() as f64 / f64::from(spec.sample_rate);
    println!("  sample rate : {} Hz", spec.sample_rate);
    println!("  samples     : {}", pcm.len());
    println!("  time span   : {seconds:.2} s");

    if spec.sample_rate != SAMPLE_RATE_HZ {
        println!(
            "{}",
            format!(
                "  ⚠ {} Hz input; the codec plays at {} Hz (no resampling is done)",
                spec.sample_rate, SAMPLE_RATE_HZ
            )
            .yellow()
        );
    }

    let codes = compress(law, &pcm);
    fs::write(output, &codes)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "{}",
        format!("  ✓ Wrote {} bytes to {}", codes.len(), output.display()).green()
    );
    println!();
    Ok(())
}

/// Entry point for `cargo xtask decode`.
pub fn decode(law: Law, input: &Path, output: &Path) -> Result<()> {
    println!();
    println!(
        "{}",
        format!("🔊 Decoding {} ({})", input.display(), law_name(law))
            .cyan()
            .bold()
    );

    let codes =
        fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let pcm = expand(law, &codes);
    write_pcm(output, &pcm)?;

    println!(
        "{}",
        format!(
            "  ✓ Wrote {} samples ({} Hz mono) to {}",
            pcm.len(),
            SAMPLE_RATE_HZ,
            output.display()
        )
        .green()
    );
    println!();
    Ok(())
}
