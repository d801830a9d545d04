//! Offline rendering
//!
//! Runs a WAV file through the effects pipeline the way the playback engine
//! would: one fixed-size block at a time, on a single pipeline instance.

use crate::config::EffectsConfig;
use crate::error::{EffectsError, Result};
use crate::pipeline::EffectsPipeline;
use cirrus_core::{AudioFormat, PcmBuffer};
use std::path::Path;
use tracing::info;

/// Frames handed to the pipeline per call
pub const RENDER_BLOCK_FRAMES: usize = 2048;

/// What a render produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSummary {
    /// Format of both input and output
    pub format: AudioFormat,
    /// Interleaved samples processed
    pub samples: usize,
    /// Number of `process` calls made
    pub blocks: usize,
}

/// Apply `config` to a buffer in engine-sized blocks
pub fn render_buffer(buffer: &mut PcmBuffer, config: EffectsConfig) -> RenderSummary {
    let mut pipeline = EffectsPipeline::with_format(config, buffer.format);

    let block_len = RENDER_BLOCK_FRAMES * usize::from(buffer.format.channels.max(1));
    let mut blocks = 0;
    for block in buffer.samples.chunks_mut(block_len) {
        pipeline.process(block);
        blocks += 1;
    }

    RenderSummary {
        format: buffer.format,
        samples: buffer.samples.len(),
        blocks,
    }
}

/// Read a 16-bit integer WAV, apply `config`, and write the result
pub fn render_wav(input: &Path, output: &Path, config: EffectsConfig) -> Result<RenderSummary> {
    let mut reader = hound::WavReader::open(input)?;
    let spec = reader.spec();

    if spec.sample_format != hound::SampleFormat::Int
        || spec.bits_per_sample != AudioFormat::PCM16_BITS
    {
        return Err(EffectsError::UnsupportedFormat(format!(
            "{:?} {}-bit (expected 16-bit integer PCM)",
            spec.sample_format, spec.bits_per_sample
        )));
    }

    let format = AudioFormat::pcm16(spec.sample_rate, spec.channels);
    let samples = reader
        .samples::<i16>()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let mut buffer = PcmBuffer::new(samples, format);

    let summary = render_buffer(&mut buffer, config);

    let mut writer = hound::WavWriter::create(output, spec)?;
    for &sample in &buffer.samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;

    info!(
        "Rendered {:?} -> {:?} ({} samples, {} blocks)",
        input, output, summary.samples, summary.blocks
    );
    Ok(summary)
}
