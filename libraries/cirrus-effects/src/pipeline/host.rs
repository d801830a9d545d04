//! Pipeline host
//!
//! Owns the three stages, forwards format changes and toggles to them, and
//! runs them in a fixed order on every buffer.

use crate::config::EffectsConfig;
use crate::effects::{AutoPanStage, BiquadStage, PcmEffect, ReverbStage};
use crate::pcm::{decode_le, encode_le};
use cirrus_core::AudioFormat;
use tracing::{debug, info, warn};

/// Real-time effects pipeline: auto-pan → filter → reverb
///
/// The order is fixed; panning before the filter and echo is what the effects
/// are tuned for and the stages do not commute.
pub struct EffectsPipeline {
    config: EffectsConfig,
    format: AudioFormat,
    auto_pan: AutoPanStage,
    filter: BiquadStage,
    reverb: ReverbStage,
    /// Decoded samples for `process_le_bytes`, grown only on larger buffers
    scratch: Vec<i16>,
}

impl EffectsPipeline {
    /// Build a pipeline for the default format (44.1 kHz stereo)
    pub fn new(config: EffectsConfig) -> Self {
        Self::with_format(config, AudioFormat::default())
    }

    /// Build a pipeline for a known format
    pub fn with_format(config: EffectsConfig, format: AudioFormat) -> Self {
        let mut pipeline = Self {
            config: EffectsConfig::none(),
            format,
            auto_pan: AutoPanStage::new(format),
            filter: BiquadStage::new(format),
            reverb: ReverbStage::new(format),
            scratch: Vec::new(),
        };
        pipeline.set_config(config);
        pipeline
    }

    /// Forward a new output format to every stage
    ///
    /// Must be called before the next `process` whenever the engine's format
    /// changes. Degenerate rates and channel counts are tolerated; the stages
    /// clamp them.
    pub fn configure(&mut self, format: AudioFormat) {
        if format.channels == 0 || format.channels > 2 {
            warn!(
                "Unexpected channel count {}; auto-pan will pass through",
                format.channels
            );
        }
        if format.bits_per_sample != AudioFormat::PCM16_BITS {
            warn!(
                "Format reports {} bits per sample; processing as 16-bit",
                format.bits_per_sample
            );
        }

        info!(
            "Effects pipeline format: {} Hz, {} ch",
            format.sample_rate.as_hz(),
            format.channels
        );
        self.format = format;
        for stage in self.stages_mut() {
            stage.configure(format);
        }
    }

    /// Replace every toggle at once
    pub fn set_config(&mut self, config: EffectsConfig) {
        debug!("Effects config: {:?}", config);
        self.config = config;
        self.auto_pan.set_enabled(config.auto_pan);
        self.filter.set_effects(config.muffled, config.bass_boost);
        self.reverb.set_enabled(config.reverb);
    }

    /// Toggle stereo auto-pan
    pub fn set_auto_pan(&mut self, enabled: bool) {
        self.set_config(EffectsConfig {
            auto_pan: enabled,
            ..self.config
        });
    }

    /// Toggle the 800 Hz muffle
    pub fn set_muffled(&mut self, enabled: bool) {
        self.set_config(EffectsConfig {
            muffled: enabled,
            ..self.config
        });
    }

    /// Toggle bass boost
    pub fn set_bass_boost(&mut self, enabled: bool) {
        self.set_config(EffectsConfig {
            bass_boost: enabled,
            ..self.config
        });
    }

    /// Toggle reverb
    pub fn set_reverb(&mut self, enabled: bool) {
        self.set_config(EffectsConfig {
            reverb: enabled,
            ..self.config
        });
    }

    /// Process one buffer of interleaved samples in place
    ///
    /// # Real-Time Safety
    /// - No allocations
    /// - Output length equals input length
    pub fn process(&mut self, buffer: &mut [i16]) {
        for stage in self.stages_mut() {
            if stage.is_active() {
                stage.process(buffer);
            }
        }
    }

    /// Process a buffer of little-endian signed 16-bit PCM bytes in place
    ///
    /// A trailing odd byte is left untouched.
    pub fn process_le_bytes(&mut self, bytes: &mut [u8]) {
        if self.is_bypass() {
            return;
        }

        let mut scratch = std::mem::take(&mut self.scratch);
        decode_le(bytes, &mut scratch);
        self.process(&mut scratch);
        encode_le(&scratch, bytes);
        self.scratch = scratch;
    }

    /// Reset every stage's internal state (seek, track change)
    ///
    /// Toggles are kept; the pan phase, filter history and echo tail are cleared.
    pub fn reset(&mut self) {
        for stage in self.stages_mut() {
            stage.reset();
        }
    }

    /// Current toggles
    pub fn config(&self) -> EffectsConfig {
        self.config
    }

    /// Last format passed to `configure`
    pub fn format(&self) -> AudioFormat {
        self.format
    }

    /// True when `process` leaves audio untouched
    pub fn is_bypass(&self) -> bool {
        !(self.auto_pan.is_active() || self.filter.is_active() || self.reverb.is_active())
    }

    /// Auto-pan stage
    pub fn auto_pan(&self) -> &AutoPanStage {
        &self.auto_pan
    }

    /// Filter stage
    pub fn filter(&self) -> &BiquadStage {
        &self.filter
    }

    /// Reverb stage
    pub fn reverb(&self) -> &ReverbStage {
        &self.reverb
    }

    /// Stages in processing order
    fn stages_mut(&mut self) -> [&mut dyn PcmEffect; 3] {
        [&mut self.auto_pan, &mut self.filter, &mut self.reverb]
    }
}

impl Default for EffectsPipeline {
    fn default() -> Self {
        Self::new(EffectsConfig::default())
    }
}

impl std::fmt::Debug for EffectsPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectsPipeline")
            .field("config", &self.config)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}
