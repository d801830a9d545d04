//! Cirrus Effects
//!
//! Real-time PCM effects for the Cirrus playback engine.
//!
//! This crate provides:
//! - Stereo auto-pan ("8D audio"), muffle / bass-boost filtering and reverb
//! - A pipeline host that runs them in a fixed order on 16-bit PCM buffers
//! - An explicit configuration object, loadable from TOML and the environment
//! - Offline WAV rendering for auditioning settings without a device
//!
//! # Example: Processing Audio
//!
//! ```rust
//! use cirrus_core::AudioFormat;
//! use cirrus_effects::{EffectsConfig, EffectsPipeline};
//!
//! let mut pipeline = EffectsPipeline::new(EffectsConfig {
//!     bass_boost: true,
//!     reverb: true,
//!     ..EffectsConfig::default()
//! });
//!
//! // Engine switched to 48 kHz stereo
//! pipeline.configure(AudioFormat::pcm16(48_000, 2));
//!
//! // Process audio in place
//! let mut buffer = vec![0i16; 1024];
//! pipeline.process(&mut buffer);
//! assert_eq!(buffer.len(), 1024);
//!
//! // User flips a toggle mid-playback
//! pipeline.set_auto_pan(true);
//! ```

pub mod config;
pub mod effects;
mod error;
pub mod offline;
pub mod pcm;
pub mod pipeline;

pub use config::EffectsConfig;
pub use error::{EffectsError, Result};
pub use pipeline::EffectsPipeline;
