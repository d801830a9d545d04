//! Effects Pipeline Host
//!
//! Sequences the effect stages for the playback engine's audio callback.
//!
//! # Architecture
//!
//! ```text
//! Engine PCM -> AutoPanStage -> BiquadStage -> ReverbStage -> Engine output
//!                     ^              ^              ^
//!                     +------ EffectsConfig --------+
//! ```

mod host;

pub use host::EffectsPipeline;
