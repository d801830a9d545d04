/// Capability interface shared by every effect stage
///
/// Stages know nothing about the platform audio framework. The host calls
/// `configure` whenever the output format changes and `process` once per
/// buffer of interleaved signed 16-bit samples.
use cirrus_core::AudioFormat;

/// Trait for PCM effect stages driven by the pipeline host
///
/// # Safety
/// - Must NOT allocate memory in `process()` (real-time constraint)
/// - Must be Send so the host can live on the audio thread
pub trait PcmEffect: Send {
    /// Format-change hook
    ///
    /// May be called zero or many times; must be called before the next
    /// `process` whenever the engine's output format changes.
    fn configure(&mut self, format: AudioFormat);

    /// Process audio buffer in-place
    ///
    /// # Arguments
    /// * `buffer` - Interleaved samples (L, R, L, R, ...) or mono samples
    ///
    /// # Real-Time Constraints
    /// - No allocations
    /// - No blocking operations
    /// - Output length equals input length
    fn process(&mut self, buffer: &mut [i16]);

    /// Return to the stage's documented reset state (seek, track change)
    ///
    /// Enable flags are left as they are.
    fn reset(&mut self);

    /// Whether `process` currently alters audio
    fn is_active(&self) -> bool;

    /// Get effect name (for debugging)
    fn name(&self) -> &str;
}
