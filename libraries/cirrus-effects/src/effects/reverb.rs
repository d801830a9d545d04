//! Reverb (feedback delay line)
//!
//! A 150 ms circular buffer with a 0.5 decay. The mixed output is written
//! back into the line, so one impulse produces an echo train halving every
//! `delay_len()` samples. Disabling drops the line and the pending tail with it;
//! the cut is abrupt, not faded.

use super::chain::PcmEffect;
use crate::pcm::clip16;
use cirrus_core::AudioFormat;
use tracing::debug;

/// Echo delay in seconds
pub const DELAY_SECONDS: f64 = 0.150;
/// Linear gain applied to the delayed signal
pub const DECAY: f64 = 0.5;

/// Delay line length for `format`, never less than one sample
pub fn delay_len_for(format: AudioFormat) -> usize {
    let len = f64::from(format.sample_rate.as_hz()) * DELAY_SECONDS * f64::from(format.channels);
    (len.round() as usize).max(1)
}

/// Feedback delay stage
#[derive(Debug, Clone)]
pub struct ReverbStage {
    enabled: bool,
    format: AudioFormat,
    /// Empty while disabled
    buffer: Vec<i16>,
    cursor: usize,
}

impl ReverbStage {
    /// Create a disabled reverb for the given format
    pub fn new(format: AudioFormat) -> Self {
        Self {
            enabled: false,
            format,
            buffer: Vec::new(),
            cursor: 0,
        }
    }

    /// Enable or disable the echo
    ///
    /// Enabling allocates a silent line for the last configured format.
    /// Disabling releases the line.
    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled == self.enabled {
            return;
        }

        self.enabled = enabled;
        if enabled {
            self.allocate();
        } else {
            debug!("Reverb disabled, dropping {} sample delay line", self.buffer.len());
            self.buffer = Vec::new();
            self.cursor = 0;
        }
    }

    /// Whether the echo is switched on
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Reallocate the delay line for a new format
    pub fn on_format_change(&mut self, format: AudioFormat) {
        self.format = format;
        if self.enabled {
            self.allocate();
        }
    }

    /// Current delay line length in samples (0 while disabled)
    pub fn delay_len(&self) -> usize {
        self.buffer.len()
    }

    fn allocate(&mut self) {
        let len = delay_len_for(self.format);
        debug!(
            "Reverb delay line: {} samples ({} Hz, {} ch)",
            len,
            self.format.sample_rate.as_hz(),
            self.format.channels
        );
        self.buffer = vec![0; len];
        self.cursor = 0;
    }
}

impl PcmEffect for ReverbStage {
    fn configure(&mut self, format: AudioFormat) {
        self.on_format_change(format);
    }

    fn process(&mut self, buffer: &mut [i16]) {
        if !self.enabled || self.buffer.is_empty() {
            return;
        }

        let len = self.buffer.len();
        for sample in buffer.iter_mut() {
            let delayed = self.buffer[self.cursor];
            let out = clip16(f64::from(*sample) + f64::from(delayed) * DECAY);
            self.buffer[self.cursor] = out;
            *sample = out;

            self.cursor += 1;
            if self.cursor == len {
                self.cursor = 0;
            }
        }
    }

    fn reset(&mut self) {
        self.buffer.fill(0);
        self.cursor = 0;
    }

    fn is_active(&self) -> bool {
        self.enabled
    }

    fn name(&self) -> &str {
        "Reverb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_length_matches_format() {
        assert_eq!(delay_len_for(AudioFormat::pcm16(44_100, 2)), 13_230);
        assert_eq!(delay_len_for(AudioFormat::pcm16(48_000, 1)), 7_200);
        assert_eq!(delay_len_for(AudioFormat::pcm16(0, 2)), 1);
        assert_eq!(delay_len_for(AudioFormat::pcm16(44_100, 0)), 1);
    }

    #[test]
    fn disabled_passes_through() {
        let mut stage = ReverbStage::new(AudioFormat::cd_quality());
        let input: Vec<i16> = (0..1000).map(|i| (i * 7) as i16).collect();
        let mut buffer = input.clone();

        stage.process(&mut buffer);

        assert_eq!(buffer, input);
        assert_eq!(stage.delay_len(), 0);
    }

    #[test]
    fn enable_allocates_and_disable_releases() {
        let mut stage = ReverbStage::new(AudioFormat::pcm16(44_100, 1));
        stage.set_enabled(true);
        assert_eq!(stage.delay_len(), 6_615);

        stage.set_enabled(false);
        assert_eq!(stage.delay_len(), 0);
    }

    #[test]
    fn format_change_while_disabled_is_remembered() {
        let mut stage = ReverbStage::new(AudioFormat::cd_quality());
        stage.configure(AudioFormat::pcm16(48_000, 2));
        assert_eq!(stage.delay_len(), 0);

        stage.set_enabled(true);
        assert_eq!(stage.delay_len(), 14_400);
    }

    #[test]
    fn degenerate_format_uses_single_sample_line() {
        let mut stage = ReverbStage::new(AudioFormat::pcm16(0, 0));
        stage.set_enabled(true);
        assert_eq!(stage.delay_len(), 1);

        // Every sample echoes the previous output at half gain
        let mut buffer = [1000, 0, 0, 0];
        stage.process(&mut buffer);
        assert_eq!(buffer, [1000, 500, 250, 125]);
    }

    #[test]
    fn feedback_saturates_instead_of_wrapping() {
        let mut stage = ReverbStage::new(AudioFormat::pcm16(0, 1));
        stage.set_enabled(true);

        let mut buffer = [30_000, 30_000, 30_000, -30_000, -30_000, -30_000];
        stage.process(&mut buffer);

        assert_eq!(buffer[0], 30_000);
        assert_eq!(buffer[1], i16::MAX);
        assert_eq!(buffer[2], i16::MAX);
        // 32767 * 0.5 = 16383.5 pulls the first negative sample up
        assert_eq!(buffer[3], -13_616);
        assert_eq!(buffer[5], i16::MIN);
    }

    #[test]
    fn reset_silences_tail() {
        let mut stage = ReverbStage::new(AudioFormat::pcm16(0, 1));
        stage.set_enabled(true);
        stage.process(&mut [20_000]);

        stage.reset();
        let mut buffer = [0; 4];
        stage.process(&mut buffer);

        assert_eq!(buffer, [0; 4]);
    }
}
