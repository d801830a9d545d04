//! 8D Audio (stereo auto-pan)
//!
//! Sweeps the stereo balance back and forth with a sine LFO. Uses a linear
//! pan law, so `left_gain + right_gain == 1` at every point of the cycle.
//! Mono streams pass through untouched.

use super::chain::PcmEffect;
use cirrus_core::AudioFormat;
use tracing::debug;

/// Phase advance per stereo sample pair, in radians
///
/// One rotation takes 2π / 5e-5 ≈ 125 664 pairs, about 2.85 s at 44.1 kHz.
pub const PHASE_INCREMENT: f64 = 5e-5;

/// Left/right gains for a phase value
#[inline]
pub fn pan_gains(phase: f64) -> (f64, f64) {
    let pan = phase.sin();
    ((1.0 - pan) / 2.0, (1.0 + pan) / 2.0)
}

/// Auto-pan stage
#[derive(Debug, Clone)]
pub struct AutoPanStage {
    enabled: bool,
    /// Monotonically increasing while enabled
    phase: f64,
    /// Gains of the pair in progress, reused for its right sample
    gains: (f64, f64),
    /// Channel the next sample belongs to (survives odd-length buffers)
    next_channel: usize,
    channels: u16,
}

impl AutoPanStage {
    /// Create a disabled auto-pan for the given format
    pub fn new(format: AudioFormat) -> Self {
        Self {
            enabled: false,
            phase: 0.0,
            gains: pan_gains(0.0),
            next_channel: 0,
            channels: format.channels,
        }
    }

    /// Enable or disable the sweep; disabling rewinds the phase to zero
    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled != self.enabled {
            debug!("Auto-pan {}", if enabled { "enabled" } else { "disabled" });
        }
        self.enabled = enabled;
        if !enabled {
            self.reset();
        }
    }

    /// Whether the sweep is switched on
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Current LFO phase in radians
    pub fn phase(&self) -> f64 {
        self.phase
    }
}

impl PcmEffect for AutoPanStage {
    fn configure(&mut self, format: AudioFormat) {
        if format.channels != self.channels {
            self.next_channel = 0;
        }
        self.channels = format.channels;
    }

    fn process(&mut self, buffer: &mut [i16]) {
        if !self.enabled || self.channels != 2 {
            return;
        }

        // Gains stay within [0, 1]; truncation cannot overflow
        for sample in buffer.iter_mut() {
            let gain = if self.next_channel == 0 {
                self.phase += PHASE_INCREMENT;
                self.gains = pan_gains(self.phase);
                self.gains.0
            } else {
                self.gains.1
            };
            *sample = (f64::from(*sample) * gain) as i16;
            self.next_channel ^= 1;
        }
    }

    fn reset(&mut self) {
        self.phase = 0.0;
        self.gains = pan_gains(0.0);
        self.next_channel = 0;
    }

    fn is_active(&self) -> bool {
        self.enabled && self.channels == 2
    }

    fn name(&self) -> &str {
        "AutoPan"
    }
}
