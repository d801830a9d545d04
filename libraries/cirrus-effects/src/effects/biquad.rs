//! Muffle / Bass Boost filter
//!
//! A single second-order IIR (direct form I) that runs as either an RBJ
//! low-pass ("muffled") or an RBJ low-shelf ("bass boost"). Muffled wins when
//! both are requested. With neither requested the stage is a pure bypass.

use super::chain::PcmEffect;
use crate::pcm::clip16;
use cirrus_core::AudioFormat;
use std::f64::consts::PI;
use tracing::{debug, warn};

/// Low-pass cutoff used by the muffle effect
pub const MUFFLE_CUTOFF_HZ: f64 = 800.0;
/// Low-pass Q used by the muffle effect (Butterworth)
pub const MUFFLE_Q: f64 = 0.707;
/// Low-shelf corner used by bass boost
pub const BASS_BOOST_FREQ_HZ: f64 = 100.0;
/// Low-shelf gain used by bass boost
pub const BASS_BOOST_GAIN_DB: f64 = 10.0;
/// Low-shelf slope used by bass boost
pub const BASS_BOOST_SLOPE: f64 = 1.0;
/// Coefficients are never computed for rates below this
pub const MIN_SAMPLE_RATE: u32 = 44_100;

/// Which response the filter currently implements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Pass-through, identity coefficients
    #[default]
    Bypass,
    /// Low-pass at 800 Hz
    Muffled,
    /// +10 dB low-shelf at 100 Hz
    BassBoost,
}

impl FilterMode {
    /// Resolve the user toggles into a single mode (muffled has priority)
    pub fn from_flags(muffled: bool, bass_boost: bool) -> Self {
        if muffled {
            Self::Muffled
        } else if bass_boost {
            Self::BassBoost
        } else {
            Self::Bypass
        }
    }
}

/// Normalized biquad coefficients (a0 divided out)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoefficients {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a1: f64,
    pub a2: f64,
}

impl BiquadCoefficients {
    /// Pass-through coefficients
    pub const IDENTITY: Self = Self {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a1: 0.0,
        a2: 0.0,
    };

    fn normalized(b0: f64, b1: f64, b2: f64, a0: f64, a1: f64, a2: f64) -> Self {
        Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
        }
    }

    /// RBJ cookbook low-pass
    pub fn low_pass(sample_rate: f64, frequency: f64, q: f64) -> Self {
        let omega = 2.0 * PI * frequency / sample_rate;
        let sin_omega = omega.sin();
        let cos_omega = omega.cos();
        let alpha = sin_omega / (2.0 * q);

        let b0 = (1.0 - cos_omega) / 2.0;
        let b1 = 1.0 - cos_omega;
        let b2 = (1.0 - cos_omega) / 2.0;
        let a0 = 1.0 + alpha;
        let a1 = -2.0 * cos_omega;
        let a2 = 1.0 - alpha;

        Self::normalized(b0, b1, b2, a0, a1, a2)
    }

    /// RBJ cookbook low-shelf with shelf slope `slope`
    pub fn low_shelf(sample_rate: f64, frequency: f64, gain_db: f64, slope: f64) -> Self {
        let a = 10.0_f64.powf(gain_db / 40.0);
        let omega = 2.0 * PI * frequency / sample_rate;
        let sin_omega = omega.sin();
        let cos_omega = omega.cos();
        let alpha = sin_omega / 2.0 * ((a + 1.0 / a) * (1.0 / slope - 1.0) + 2.0).sqrt();
        let beta = 2.0 * a.sqrt() * alpha;

        let b0 = a * ((a + 1.0) - (a - 1.0) * cos_omega + beta);
        let b1 = 2.0 * a * ((a - 1.0) - (a + 1.0) * cos_omega);
        let b2 = a * ((a + 1.0) - (a - 1.0) * cos_omega - beta);
        let a0 = (a + 1.0) + (a - 1.0) * cos_omega + beta;
        let a1 = -2.0 * ((a - 1.0) + (a + 1.0) * cos_omega);
        let a2 = (a + 1.0) + (a - 1.0) * cos_omega - beta;

        Self::normalized(b0, b1, b2, a0, a1, a2)
    }

    /// Coefficients for `mode` at an (already clamped) sample rate
    pub fn for_mode(mode: FilterMode, sample_rate: u32) -> Self {
        let rate = f64::from(sample_rate);
        match mode {
            FilterMode::Bypass => Self::IDENTITY,
            FilterMode::Muffled => Self::low_pass(rate, MUFFLE_CUTOFF_HZ, MUFFLE_Q),
            FilterMode::BassBoost => Self::low_shelf(
                rate,
                BASS_BOOST_FREQ_HZ,
                BASS_BOOST_GAIN_DB,
                BASS_BOOST_SLOPE,
            ),
        }
    }
}

impl Default for BiquadCoefficients {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Previous inputs and outputs for one channel
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct FilterHistory {
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
}

/// Muffle / bass-boost filter stage
#[derive(Debug, Clone)]
pub struct BiquadStage {
    mode: FilterMode,
    coefficients: BiquadCoefficients,
    /// One history per interleaved channel
    history: Vec<FilterHistory>,
    /// Channel the next sample belongs to (survives odd-length buffers)
    next_channel: usize,
    sample_rate: u32,
}

impl BiquadStage {
    /// Create a bypassed filter for the given format
    pub fn new(format: AudioFormat) -> Self {
        let mut stage = Self {
            mode: FilterMode::Bypass,
            coefficients: BiquadCoefficients::IDENTITY,
            history: Vec::new(),
            next_channel: 0,
            sample_rate: MIN_SAMPLE_RATE,
        };
        stage.configure(format);
        stage
    }

    /// Update the muffle / bass-boost toggles
    ///
    /// Coefficients are recomputed only when the resulting mode changes and
    /// apply from the next processed sample. Turning both off restores identity
    /// coefficients and zeroes the history.
    pub fn set_effects(&mut self, muffled: bool, bass_boost: bool) {
        let mode = FilterMode::from_flags(muffled, bass_boost);
        if mode == self.mode {
            return;
        }

        debug!("Filter mode {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
        self.coefficients = BiquadCoefficients::for_mode(mode, self.sample_rate);
        if mode == FilterMode::Bypass {
            self.clear_history();
        }
    }

    /// Recompute coefficients for a new sample rate (floored at 44.1 kHz)
    pub fn on_format_change(&mut self, sample_rate: u32) {
        if sample_rate < MIN_SAMPLE_RATE {
            warn!(
                "Filter sample rate {} Hz below {} Hz, clamping",
                sample_rate, MIN_SAMPLE_RATE
            );
        }
        self.sample_rate = sample_rate.max(MIN_SAMPLE_RATE);
        self.coefficients = BiquadCoefficients::for_mode(self.mode, self.sample_rate);
    }

    /// Current mode
    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    /// Active coefficients
    pub fn coefficients(&self) -> BiquadCoefficients {
        self.coefficients
    }

    /// Sample rate the coefficients were computed for
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn clear_history(&mut self) {
        self.history.fill(FilterHistory::default());
        self.next_channel = 0;
    }

    fn history_is_clear(&self) -> bool {
        self.history.iter().all(|h| *h == FilterHistory::default())
    }
}

impl PcmEffect for BiquadStage {
    fn configure(&mut self, format: AudioFormat) {
        let channels = usize::from(format.channels.max(1));
        if channels != self.history.len() {
            self.history = vec![FilterHistory::default(); channels];
            self.next_channel = 0;
        }
        self.on_format_change(format.sample_rate.as_hz());
    }

    fn process(&mut self, buffer: &mut [i16]) {
        if self.mode == FilterMode::Bypass {
            return;
        }

        let BiquadCoefficients { b0, b1, b2, a1, a2 } = self.coefficients;
        let channels = self.history.len();

        for sample in buffer.iter_mut() {
            let h = &mut self.history[self.next_channel];
            let x = f64::from(*sample);
            let y = b0 * x + b1 * h.x1 + b2 * h.x2 - a1 * h.y1 - a2 * h.y2;

            h.x2 = h.x1;
            h.x1 = x;
            h.y2 = h.y1;
            h.y1 = y;

            *sample = clip16(y);

            self.next_channel += 1;
            if self.next_channel == channels {
                self.next_channel = 0;
            }
        }
    }

    fn reset(&mut self) {
        self.clear_history();
    }

    fn is_active(&self) -> bool {
        self.mode != FilterMode::Bypass
    }

    fn name(&self) -> &str {
        "Filter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::tests::{generate_sine_i16, peak};

    #[test]
    fn mode_priority() {
        assert_eq!(FilterMode::from_flags(false, false), FilterMode::Bypass);
        assert_eq!(FilterMode::from_flags(true, false), FilterMode::Muffled);
        assert_eq!(FilterMode::from_flags(false, true), FilterMode::BassBoost);
        assert_eq!(FilterMode::from_flags(true, true), FilterMode::Muffled);
    }

    #[test]
    fn bypass_is_exact_and_stateless() {
        let mut stage = BiquadStage::new(AudioFormat::cd_quality());
        let input = generate_sine_i16(1000.0, 44_100, 512, 2, 20_000.0);
        let mut buffer = input.clone();

        stage.process(&mut buffer);

        assert_eq!(buffer, input);
        assert!(stage.history_is_clear());
        assert!(!stage.is_active());
    }

    #[test]
    fn low_pass_has_unity_dc_gain() {
        let c = BiquadCoefficients::low_pass(44_100.0, MUFFLE_CUTOFF_HZ, MUFFLE_Q);
        let dc = (c.b0 + c.b1 + c.b2) / (1.0 + c.a1 + c.a2);
        assert!((dc - 1.0).abs() < 1e-9, "DC gain {dc}");
    }

    #[test]
    fn low_shelf_dc_gain_is_ten_db() {
        let c = BiquadCoefficients::low_shelf(
            44_100.0,
            BASS_BOOST_FREQ_HZ,
            BASS_BOOST_GAIN_DB,
            BASS_BOOST_SLOPE,
        );
        let dc = (c.b0 + c.b1 + c.b2) / (1.0 + c.a1 + c.a2);
        let expected = 10.0_f64.powf(BASS_BOOST_GAIN_DB / 20.0);
        assert!((dc - expected).abs() < 1e-6, "DC gain {dc}, expected {expected}");
    }

    #[test]
    fn degenerate_rate_is_clamped() {
        let mut stage = BiquadStage::new(AudioFormat::pcm16(0, 2));
        assert_eq!(stage.sample_rate(), MIN_SAMPLE_RATE);

        stage.set_effects(true, false);
        let c = stage.coefficients();
        assert!(c.b0.is_finite() && c.a1.is_finite() && c.a2.is_finite());

        stage.on_format_change(96_000);
        assert_eq!(stage.sample_rate(), 96_000);
    }

    #[test]
    fn set_effects_same_mode_keeps_history() {
        let mut stage = BiquadStage::new(AudioFormat::pcm16(44_100, 1));
        stage.set_effects(false, true);
        stage.process(&mut [10_000, 12_000, 8_000]);

        // Muffled already wins; adding bass boost changes nothing
        stage.set_effects(true, false);
        stage.process(&mut [5_000]);
        let before = stage.history.clone();
        stage.set_effects(true, true);

        assert_eq!(stage.history, before);
        assert_eq!(stage.mode(), FilterMode::Muffled);
    }

    #[test]
    fn disabling_zeroes_history_and_restores_identity() {
        let mut stage = BiquadStage::new(AudioFormat::cd_quality());
        stage.set_effects(true, false);
        let mut buffer = generate_sine_i16(200.0, 44_100, 256, 2, 10_000.0);
        stage.process(&mut buffer);
        assert!(!stage.history_is_clear());

        stage.set_effects(false, false);

        assert!(stage.history_is_clear());
        assert_eq!(stage.coefficients(), BiquadCoefficients::IDENTITY);
    }

    #[test]
    fn output_is_clipped() {
        let mut stage = BiquadStage::new(AudioFormat::pcm16(44_100, 1));
        stage.set_effects(false, true);

        // Full-scale square at low frequency: +10 dB shelf must saturate, not wrap
        let mut buffer: Vec<i16> = (0..8192)
            .map(|i| if (i / 2048) % 2 == 0 { i16::MAX } else { i16::MIN })
            .collect();
        stage.process(&mut buffer);

        assert!(buffer.iter().any(|&s| s == i16::MAX));
        assert!(buffer.iter().any(|&s| s == i16::MIN));
    }

    #[test]
    fn stereo_channels_are_filtered_independently() {
        let mut stage = BiquadStage::new(AudioFormat::cd_quality());
        stage.set_effects(true, false);

        // Left silent, right loud: left must stay silent
        let mut buffer: Vec<i16> = (0..2048)
            .flat_map(|i| [0, if i % 2 == 0 { 20_000 } else { -20_000 }])
            .collect();
        stage.process(&mut buffer);

        assert!(buffer.chunks_exact(2).all(|f| f[0] == 0));
        assert!(peak(&buffer) > 0);
    }
}
