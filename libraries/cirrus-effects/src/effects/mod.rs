//! Audio effect stages
//!
//! Every stage implements [`PcmEffect`] and works in place on interleaved
//! signed 16-bit samples.
//!
//! Available stages:
//! - **AutoPanStage**: slow sine sweep of the stereo balance ("8D audio")
//! - **BiquadStage**: low-pass muffle or +10 dB bass-boost shelf
//! - **ReverbStage**: 150 ms feedback echo

mod auto_pan;
mod biquad;
mod chain;
mod reverb;

pub use auto_pan::{pan_gains, AutoPanStage, PHASE_INCREMENT};
pub use biquad::{
    BiquadCoefficients, BiquadStage, FilterMode, BASS_BOOST_FREQ_HZ, BASS_BOOST_GAIN_DB,
    BASS_BOOST_SLOPE, MIN_SAMPLE_RATE, MUFFLE_CUTOFF_HZ, MUFFLE_Q,
};
pub use chain::PcmEffect;
pub use reverb::{delay_len_for, ReverbStage, DECAY, DELAY_SECONDS};

#[cfg(test)]
mod tests {
    /// Generate an interleaved sine wave with the same value on every channel
    pub(crate) fn generate_sine_i16(
        freq: f64,
        sample_rate: u32,
        frames: usize,
        channels: usize,
        amplitude: f64,
    ) -> Vec<i16> {
        let mut samples = Vec::with_capacity(frames * channels);

        for i in 0..frames {
            let t = i as f64 / f64::from(sample_rate);
            let sample = (amplitude * (2.0 * std::f64::consts::PI * freq * t).sin()) as i16;
            for _ in 0..channels {
                samples.push(sample);
            }
        }

        samples
    }

    /// Largest absolute sample value
    pub(crate) fn peak(samples: &[i16]) -> i32 {
        samples
            .iter()
            .map(|&s| i32::from(s).abs())
            .max()
            .unwrap_or(0)
    }
}
