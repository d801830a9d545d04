//! Signed 16-bit PCM helpers
//!
//! The playback engine hands over little-endian byte buffers. These helpers
//! move between that representation and `i16` samples, and provide the single
//! saturating conversion every stage uses before writing a sample back.

/// Convert a processed value to a 16-bit sample, saturating at the i16 range
///
/// Clamping happens in floating point before the conversion, so the bounds are
/// exactly [-32768, 32767]. Fractions truncate toward zero. NaN maps to 0.
#[inline]
pub fn clip16(value: f64) -> i16 {
    value.clamp(f64::from(i16::MIN), f64::from(i16::MAX)) as i16
}

/// Decode little-endian signed 16-bit samples into `out`
///
/// `out` is cleared first and only grows when `bytes` holds more samples than
/// its current capacity. A trailing odd byte is ignored.
pub fn decode_le(bytes: &[u8], out: &mut Vec<i16>) {
    out.clear();
    out.extend(
        bytes
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]])),
    );
}

/// Encode samples back into `bytes` as little-endian signed 16-bit
///
/// Writes `min(samples.len(), bytes.len() / 2)` samples; any trailing odd byte
/// is left untouched.
pub fn encode_le(samples: &[i16], bytes: &mut [u8]) {
    for (pair, sample) in bytes.chunks_exact_mut(2).zip(samples) {
        pair.copy_from_slice(&sample.to_le_bytes());
    }
}
