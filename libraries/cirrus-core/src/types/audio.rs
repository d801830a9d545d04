/// Audio-related types
use serde::{Deserialize, Serialize};

/// Sample rate in Hz
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SampleRate(pub u32);

impl SampleRate {
    /// Common sample rates
    pub const CD_QUALITY: Self = Self(44_100);
    pub const DVD_QUALITY: Self = Self(48_000);
    pub const HIGH_RES_96: Self = Self(96_000);

    /// Create a new sample rate
    #[must_use]
    pub fn new(hz: u32) -> Self {
        Self(hz)
    }

    /// Get the sample rate as Hz
    pub fn as_hz(&self) -> u32 {
        self.0
    }
}

impl Default for SampleRate {
    fn default() -> Self {
        Self::CD_QUALITY
    }
}

/// PCM format delivered by the playback engine
///
/// Only signed 16-bit PCM is produced by the engine, so `bits_per_sample`
/// is informational and always 16 for formats built through [`AudioFormat::pcm16`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioFormat {
    /// Sample rate
    pub sample_rate: SampleRate,

    /// Number of channels (1 = mono, 2 = stereo)
    pub channels: u16,

    /// Bits per sample
    pub bits_per_sample: u16,
}

impl AudioFormat {
    /// Bit depth of every stream the engine hands us
    pub const PCM16_BITS: u16 = 16;

    /// Create a new audio format
    pub fn new(sample_rate: SampleRate, channels: u16, bits_per_sample: u16) -> Self {
        Self {
            sample_rate,
            channels,
            bits_per_sample,
        }
    }

    /// Create a signed 16-bit PCM format
    pub fn pcm16(sample_rate: u32, channels: u16) -> Self {
        Self::new(SampleRate::new(sample_rate), channels, Self::PCM16_BITS)
    }

    /// Create CD quality stereo format (44.1kHz, 16-bit, stereo)
    pub fn cd_quality() -> Self {
        Self {
            sample_rate: SampleRate::CD_QUALITY,
            channels: 2,
            bits_per_sample: Self::PCM16_BITS,
        }
    }

    /// True for two-channel interleaved streams
    pub fn is_stereo(&self) -> bool {
        self.channels == 2
    }

    /// Number of frames held by `samples` interleaved samples
    pub fn frames(&self, samples: usize) -> usize {
        samples / usize::from(self.channels.max(1))
    }

    /// Calculate the byte rate (bytes per second)
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate.as_hz() * u32::from(self.channels) * u32::from(self.bits_per_sample) / 8
    }
}

impl Default for AudioFormat {
    fn default() -> Self {
        Self::cd_quality()
    }
}

/// Buffer of interleaved signed 16-bit PCM samples
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcmBuffer {
    /// Interleaved samples: [L, R, L, R, ...] for stereo
    pub samples: Vec<i16>,

    /// Audio format information
    pub format: AudioFormat,
}

impl PcmBuffer {
    /// Create a new PCM buffer
    pub fn new(samples: Vec<i16>, format: AudioFormat) -> Self {
        Self { samples, format }
    }

    /// Create an empty buffer with a given capacity
    pub fn with_capacity(capacity: usize, format: AudioFormat) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
            format,
        }
    }

    /// Get the number of frames (samples per channel)
    pub fn frames(&self) -> usize {
        self.format.frames(self.samples.len())
    }

    /// Get the duration in seconds
    pub fn duration_secs(&self) -> f64 {
        let rate = self.format.sample_rate.as_hz();
        if rate == 0 {
            return 0.0;
        }
        self.frames() as f64 / f64::from(rate)
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Get the length in samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }
}
