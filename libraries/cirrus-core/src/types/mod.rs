mod audio;

pub use audio::{AudioFormat, PcmBuffer, SampleRate};
