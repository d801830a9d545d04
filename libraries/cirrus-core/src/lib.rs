//! Cirrus Core
//!
//! Platform-agnostic types and error handling shared by the Cirrus audio crates.
//!
//! # Example
//!
//! ```rust
//! use cirrus_core::{AudioFormat, PcmBuffer};
//!
//! let format = AudioFormat::pcm16(48_000, 2);
//! let buffer = PcmBuffer::new(vec![0; 960], format);
//!
//! assert_eq!(buffer.frames(), 480);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod types;

pub use error::{CirrusError, Result};
pub use types::{AudioFormat, PcmBuffer, SampleRate};
