//! # audio-recorder-cpal
//!
//! Cross-platform capture backend for audio-recorder, built on cpal.
//!
//! Provides:
//! - `CpalCaptureDevice` — `CaptureDevice` over a cpal input stream
//! - `SampleQueue` — blocking sample queue between the stream callback
//!   and the reader
//! - `enumerator` — input device listing
//!
//! ## Usage
//! ```ignore
//! use audio_recorder_core::{DeviceConfig, DeviceRecorder};
//! use audio_recorder_cpal::CpalCaptureDevice;
//!
//! let device = CpalCaptureDevice::default_device(DeviceConfig::default())?;
//! let mut recorder = DeviceRecorder::new(device, listener);
//! ```

pub mod device;
pub mod enumerator;
pub mod sample_queue;

pub use device::CpalCaptureDevice;
pub use sample_queue::SampleQueue;
