//! # audio-recorder-core
//!
//! Platform-agnostic audio recording core library.
//!
//! Provides the capture device seam, the audio buffer pool, the event
//! listener interface, and the `DeviceRecorder` that ties them together.
//! Platform-specific backends (e.g. the cpal backend) implement the
//! `CaptureDevice` trait and plug into the generic `DeviceRecorder`.
//!
//! ## Architecture
//!
//! ```text
//! audio-recorder-core (this crate)
//! ├── traits/       ← CaptureDevice, Recorder, AudioEventListener
//! ├── models/       ← CaptureError, AudioBuffer, AudioBufferAllocator, DeviceConfig, DeviceInfo
//! ├── processing/   ← sound level metering (RMS + peak)
//! └── recorder.rs   ← DeviceRecorder (generic over the device backend)
//! ```

pub mod models;
pub mod processing;
pub mod recorder;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use models::audio_buffer::{AudioBuffer, AudioBufferAllocator};
pub use models::config::DeviceConfig;
pub use models::device_info::DeviceInfo;
pub use models::error::CaptureError;
pub use recorder::{DeviceRecorder, RecorderDiagnostics};
pub use traits::capture_device::CaptureDevice;
pub use traits::event_listener::AudioEventListener;
pub use traits::recorder::Recorder;
