use crate::models::device_info::DeviceInfo;
use crate::models::error::CaptureError;

/// Interface for platform-specific audio capture handles.
///
/// Implemented by:
/// - `CpalCaptureDevice` (cross-platform, in `audio-recorder-cpal`)
/// - Test doubles in recorder tests
///
/// The device is assumed to be fully configured (sample rate, channel
/// count, buffer size) before it is handed to a recorder. The trait is
/// `Send` so a device can be moved onto a dedicated capture thread.
pub trait CaptureDevice: Send {
    /// Start hardware capture. Errors pass through to the caller.
    fn start(&mut self) -> Result<(), CaptureError>;

    /// Blocking read of up to `buf.len()` samples into `buf`.
    ///
    /// Blocks the calling thread until the platform delivers data.
    /// Returns the number of samples written, `1..=buf.len()`.
    /// A platform-level failure (the native read reporting a
    /// non-positive count, or the stream going away) is an `Err`.
    fn read(&mut self, buf: &mut [i16]) -> Result<usize, CaptureError>;

    /// Stop hardware capture. Capture can be started again afterwards.
    fn stop(&mut self) -> Result<(), CaptureError>;

    /// Information about the audio device backing this handle.
    fn device_info(&self) -> DeviceInfo;
}
