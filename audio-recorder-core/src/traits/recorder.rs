use crate::models::audio_buffer::AudioBuffer;
use crate::models::error::CaptureError;

/// Minimal recording interface over a capture device.
///
/// Extracted as a trait so consumers can substitute a double for the
/// concrete [`DeviceRecorder`](crate::recorder::DeviceRecorder).
///
/// State machine:
/// ```text
/// Stopped → start_recording → Recording → stop_recording → Stopped
/// ```
/// `record_audio_buffer` is only valid while recording. Calling it in
/// the stopped state is a caller error and is deliberately not guarded
/// here; behavior is then up to the underlying device.
pub trait Recorder {
    /// Start recording. Calls to `record_audio_buffer` are allowed only
    /// after recording was started. Device failures propagate.
    fn start_recording(&mut self) -> Result<(), CaptureError>;

    /// Blocking call that records one audio buffer.
    ///
    /// Requires recording to be started. Read failures are logged and
    /// recorded as zero samples, never surfaced to the caller.
    fn record_audio_buffer(&mut self, buffer: &mut AudioBuffer);

    /// Stop recording. Recording can be started again with
    /// `start_recording`. Device failures propagate.
    fn stop_recording(&mut self) -> Result<(), CaptureError>;
}
