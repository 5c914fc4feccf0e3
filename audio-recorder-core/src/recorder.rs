//! Recorder over an abstract capture device.
//!
//! `DeviceRecorder` is a thin pass-through: it owns no scheduling or
//! buffering of its own, delegating hardware access and sample delivery
//! to the [`CaptureDevice`] backend and reporting every executed action
//! to an [`AudioEventListener`].

use std::sync::Arc;

use crate::models::audio_buffer::AudioBuffer;
use crate::models::error::CaptureError;
use crate::traits::capture_device::CaptureDevice;
use crate::traits::event_listener::AudioEventListener;
use crate::traits::recorder::Recorder;

/// Counters accumulated across a recorder's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecorderDiagnostics {
    pub buffers_recorded: u64,
    pub samples_recorded_total: u64,
    pub failed_reads: u64,
}

/// Records audio buffers from a capture device, generic over the
/// backend the way a session is generic over its providers.
///
/// All calls block on the calling thread; run the recorder on a
/// dedicated capture thread if the rest of the application must stay
/// responsive. `stop_recording` takes effect only once an in-flight
/// `record_audio_buffer` has returned.
pub struct DeviceRecorder<D: CaptureDevice> {
    device: D,
    listener: Arc<dyn AudioEventListener>,
    diagnostics: RecorderDiagnostics,
}

impl<D: CaptureDevice> DeviceRecorder<D> {
    /// `device` must already be configured by the caller.
    pub fn new(device: D, listener: Arc<dyn AudioEventListener>) -> Self {
        Self {
            device,
            listener,
            diagnostics: RecorderDiagnostics::default(),
        }
    }

    pub fn diagnostics(&self) -> RecorderDiagnostics {
        self.diagnostics
    }

    /// Access to the underlying device, e.g. for `device_info`.
    pub fn device(&self) -> &D {
        &self.device
    }
}

impl<D: CaptureDevice> Recorder for DeviceRecorder<D> {
    fn start_recording(&mut self) -> Result<(), CaptureError> {
        self.device.start()?;
        self.listener.recording_started();
        Ok(())
    }

    fn record_audio_buffer(&mut self, buffer: &mut AudioBuffer) {
        match self.device.read(buffer.audio_data_mut()) {
            Ok(count) => {
                buffer.audio_data_stored(count);
                self.diagnostics.samples_recorded_total += count as u64;
            }
            Err(e) => {
                // Swallowed: the listener is still told the buffer
                // completed, with zero samples stored.
                log::error!("audio read failed: {}", e);
                buffer.audio_data_stored(0);
                self.diagnostics.failed_reads += 1;
            }
        }
        self.diagnostics.buffers_recorded += 1;
        self.listener
            .audio_buffer_recorded(buffer.id(), buffer.sound_level());
    }

    fn stop_recording(&mut self) -> Result<(), CaptureError> {
        self.device.stop()?;
        self.listener.recording_stopped();
        Ok(())
    }
}
