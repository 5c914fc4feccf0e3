//! cpal-backed capture device.
//!
//! Opens a cpal input stream on a dedicated capture thread and delivers
//! samples through a [`SampleQueue`], satisfying the blocking-read
//! contract of `CaptureDevice`. The `cpal::Stream` is `!Send`, so it
//! lives entirely on the capture thread; the device handle itself stays
//! `Send`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use audio_recorder_core::models::config::DeviceConfig;
use audio_recorder_core::models::device_info::DeviceInfo;
use audio_recorder_core::models::error::CaptureError;
use audio_recorder_core::traits::capture_device::CaptureDevice;

use crate::sample_queue::SampleQueue;

/// Capture device over a cpal input stream.
///
/// The device is configured at construction (spec of the `CaptureDevice`
/// seam: the handle is configured by the caller before use). `start`
/// spawns the capture thread; `stop` joins it. Restart after stop is
/// supported with a fresh sample queue.
pub struct CpalCaptureDevice {
    config: DeviceConfig,
    info: DeviceInfo,
    queue: Arc<SampleQueue>,
    running: Arc<AtomicBool>,
    capture_handle: Option<thread::JoinHandle<()>>,
}

impl CpalCaptureDevice {
    /// Create a device for the system default input.
    pub fn default_device(mut config: DeviceConfig) -> Result<Self, CaptureError> {
        config.device_id = None;
        Self::build(config, "Default Input".into(), true)
    }

    /// Create a device for a specific input by cpal device name.
    pub fn with_device(
        mut config: DeviceConfig,
        id: String,
        name: String,
    ) -> Result<Self, CaptureError> {
        config.device_id = Some(id);
        Self::build(config, name, false)
    }

    fn build(config: DeviceConfig, name: String, is_default: bool) -> Result<Self, CaptureError> {
        config.validate().map_err(CaptureError::ConfigurationFailed)?;
        let queue = Arc::new(SampleQueue::new(config.buffer_size_samples));
        let info = DeviceInfo {
            id: config.device_id.clone().unwrap_or_else(|| "default-input".into()),
            name,
            is_default,
        };
        Ok(Self {
            config,
            info,
            queue,
            running: Arc::new(AtomicBool::new(false)),
            capture_handle: None,
        })
    }
}

impl CaptureDevice for CpalCaptureDevice {
    fn start(&mut self) -> Result<(), CaptureError> {
        if self.running.load(Ordering::SeqCst) {
            return Err(CaptureError::ConfigurationFailed(
                "capture already running".into(),
            ));
        }

        // Fresh queue per start so a restart does not replay stale
        // samples or the previous closed state.
        self.queue = Arc::new(SampleQueue::new(self.config.buffer_size_samples));

        self.running.store(true, Ordering::SeqCst);
        let running = Arc::clone(&self.running);
        let queue = Arc::clone(&self.queue);
        let config = self.config.clone();

        let handle = thread::Builder::new()
            .name("cpal-capture".into())
            .spawn(move || {
                if let Err(e) = capture_loop(&running, &config, &queue) {
                    log::error!("capture error: {}", e);
                }
                running.store(false, Ordering::SeqCst);
                // Wake any reader still blocked on the queue.
                queue.close();
            })
            .map_err(|e| {
                CaptureError::Unknown(format!("failed to spawn capture thread: {}", e))
            })?;

        self.capture_handle = Some(handle);
        Ok(())
    }

    fn read(&mut self, buf: &mut [i16]) -> Result<usize, CaptureError> {
        self.queue.blocking_read(buf)
    }

    fn stop(&mut self) -> Result<(), CaptureError> {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.capture_handle.take() {
            let _ = handle.join();
        }
        self.queue.close();
        Ok(())
    }

    fn device_info(&self) -> DeviceInfo {
        self.info.clone()
    }
}

impl Drop for CpalCaptureDevice {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

/// Capture loop running on the dedicated thread.
///
/// Sequence:
/// 1. Resolve the input device (default or by name)
/// 2. Build an input stream in the device's native sample format
/// 3. Play the stream; the callback pushes i16 samples into the queue
/// 4. Poll the run flag until stopped, then drop the stream
fn capture_loop(
    running: &AtomicBool,
    config: &DeviceConfig,
    queue: &Arc<SampleQueue>,
) -> Result<(), CaptureError> {
    let host = cpal::default_host();

    let device = match &config.device_id {
        Some(id) => host
            .input_devices()
            .map_err(|e| CaptureError::StreamFailed(format!("device enumeration failed: {}", e)))?
            .find(|d| d.name().map(|n| &n == id).unwrap_or(false))
            .ok_or(CaptureError::DeviceNotAvailable)?,
        None => host
            .default_input_device()
            .ok_or(CaptureError::DeviceNotAvailable)?,
    };

    let supported = device.default_input_config().map_err(|e| {
        CaptureError::ConfigurationFailed(format!("no default input config: {}", e))
    })?;
    let sample_format = supported.sample_format();

    let stream_config = cpal::StreamConfig {
        channels: config.channels,
        sample_rate: cpal::SampleRate(config.sample_rate),
        buffer_size: cpal::BufferSize::Default,
    };

    let err_fn = |e| log::error!("input stream error: {}", e);

    let stream = match sample_format {
        cpal::SampleFormat::I16 => {
            let queue = Arc::clone(queue);
            device.build_input_stream(
                &stream_config,
                move |data: &[i16], _: &cpal::InputCallbackInfo| queue.push(data),
                err_fn,
                None,
            )
        }
        cpal::SampleFormat::U16 => {
            let queue = Arc::clone(queue);
            device.build_input_stream(
                &stream_config,
                move |data: &[u16], _: &cpal::InputCallbackInfo| {
                    let converted: Vec<i16> =
                        data.iter().map(|&s| (s as i32 - 0x8000) as i16).collect();
                    queue.push(&converted);
                },
                err_fn,
                None,
            )
        }
        cpal::SampleFormat::F32 => {
            let queue = Arc::clone(queue);
            device.build_input_stream(
                &stream_config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    let converted: Vec<i16> = data
                        .iter()
                        .map(|&s| (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)
                        .collect();
                    queue.push(&converted);
                },
                err_fn,
                None,
            )
        }
        other => {
            return Err(CaptureError::ConfigurationFailed(format!(
                "unsupported sample format: {:?}",
                other
            )))
        }
    }
    .map_err(|e| CaptureError::StreamFailed(format!("failed to build input stream: {}", e)))?;

    stream
        .play()
        .map_err(|e| CaptureError::StreamFailed(format!("failed to start stream: {}", e)))?;

    log::debug!(
        "capture started: {} Hz, {} ch, {:?}",
        config.sample_rate,
        config.channels,
        sample_format
    );

    while running.load(Ordering::SeqCst) {
        thread::sleep(Duration::from_millis(10));
    }

    drop(stream);
    log::debug!("capture stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_config() {
        let config = DeviceConfig {
            sample_rate: 0,
            ..Default::default()
        };
        assert!(matches!(
            CpalCaptureDevice::default_device(config),
            Err(CaptureError::ConfigurationFailed(_))
        ));
    }

    #[test]
    fn default_device_info() {
        let device = CpalCaptureDevice::default_device(DeviceConfig::default()).unwrap();
        let info = device.device_info();
        assert!(info.is_default);
        assert_eq!(info.id, "default-input");
    }

    #[test]
    fn with_device_info_carries_id_and_name() {
        let device = CpalCaptureDevice::with_device(
            DeviceConfig::default(),
            "hw:1,0".into(),
            "USB Microphone".into(),
        )
        .unwrap();
        let info = device.device_info();
        assert!(!info.is_default);
        assert_eq!(info.id, "hw:1,0");
        assert_eq!(info.name, "USB Microphone");
    }
}
