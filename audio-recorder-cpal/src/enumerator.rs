//! Input device enumeration.

use cpal::traits::{DeviceTrait, HostTrait};

use audio_recorder_core::models::device_info::DeviceInfo;
use audio_recorder_core::models::error::CaptureError;

/// List the host's audio input devices.
///
/// cpal has no stable device identifier, so the device name doubles as
/// the id, matching what `CpalCaptureDevice::with_device` expects.
pub fn list_input_devices() -> Result<Vec<DeviceInfo>, CaptureError> {
    let host = cpal::default_host();
    let default_name = host.default_input_device().and_then(|d| d.name().ok());

    let devices = host
        .input_devices()
        .map_err(|e| CaptureError::StreamFailed(format!("device enumeration failed: {}", e)))?;

    let mut out = Vec::new();
    for device in devices {
        let Ok(name) = device.name() else { continue };
        out.push(DeviceInfo {
            id: name.clone(),
            is_default: default_name.as_deref() == Some(name.as_str()),
            name,
        });
    }
    Ok(out)
}
