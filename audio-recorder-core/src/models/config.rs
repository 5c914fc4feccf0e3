use serde::{Deserialize, Serialize};

/// Configuration for a capture device.
///
/// The caller configures the device before handing it to a recorder;
/// the recorder itself never inspects these values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Capture sample rate in Hz (default: 16000).
    pub sample_rate: u32,

    /// Number of input channels (default: 1). Valid values: 1, 2.
    pub channels: u16,

    /// Device-side buffer size in samples (default: 4096).
    ///
    /// Sizes the backend's internal sample queue; a blocking read
    /// never waits for more than this many samples to accumulate.
    pub buffer_size_samples: usize,

    /// Specific input device ID, or None for the system default.
    pub device_id: Option<String>,
}

impl DeviceConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.sample_rate == 0 {
            return Err("sample rate must be positive".into());
        }
        if ![1, 2].contains(&self.channels) {
            return Err(format!("unsupported channel count: {}", self.channels));
        }
        if self.buffer_size_samples == 0 {
            return Err("buffer size must be positive".into());
        }
        Ok(())
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            sample_rate: 16000,
            channels: 1,
            buffer_size_samples: 4096,
            device_id: None,
        }
    }
}
