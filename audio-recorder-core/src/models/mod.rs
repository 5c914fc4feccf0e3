pub mod audio_buffer;
pub mod config;
pub mod device_info;
pub mod error;
