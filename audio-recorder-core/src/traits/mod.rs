pub mod capture_device;
pub mod event_listener;
pub mod recorder;
