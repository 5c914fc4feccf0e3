/// Listener informed about each action executed by a recorder.
///
/// All methods are called from the thread driving the recorder, after
/// the corresponding device call has completed. Implementations should
/// marshal to another thread if needed and return quickly; a slow
/// listener delays the next blocking read.
pub trait AudioEventListener: Send + Sync {
    /// Recording started.
    fn recording_started(&self);

    /// An audio buffer was recorded. Fires exactly once per
    /// `record_audio_buffer` call, whether or not the read succeeded.
    fn audio_buffer_recorded(&self, buffer_id: usize, sound_level: f32);

    /// Recording stopped.
    fn recording_stopped(&self);
}
