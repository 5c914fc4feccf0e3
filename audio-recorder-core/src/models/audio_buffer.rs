use crate::models::error::CaptureError;
use crate::processing::sound_level;

/// A reusable, fixed-capacity buffer of 16-bit PCM samples.
///
/// Buffers are owned by an [`AudioBufferAllocator`] pool and identified
/// by a stable numeric id. A capture backend fills `audio_data_mut()`,
/// then the recorder calls `audio_data_stored(count)` to record how many
/// samples are valid and refresh the cached sound level.
#[derive(Debug)]
pub struct AudioBuffer {
    id: usize,
    data: Vec<i16>,
    recorded: usize,
    level: f32,
}

impl AudioBuffer {
    fn new(id: usize, capacity: usize) -> Self {
        Self {
            id,
            data: vec![0; capacity],
            recorded: 0,
            level: 0.0,
        }
    }

    /// Stable identifier assigned by the allocator.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Total sample capacity.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// The valid (recorded) samples.
    pub fn audio_data(&self) -> &[i16] {
        &self.data[..self.recorded]
    }

    /// The full backing storage, for a device to read into.
    pub fn audio_data_mut(&mut self) -> &mut [i16] {
        &mut self.data
    }

    /// Number of valid samples.
    pub fn recorded_samples(&self) -> usize {
        self.recorded
    }

    /// Mark `count` samples as recorded and recompute the sound level.
    ///
    /// `count` is clamped to the buffer capacity.
    pub fn audio_data_stored(&mut self, count: usize) {
        self.recorded = count.min(self.data.len());
        self.level = sound_level::rms_level(&self.data[..self.recorded]);
    }

    /// RMS sound level of the recorded samples, `0.0..=1.0`.
    pub fn sound_level(&self) -> f32 {
        self.level
    }

    /// Clear recorded data and sound level. Capacity is unchanged.
    pub fn reset(&mut self) {
        self.recorded = 0;
        self.level = 0.0;
    }
}

/// Fixed pool of equally sized audio buffers.
///
/// Buffers carry sequential ids (`0..buffer_count`) assigned at pool
/// creation. `acquire` hands out an available buffer; `release` returns
/// it reset. Releasing a buffer that did not come from this pool is an
/// error.
#[derive(Debug)]
pub struct AudioBufferAllocator {
    free: Vec<AudioBuffer>,
    buffer_count: usize,
}

impl AudioBufferAllocator {
    pub fn new(buffer_count: usize, buffer_capacity: usize) -> Self {
        let free = (0..buffer_count)
            .map(|id| AudioBuffer::new(id, buffer_capacity))
            .collect();
        Self { free, buffer_count }
    }

    /// Take an available buffer from the pool, or None if all are in use.
    pub fn acquire(&mut self) -> Option<AudioBuffer> {
        self.free.pop()
    }

    /// Return a buffer to the pool, resetting its contents.
    pub fn release(&mut self, mut buffer: AudioBuffer) -> Result<(), CaptureError> {
        if buffer.id >= self.buffer_count || self.free.iter().any(|b| b.id == buffer.id) {
            return Err(CaptureError::Unknown(format!(
                "buffer {} does not belong to this pool",
                buffer.id
            )));
        }
        buffer.reset();
        self.free.push(buffer);
        Ok(())
    }

    /// Number of buffers currently available.
    pub fn available(&self) -> usize {
        self.free.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn stored_count_and_level_update() {
        let mut allocator = AudioBufferAllocator::new(1, 8);
        let mut buffer = allocator.acquire().unwrap();

        buffer.audio_data_mut()[..4].copy_from_slice(&[i16::MAX; 4]);
        buffer.audio_data_stored(4);

        assert_eq!(buffer.recorded_samples(), 4);
        assert_eq!(buffer.audio_data().len(), 4);
        assert_relative_eq!(buffer.sound_level(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn stored_count_clamped_to_capacity() {
        let mut allocator = AudioBufferAllocator::new(1, 8);
        let mut buffer = allocator.acquire().unwrap();

        buffer.audio_data_stored(100);

        assert_eq!(buffer.recorded_samples(), 8);
    }

    #[test]
    fn zero_stored_clears_level() {
        let mut allocator = AudioBufferAllocator::new(1, 8);
        let mut buffer = allocator.acquire().unwrap();

        buffer.audio_data_mut().fill(i16::MAX);
        buffer.audio_data_stored(8);
        assert!(buffer.sound_level() > 0.9);

        buffer.audio_data_stored(0);
        assert_eq!(buffer.recorded_samples(), 0);
        assert_eq!(buffer.sound_level(), 0.0);
    }

    #[test]
    fn pool_exhaustion_and_release() {
        let mut allocator = AudioBufferAllocator::new(2, 4);

        let a = allocator.acquire().unwrap();
        let b = allocator.acquire().unwrap();
        assert_ne!(a.id(), b.id());
        assert!(allocator.acquire().is_none());

        allocator.release(a).unwrap();
        assert_eq!(allocator.available(), 1);

        let again = allocator.acquire().unwrap();
        assert_eq!(again.recorded_samples(), 0);

        allocator.release(b).unwrap();
        allocator.release(again).unwrap();
        assert_eq!(allocator.available(), 2);
    }

    #[test]
    fn release_resets_buffer() {
        let mut allocator = AudioBufferAllocator::new(1, 4);
        let mut buffer = allocator.acquire().unwrap();
        buffer.audio_data_mut().fill(1000);
        buffer.audio_data_stored(4);

        allocator.release(buffer).unwrap();

        let buffer = allocator.acquire().unwrap();
        assert_eq!(buffer.recorded_samples(), 0);
        assert_eq!(buffer.sound_level(), 0.0);
    }

    #[test]
    fn release_rejects_foreign_buffer() {
        let mut pool_a = AudioBufferAllocator::new(1, 4);
        let mut pool_b = AudioBufferAllocator::new(4, 4);

        let foreign = pool_b.acquire().unwrap();
        // id 3 is out of range for a single-buffer pool
        assert!(pool_a.release(foreign).is_err());
    }

    #[test]
    fn release_rejects_duplicate() {
        let mut allocator = AudioBufferAllocator::new(2, 4);
        let a = allocator.acquire().unwrap();
        let _b = allocator.acquire().unwrap();
        allocator.release(a).unwrap();

        // A second buffer claiming an id already in the free list.
        let mut other = AudioBufferAllocator::new(2, 4);
        let dup = other.acquire().unwrap();
        assert_eq!(dup.id(), 1);
        assert!(allocator.release(dup).is_err());
    }
}
