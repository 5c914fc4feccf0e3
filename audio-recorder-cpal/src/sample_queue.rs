use parking_lot::{Condvar, Mutex};

use audio_recorder_core::CaptureError;

struct Inner {
    buffer: Vec<i16>,
    write_index: usize,
    read_index: usize,
    available: usize,
    closed: bool,
}

/// Blocking sample queue between the cpal stream callback and the
/// reading thread.
///
/// A bounded circular buffer of i16 samples; on overflow the oldest
/// samples are dropped so a stalled reader hears recent audio, not
/// stale audio. `blocking_read` parks the caller until the callback
/// delivers samples or the queue is closed.
pub struct SampleQueue {
    inner: Mutex<Inner>,
    data_ready: Condvar,
    capacity: usize,
}

impl SampleQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                buffer: vec![0; capacity],
                write_index: 0,
                read_index: 0,
                available: 0,
                closed: false,
            }),
            data_ready: Condvar::new(),
            capacity,
        }
    }

    /// Append samples from the stream callback.
    ///
    /// Drops the oldest queued samples on overflow; if `samples` alone
    /// exceeds capacity only its tail is kept. Ignored after `close`.
    pub fn push(&self, samples: &[i16]) {
        if samples.is_empty() {
            return;
        }

        let mut inner = self.inner.lock();
        if inner.closed {
            return;
        }

        let samples = if samples.len() > self.capacity {
            &samples[samples.len() - self.capacity..]
        } else {
            samples
        };

        let overflow = (inner.available + samples.len()).saturating_sub(self.capacity);
        if overflow > 0 {
            inner.read_index = (inner.read_index + overflow) % self.capacity;
            inner.available -= overflow;
        }

        for &sample in samples {
            let idx = inner.write_index;
            inner.buffer[idx] = sample;
            inner.write_index = (idx + 1) % self.capacity;
        }
        inner.available += samples.len();

        drop(inner);
        self.data_ready.notify_all();
    }

    /// Blocking read of up to `buf.len()` samples.
    ///
    /// Blocks until at least one sample is queued. Once the queue is
    /// closed, remaining samples are still drained; after that, reads
    /// fail with `StreamFailed`.
    pub fn blocking_read(&self, buf: &mut [i16]) -> Result<usize, CaptureError> {
        if buf.is_empty() {
            return Ok(0);
        }

        let mut inner = self.inner.lock();
        while inner.available == 0 {
            if inner.closed {
                return Err(CaptureError::StreamFailed("sample queue closed".into()));
            }
            self.data_ready.wait(&mut inner);
        }

        let count = buf.len().min(inner.available);
        for slot in buf.iter_mut().take(count) {
            *slot = inner.buffer[inner.read_index];
            inner.read_index = (inner.read_index + 1) % self.capacity;
        }
        inner.available -= count;
        Ok(count)
    }

    /// Number of samples currently queued.
    pub fn len(&self) -> usize {
        self.inner.lock().available
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Close the queue, waking any blocked reader.
    pub fn close(&self) {
        self.inner.lock().closed = true;
        self.data_ready.notify_all();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    use super::*;

    #[test]
    fn basic_push_read() {
        let queue = SampleQueue::new(10);
        queue.push(&[1, 2, 3]);

        let mut buf = [0i16; 3];
        assert_eq!(queue.blocking_read(&mut buf).unwrap(), 3);
        assert_eq!(buf, [1, 2, 3]);
        assert!(queue.is_empty());
    }

    #[test]
    fn read_caps_at_buffer_length() {
        let queue = SampleQueue::new(10);
        queue.push(&[1, 2, 3, 4, 5]);

        let mut buf = [0i16; 2];
        assert_eq!(queue.blocking_read(&mut buf).unwrap(), 2);
        assert_eq!(buf, [1, 2]);
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn overflow_drops_oldest() {
        let queue = SampleQueue::new(4);
        queue.push(&[1, 2, 3, 4]);
        queue.push(&[5, 6]); // drops 1, 2

        let mut buf = [0i16; 4];
        assert_eq!(queue.blocking_read(&mut buf).unwrap(), 4);
        assert_eq!(buf, [3, 4, 5, 6]);
    }

    #[test]
    fn push_larger_than_capacity_keeps_tail() {
        let queue = SampleQueue::new(3);
        queue.push(&[1, 2, 3, 4, 5]);

        let mut buf = [0i16; 3];
        assert_eq!(queue.blocking_read(&mut buf).unwrap(), 3);
        assert_eq!(buf, [3, 4, 5]);
    }

    #[test]
    fn blocking_read_waits_for_producer() {
        let queue = Arc::new(SampleQueue::new(16));

        let producer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(50));
                queue.push(&[7, 8, 9]);
            })
        };

        let mut buf = [0i16; 8];
        let count = queue.blocking_read(&mut buf).unwrap();
        assert_eq!(&buf[..count], &[7, 8, 9]);

        producer.join().unwrap();
    }

    #[test]
    fn close_wakes_blocked_reader() {
        let queue = Arc::new(SampleQueue::new(16));

        let reader = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                let mut buf = [0i16; 8];
                queue.blocking_read(&mut buf)
            })
        };

        thread::sleep(Duration::from_millis(50));
        queue.close();

        let result = reader.join().unwrap();
        assert!(matches!(result, Err(CaptureError::StreamFailed(_))));
    }

    #[test]
    fn close_drains_remaining_samples_first() {
        let queue = SampleQueue::new(8);
        queue.push(&[1, 2]);
        queue.close();

        let mut buf = [0i16; 8];
        assert_eq!(queue.blocking_read(&mut buf).unwrap(), 2);
        assert!(queue.blocking_read(&mut buf).is_err());
    }

    #[test]
    fn push_after_close_is_ignored() {
        let queue = SampleQueue::new(8);
        queue.close();
        queue.push(&[1, 2, 3]);

        assert!(queue.is_empty());
    }
}
