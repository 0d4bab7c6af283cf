//! Growable output sink for generated code

use crate::error::HcmlError;

/// Capacity a fresh buffer starts with
pub const INITIAL_CAPACITY: usize = 1024;

/// Append-only byte buffer that doubles its capacity on demand.
///
/// Growth goes through fallible reservation, so running out of memory (or
/// past the optional ceiling) surfaces as [`HcmlError::BufferAllocation`]
/// instead of aborting.
#[derive(Debug, Clone)]
pub struct OutputBuffer {
    data: Vec<u8>,
    max_capacity: usize,
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::with_max_capacity(usize::MAX)
    }

    /// Buffer whose capacity may never exceed `max_capacity` bytes
    pub fn with_max_capacity(max_capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(INITIAL_CAPACITY.min(max_capacity)),
            max_capacity,
        }
    }

    pub fn push(&mut self, bytes: &[u8]) -> Result<(), HcmlError> {
        if bytes.is_empty() {
            return Ok(());
        }
        let needed = self
            .data
            .len()
            .checked_add(bytes.len())
            .ok_or(HcmlError::BufferAllocation {
                requested: usize::MAX,
            })?;
        if needed > self.data.capacity() {
            self.grow(needed)?;
        }
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    pub fn push_str(&mut self, s: &str) -> Result<(), HcmlError> {
        self.push(s.as_bytes())
    }

    fn grow(&mut self, needed: usize) -> Result<(), HcmlError> {
        let mut target = self.data.capacity().max(INITIAL_CAPACITY);
        while target < needed {
            target = target.saturating_mul(2);
        }
        if target > self.max_capacity {
            return Err(HcmlError::BufferAllocation { requested: target });
        }
        self.data
            .try_reserve_exact(target - self.data.len())
            .map_err(|_| HcmlError::BufferAllocation { requested: target })
    }

    /// Drop everything past `len` bytes
    pub fn truncate(&mut self, len: usize) {
        self.data.truncate(len);
    }

    /// Empty the buffer, keeping its allocation
    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}
