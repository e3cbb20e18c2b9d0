/*!
 * Flat Guest Memory
 * A single contiguous guest mapping backed by a host byte vector
 */

use super::traits::GuestMemory;
use super::types::*;
use crate::core::types::GuestAddr;

/// Contiguous guest memory starting at `base`
#[derive(Debug, Clone)]
pub struct FlatMemory {
    base: GuestAddr,
    bytes: Vec<u8>,
}

impl FlatMemory {
    pub fn new(base: GuestAddr, size: usize) -> Self {
        Self {
            base,
            bytes: vec![0; size],
        }
    }

    #[inline]
    pub fn base(&self) -> GuestAddr {
        self.base
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Translate a guest range to an index range, if fully mapped
    fn span(&self, address: GuestAddr, len: usize) -> MemoryResult<std::ops::Range<usize>> {
        let unmapped = GuestMemoryError::Unmapped { address, len };
        let start = address
            .checked_sub(self.base)
            .and_then(|off| usize::try_from(off).ok())
            .ok_or_else(|| unmapped.clone())?;
        let end = start.checked_add(len).ok_or_else(|| unmapped.clone())?;
        if end > self.bytes.len() {
            return Err(unmapped);
        }
        Ok(start..end)
    }
}

impl GuestMemory for FlatMemory {
    fn read_bytes(&self, address: GuestAddr, len: usize) -> MemoryResult<Vec<u8>> {
        let range = self.span(address, len)?;
        Ok(self.bytes[range].to_vec())
    }

    fn write_bytes(&mut self, address: GuestAddr, data: &[u8]) -> MemoryResult<()> {
        let range = self.span(address, data.len())?;
        self.bytes[range].copy_from_slice(data);
        Ok(())
    }
}
