/*!
 * Memory Traits
 * The bridge's view of the emulator-owned guest address space
 */

use super::types::*;
use crate::core::limits::MAX_GUEST_STRING;
use crate::core::types::GuestAddr;
use std::io;

/// Byte-level access to guest virtual memory
///
/// Implemented by the CPU emulator; the bridge only ever borrows it for the
/// duration of one syscall.
pub trait GuestMemory {
    /// Read `len` bytes starting at `address`
    fn read_bytes(&self, address: GuestAddr, len: usize) -> MemoryResult<Vec<u8>>;

    /// Write `data` starting at `address`
    fn write_bytes(&mut self, address: GuestAddr, data: &[u8]) -> MemoryResult<()>;

    /// Read a NUL-terminated UTF-8 string
    fn read_cstring(&self, address: GuestAddr) -> MemoryResult<String> {
        let mut raw = Vec::new();
        let mut cursor = address;
        loop {
            if raw.len() >= MAX_GUEST_STRING {
                return Err(GuestMemoryError::Unterminated {
                    address,
                    limit: MAX_GUEST_STRING,
                });
            }
            let byte = self.read_bytes(cursor, 1)?[0];
            if byte == 0 {
                break;
            }
            raw.push(byte);
            cursor += 1;
        }
        String::from_utf8(raw).map_err(|_| GuestMemoryError::InvalidUtf8(address))
    }

    /// Write `value` followed by a NUL terminator
    fn write_cstring(&mut self, address: GuestAddr, value: &str) -> MemoryResult<()> {
        let mut raw = Vec::with_capacity(value.len() + 1);
        raw.extend_from_slice(value.as_bytes());
        raw.push(0);
        self.write_bytes(address, &raw)
    }

    /// Read a little-endian 32-bit word (a guest pointer or size_t)
    fn read_u32(&self, address: GuestAddr) -> MemoryResult<u32> {
        let raw = self.read_bytes(address, 4)?;
        Ok(u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]))
    }
}

/// Producer of the `/proc/self/maps` listing
pub trait MemoryMapSource: Send + Sync {
    /// Write the current mapped-region listing to `out`
    fn dump_maps(&self, out: &mut dyn io::Write) -> io::Result<()>;
}
