/*!
 * Memory Types
 * Errors and region descriptors for the guest address space
 */

use crate::core::types::GuestAddr;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Guest memory operation result
pub type MemoryResult<T> = Result<T, GuestMemoryError>;

/// Guest memory access errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Diagnostic)]
#[serde(rename_all = "snake_case", tag = "error", content = "details")]
pub enum GuestMemoryError {
    #[error("Unmapped guest memory: 0x{address:x} (+{len} bytes)")]
    #[diagnostic(
        code(memory::unmapped),
        help("The guest passed a pointer outside every mapped region.")
    )]
    Unmapped { address: GuestAddr, len: usize },

    #[error("Guest string at 0x{0:x} is not valid UTF-8")]
    #[diagnostic(code(memory::invalid_utf8))]
    InvalidUtf8(GuestAddr),

    #[error("Guest string at 0x{address:x} has no terminator within {limit} bytes")]
    #[diagnostic(code(memory::unterminated))]
    Unterminated { address: GuestAddr, limit: usize },
}

/// Page protection bits of a mapped region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Protection {
    pub read: bool,
    pub write: bool,
    pub exec: bool,
}

impl Protection {
    pub const fn new(read: bool, write: bool, exec: bool) -> Self {
        Self { read, write, exec }
    }

    pub const fn read_only() -> Self {
        Self::new(true, false, false)
    }

    pub const fn read_write() -> Self {
        Self::new(true, true, false)
    }

    pub const fn read_exec() -> Self {
        Self::new(true, false, true)
    }
}

impl fmt::Display for Protection {
    /// `/proc/<pid>/maps` permission column; mappings are always private
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}p",
            if self.read { 'r' } else { '-' },
            if self.write { 'w' } else { '-' },
            if self.exec { 'x' } else { '-' },
        )
    }
}

/// One mapped range of the guest address space
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappedRegion {
    pub start: GuestAddr,
    pub end: GuestAddr,
    pub prot: Protection,
    pub offset: u64,
    pub name: String,
}

impl MappedRegion {
    pub fn new(start: GuestAddr, end: GuestAddr, prot: Protection) -> Self {
        Self {
            start,
            end,
            prot,
            offset: 0,
            name: String::new(),
        }
    }

    /// Attach the backing file name shown in the last column
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    #[inline]
    pub fn contains(&self, address: GuestAddr) -> bool {
        address >= self.start && address < self.end
    }
}

impl fmt::Display for MappedRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:08x}-{:08x} {} {:08x} 00:00 0",
            self.start, self.end, self.prot, self.offset
        )?;
        if !self.name.is_empty() {
            write!(f, " {}", self.name)?;
        }
        Ok(())
    }
}
