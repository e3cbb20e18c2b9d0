/*!
 * Process Traits
 * Descriptor table abstraction owned by the emulator session
 */

use super::types::FdEntry;
use crate::core::types::Fd;
use std::fs::File;
use std::path::PathBuf;

/// Virtual descriptor table
pub trait DescriptorTable: Send {
    /// Register a host file and return the virtual descriptor bound to it
    fn allocate(&mut self, guest_name: String, host_path: PathBuf, file: File) -> Fd;

    /// Resolve a virtual descriptor
    fn get(&self, fd: Fd) -> Option<&FdEntry>;

    /// Resolve a virtual descriptor mutably (reads, writes and seeks move the host offset)
    fn get_mut(&mut self, fd: Fd) -> Option<&mut FdEntry>;

    /// Remove a descriptor, handing the entry back to the caller
    fn remove(&mut self, fd: Fd) -> Option<FdEntry>;

    /// Number of open descriptors
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
