/*!
 * Process Control Block
 * Default descriptor table for a single emulated process
 */

use super::traits::DescriptorTable;
use super::types::FdEntry;
use crate::core::limits::FIRST_VIRTUAL_FD;
use crate::core::types::Fd;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::PathBuf;
use tracing::debug;

/// Descriptor table handing out the lowest free descriptor, like the kernel
#[derive(Debug, Default)]
pub struct ProcessControlBlock {
    entries: BTreeMap<Fd, FdEntry>,
}

impl ProcessControlBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lowest descriptor >= FIRST_VIRTUAL_FD not currently in use
    fn next_free(&self) -> Fd {
        let mut candidate = FIRST_VIRTUAL_FD;
        for &fd in self.entries.range(FIRST_VIRTUAL_FD..).map(|(fd, _)| fd) {
            if fd != candidate {
                break;
            }
            candidate += 1;
        }
        candidate
    }

    /// Open descriptors in ascending order
    pub fn descriptors(&self) -> impl Iterator<Item = Fd> + '_ {
        self.entries.keys().copied()
    }
}

impl DescriptorTable for ProcessControlBlock {
    fn allocate(&mut self, guest_name: String, host_path: PathBuf, file: File) -> Fd {
        let fd = self.next_free();
        debug!(fd, guest_name = %guest_name, host_path = %host_path.display(), "descriptor allocated");
        self.entries.insert(fd, FdEntry::new(guest_name, host_path, file));
        fd
    }

    fn get(&self, fd: Fd) -> Option<&FdEntry> {
        self.entries.get(&fd)
    }

    fn get_mut(&mut self, fd: Fd) -> Option<&mut FdEntry> {
        self.entries.get_mut(&fd)
    }

    fn remove(&mut self, fd: Fd) -> Option<FdEntry> {
        self.entries.remove(&fd)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
