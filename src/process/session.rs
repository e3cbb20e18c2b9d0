/*!
 * Emulator Session
 * Per-process state the bridge is constructed with
 */

use super::pcb::ProcessControlBlock;
use super::traits::DescriptorTable;
use crate::core::types::Pid;
use crate::memory::{MemoryMapSource, RegionMap};
use std::sync::Arc;

/// Process identity, descriptor table and memory-map source of one guest
///
/// Passed explicitly into the executor; nothing is looked up globally.
pub struct Session {
    pid: Pid,
    descriptors: Box<dyn DescriptorTable>,
    maps: Arc<dyn MemoryMapSource>,
}

impl Session {
    pub fn new(pid: Pid, descriptors: Box<dyn DescriptorTable>, maps: Arc<dyn MemoryMapSource>) -> Self {
        Self {
            pid,
            descriptors,
            maps,
        }
    }

    /// Session with the default descriptor table
    pub fn with_maps(pid: Pid, maps: Arc<dyn MemoryMapSource>) -> Self {
        Self::new(pid, Box::new(ProcessControlBlock::new()), maps)
    }

    /// Session with an empty region map
    pub fn standalone(pid: Pid) -> Self {
        Self::with_maps(pid, Arc::new(RegionMap::new()))
    }

    #[inline]
    pub fn pid(&self) -> Pid {
        self.pid
    }

    #[inline]
    pub fn descriptors(&self) -> &dyn DescriptorTable {
        self.descriptors.as_ref()
    }

    #[inline]
    pub fn descriptors_mut(&mut self) -> &mut dyn DescriptorTable {
        self.descriptors.as_mut()
    }

    #[inline]
    pub fn maps(&self) -> &dyn MemoryMapSource {
        self.maps.as_ref()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("pid", &self.pid)
            .field("open_descriptors", &self.descriptors.len())
            .finish()
    }
}
