/*!
 * Region Map
 * Mapped-region bookkeeping rendered as a `/proc/self/maps` listing
 */

use super::traits::MemoryMapSource;
use super::types::MappedRegion;
use crate::core::types::GuestAddr;
use parking_lot::RwLock;
use std::io;

/// Ordered set of mapped guest regions
///
/// Interior mutability lets the emulator keep mapping and unmapping while
/// the bridge holds a shared handle for `/proc/self/maps`.
#[derive(Debug, Default)]
pub struct RegionMap {
    regions: RwLock<Vec<MappedRegion>>,
}

impl RegionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a mapping, keeping regions sorted by start address
    pub fn map(&self, region: MappedRegion) {
        let mut regions = self.regions.write();
        let index = regions.partition_point(|r| r.start < region.start);
        regions.insert(index, region);
    }

    /// Drop the mapping starting at `start`; returns whether one existed
    pub fn unmap(&self, start: GuestAddr) -> bool {
        let mut regions = self.regions.write();
        let before = regions.len();
        regions.retain(|r| r.start != start);
        regions.len() != before
    }

    pub fn find(&self, address: GuestAddr) -> Option<MappedRegion> {
        self.regions
            .read()
            .iter()
            .find(|r| r.contains(address))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.regions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.read().is_empty()
    }
}

impl MemoryMapSource for RegionMap {
    fn dump_maps(&self, out: &mut dyn io::Write) -> io::Result<()> {
        for region in self.regions.read().iter() {
            writeln!(out, "{}", region)?;
        }
        Ok(())
    }
}
