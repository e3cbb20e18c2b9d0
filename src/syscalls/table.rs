/*!
 * Syscall Table
 * Static mapping from guest syscall numbers to bridge handlers
 */

use super::types::SyscallNumber;
use ahash::AHashMap;

/// Registration record for one serviced syscall
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyscallSpec {
    pub number: SyscallNumber,
    pub name: &'static str,
    pub arg_count: usize,
}

impl From<SyscallNumber> for SyscallSpec {
    fn from(number: SyscallNumber) -> Self {
        Self {
            number,
            name: number.name(),
            arg_count: number.arg_count(),
        }
    }
}

/// Number-to-handler table, resolved once when the session is set up
#[derive(Debug, Clone)]
pub struct SyscallTable {
    entries: AHashMap<u32, SyscallSpec>,
}

impl SyscallTable {
    /// Table for the 32-bit ARM EABI guest
    pub fn arm_eabi() -> Self {
        let entries = SyscallNumber::ALL
            .iter()
            .map(|&number| (number.raw(), SyscallSpec::from(number)))
            .collect();
        Self { entries }
    }

    #[inline]
    pub fn lookup(&self, raw: u32) -> Option<&SyscallSpec> {
        self.entries.get(&raw)
    }

    /// Registered entries in ascending syscall-number order
    pub fn iter(&self) -> impl Iterator<Item = &SyscallSpec> {
        let mut specs: Vec<&SyscallSpec> = self.entries.values().collect();
        specs.sort_by_key(|spec| spec.number.raw());
        specs.into_iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SyscallTable {
    fn default() -> Self {
        Self::arm_eabi()
    }
}
