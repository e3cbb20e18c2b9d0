/*!
 * Guest VFS Library
 * File-system syscall bridge for an emulated 32-bit ARM Android process
 */

pub mod core;
pub mod memory;
pub mod monitoring;
pub mod process;
pub mod syscalls;
pub mod vfs;

// Re-exports
pub use crate::core::{BridgeConfig, ConfigError, Fd, GuestAddr, Pid, RawArgs};
pub use memory::{
    FlatMemory, GuestMemory, GuestMemoryError, MappedRegion, MemoryMapSource, Protection, RegionMap,
};
pub use monitoring::init_tracing;
pub use process::{DescriptorTable, FdEntry, ProcessControlBlock, Session};
pub use syscalls::{
    Syscall, SyscallError, SyscallExecutor, SyscallNumber, SyscallResult, SyscallSpec, SyscallTable,
};
pub use vfs::{GuestPath, RootDir, Stat64};
