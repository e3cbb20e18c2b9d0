/*!
 * Syscalls Module
 * Guest file-system syscall bridge
 */

mod control;
mod executor;
mod fd;
mod fs;
mod table;
mod types;

// Re-export public API
pub use executor::SyscallExecutor;
pub use table::{SyscallSpec, SyscallTable};
pub use types::{Syscall, SyscallError, SyscallNumber, SyscallResult};
