/*!
 * Virtual File System Module
 * Guest path confinement, kernel-info pseudo-files and stat marshalling
 */

pub mod paths;
pub mod procfs;
pub mod stat;

// Re-exports
pub use paths::{GuestPath, RootDir};
pub use procfs::{materialize, ProcFile};
pub use stat::Stat64;
