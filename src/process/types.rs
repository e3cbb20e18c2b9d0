/*!
 * Process Types
 * Descriptor table entries
 */

use std::fs::File;
use std::path::PathBuf;

/// One open guest descriptor
///
/// Owned by the descriptor table; handlers borrow it for a single syscall.
#[derive(Debug)]
pub struct FdEntry {
    /// Path exactly as the guest passed it to open
    pub guest_name: String,
    /// Root-confined host path backing the descriptor
    pub host_path: PathBuf,
    /// Host file the descriptor is bound to
    pub file: File,
}

impl FdEntry {
    pub fn new(guest_name: impl Into<String>, host_path: impl Into<PathBuf>, file: File) -> Self {
        Self {
            guest_name: guest_name.into(),
            host_path: host_path.into(),
            file,
        }
    }
}
