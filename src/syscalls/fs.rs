/*!
 * File System Syscalls
 * Path-based operations and the stat family
 */

use crate::core::limits::{AT_NO_AUTOMOUNT, AT_SYMLINK_NOFOLLOW};
use crate::core::types::{Fd, GuestAddr};
use crate::memory::GuestMemory;
use crate::vfs::{GuestPath, Stat64};

use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use super::executor::SyscallExecutor;
use super::types::{SyscallError, SyscallResult};

/// fstatat flag bits that are accepted (and otherwise ignored)
const FSTATAT_KNOWN_FLAGS: u32 = AT_SYMLINK_NOFOLLOW | AT_NO_AUTOMOUNT;

impl SyscallExecutor {
    /// Logged and reported as done; nothing is removed from the host
    pub(super) fn unlink(
        &mut self,
        mem: &mut dyn GuestMemory,
        path: GuestAddr,
    ) -> Result<SyscallResult, SyscallError> {
        let filename = mem.read_cstring(path)?;
        let host_path = self.root.translate(&GuestPath::parse(&filename));
        info!(path = %filename, host_path = %host_path.display(), "unlink call (file kept)");
        Ok(SyscallResult::success(0))
    }

    pub(super) fn access(
        &mut self,
        mem: &mut dyn GuestMemory,
        path: GuestAddr,
        mode: u32,
    ) -> Result<SyscallResult, SyscallError> {
        let filename = mem.read_cstring(path)?;
        warn!(path = %filename, mode, "access check always granted");
        Ok(SyscallResult::success(0))
    }

    pub(super) fn mkdir(
        &mut self,
        mem: &mut dyn GuestMemory,
        path: GuestAddr,
        mode: u32,
    ) -> Result<SyscallResult, SyscallError> {
        let filename = mem.read_cstring(path)?;
        let host_path = self.root.translate(&GuestPath::parse(&filename));
        info!(path = %filename, mode = %format!("0o{:o}", mode), "mkdir call");

        if !host_path.exists() {
            if let Err(e) = fs::create_dir_all(&host_path) {
                warn!(path = %filename, error = %e, "mkdir failed on host");
            }
        }
        Ok(SyscallResult::success(0))
    }

    pub(super) fn fstat64(
        &mut self,
        mem: &mut dyn GuestMemory,
        fd: Fd,
        buf: GuestAddr,
    ) -> Result<SyscallResult, SyscallError> {
        let Some(entry) = self.session.descriptors().get(fd) else {
            return Ok(SyscallResult::bad_descriptor(fd));
        };
        info!(fd, file = %entry.guest_name, "File stat64");

        let host_path = entry.host_path.clone();
        self.stat_into(mem, &host_path, buf)
    }

    pub(super) fn fstatat64(
        &mut self,
        mem: &mut dyn GuestMemory,
        dirfd: Fd,
        path: GuestAddr,
        buf: GuestAddr,
        flags: u32,
    ) -> Result<SyscallResult, SyscallError> {
        let pathname = mem.read_cstring(path)?;
        let guest_path = GuestPath::parse(&pathname);

        if !guest_path.is_absolute() {
            return Err(SyscallError::unimplemented(
                "fstatat64",
                format!("relative path {:?} against dirfd {}", pathname, dirfd),
            ));
        }
        if flags & !FSTATAT_KNOWN_FLAGS != 0 {
            return Err(SyscallError::unimplemented(
                "fstatat64",
                format!("flags 0x{:x}", flags),
            ));
        }
        // AT_SYMLINK_NOFOLLOW and AT_NO_AUTOMOUNT are accepted but not honored

        info!(path = %pathname, flags, "File fstatat64");
        let host_path = self
            .root
            .translate(&guest_path.with_self_pid(self.session.pid()));

        if !host_path.exists() {
            warn!(path = %pathname, "File was not found");
            return Ok(SyscallResult::error(format!("no such file: {}", pathname)));
        }

        self.stat_into(mem, &host_path, buf)
    }

    /// Reported as failing without touching the guest buffer
    pub(super) fn statfs64(
        &mut self,
        path: GuestAddr,
        size: u32,
        buf: GuestAddr,
    ) -> Result<SyscallResult, SyscallError> {
        debug!(path, size, buf, "statfs64 not emulated");
        Ok(SyscallResult::error("statfs64 is not emulated"))
    }

    /// Stat a host path and marshal it into guest memory
    fn stat_into(
        &self,
        mem: &mut dyn GuestMemory,
        host_path: &Path,
        buf: GuestAddr,
    ) -> Result<SyscallResult, SyscallError> {
        let metadata = match fs::metadata(host_path) {
            Ok(md) => md,
            Err(e) => {
                warn!(host_path = %host_path.display(), error = %e, "host stat failed");
                return Ok(SyscallResult::error(format!(
                    "stat {}: {}",
                    host_path.display(),
                    e
                )));
            }
        };

        Stat64::from_metadata(&metadata).write_to(mem, buf, self.config.write_stat_times)?;
        Ok(SyscallResult::success(0))
    }
}
