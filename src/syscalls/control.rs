/*!
 * Descriptor Control Syscalls
 * ioctl, fcntl and readlinkat
 */

use crate::core::limits::SIOCGIFCONF;
#[cfg(unix)]
use crate::core::limits::{F_GETFL, F_SETFL};
#[cfg(unix)]
use crate::core::types::is_stdio;
use crate::core::types::{Fd, GuestAddr};
use crate::memory::GuestMemory;
use crate::vfs::GuestPath;

use tracing::{info, warn};

use super::executor::SyscallExecutor;
use super::types::{SyscallError, SyscallResult};

impl SyscallExecutor {
    pub(super) fn ioctl(
        &mut self,
        fd: Fd,
        request: u32,
        arg: GuestAddr,
    ) -> Result<SyscallResult, SyscallError> {
        if request == SIOCGIFCONF {
            warn!(fd, arg, "SIOCGIFCONF not emulated, reporting failure");
            return Ok(SyscallResult::error("SIOCGIFCONF is not emulated"));
        }

        Err(SyscallError::unimplemented(
            "ioctl",
            format!("fd {} request 0x{:x}", fd, request),
        ))
    }

    /// Only `F_GETFL` and `F_SETFL` reach the host
    #[cfg(unix)]
    pub(super) fn fcntl(
        &mut self,
        fd: Fd,
        cmd: u32,
        arg: u32,
    ) -> Result<SyscallResult, SyscallError> {
        use nix::fcntl::{fcntl, FcntlArg, OFlag};
        use std::os::unix::io::AsRawFd;

        if cmd != F_GETFL && cmd != F_SETFL {
            return Err(SyscallError::unimplemented(
                "fcntl",
                format!("fd {} cmd {}", fd, cmd),
            ));
        }
        info!(fd, cmd, arg = %format!("0x{:x}", arg), "fcntl");

        let raw_fd = if is_stdio(fd) {
            if cmd == F_SETFL {
                // Host stdio flags stay untouched
                warn!(fd, "ignoring F_SETFL on stdio descriptor");
                return Ok(SyscallResult::success(0));
            }
            fd
        } else {
            match self.session.descriptors().get(fd) {
                Some(entry) => entry.file.as_raw_fd(),
                None => return Ok(SyscallResult::bad_descriptor(fd)),
            }
        };

        let arg = if cmd == F_GETFL {
            FcntlArg::F_GETFL
        } else {
            FcntlArg::F_SETFL(OFlag::from_bits_truncate(arg as i32))
        };

        match fcntl(raw_fd, arg) {
            Ok(value) => Ok(SyscallResult::success(i64::from(value))),
            Err(errno) => {
                warn!(fd, error = %errno, "host fcntl failed");
                Ok(SyscallResult::error(format!("fcntl fd {}: {}", fd, errno)))
            }
        }
    }

    /// No descriptor flags on this host; every command succeeds
    #[cfg(not(unix))]
    pub(super) fn fcntl(
        &mut self,
        fd: Fd,
        cmd: u32,
        arg: u32,
    ) -> Result<SyscallResult, SyscallError> {
        warn!(fd, cmd, arg, "fcntl has no host counterpart on this platform");
        Ok(SyscallResult::success(0))
    }

    pub(super) fn readlinkat(
        &mut self,
        mem: &mut dyn GuestMemory,
        dirfd: Fd,
        path: GuestAddr,
        buf: GuestAddr,
        bufsz: u32,
    ) -> Result<SyscallResult, SyscallError> {
        let pathname = mem.read_cstring(path)?;
        let guest_path = GuestPath::parse(&pathname).with_self_pid(self.session.pid());
        info!(dirfd, path = %pathname, bufsz, "readlinkat");

        let Some(fd) = guest_path.fd_number() else {
            return Err(SyscallError::unimplemented(
                "readlinkat",
                format!("link {:?}", pathname),
            ));
        };

        let Some(entry) = self.session.descriptors().get(fd) else {
            return Ok(SyscallResult::bad_descriptor(fd));
        };

        let name = entry.guest_name.as_bytes();
        let capacity = bufsz as usize;
        if name.len() > capacity {
            return Err(SyscallError::BufferOverflow {
                syscall: "readlinkat".to_string(),
                needed: name.len(),
                capacity,
            });
        }

        mem.write_bytes(buf, name)?;
        if name.len() < capacity {
            mem.write_bytes(buf + name.len() as u64, &[0])?;
        }
        Ok(SyscallResult::success(0))
    }
}
