/*!
 * File Descriptor Syscalls
 * open/openat/read/write/writev/lseek/close against virtualized descriptors
 */

use crate::core::limits::{
    IOVEC_ENTRY_SIZE, ROOT_DIRFD, SEEK_CUR, SEEK_END, SEEK_SET, STDERR_FD, STDOUT_FD, URANDOM_PATH,
};
use crate::core::types::{Fd, GuestAddr};
use crate::memory::GuestMemory;
use crate::vfs::{procfs, GuestPath};

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;
use tracing::{error, info, warn};

use super::executor::SyscallExecutor;
use super::types::{SyscallError, SyscallResult};

/// Largest single host read; longer requests complete as short reads
const MAX_READ_CHUNK: usize = 1024 * 1024;

/// Open a host file read/write, settling for read-only when the host refuses writes
fn open_host(path: &Path) -> io::Result<File> {
    match OpenOptions::new().read(true).write(true).open(path) {
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            warn!(host_path = %path.display(), "host file not writable, opening read-only");
            OpenOptions::new().read(true).open(path)
        }
        other => other,
    }
}

impl SyscallExecutor {
    pub(super) fn open(
        &mut self,
        mem: &mut dyn GuestMemory,
        path: GuestAddr,
        flags: u32,
        mode: u32,
    ) -> Result<SyscallResult, SyscallError> {
        let filename = mem.read_cstring(path)?;
        self.open_file(&filename, flags, mode)
    }

    pub(super) fn openat(
        &mut self,
        mem: &mut dyn GuestMemory,
        dirfd: Fd,
        path: GuestAddr,
        flags: u32,
        mode: u32,
    ) -> Result<SyscallResult, SyscallError> {
        let filename = mem.read_cstring(path)?;
        info!(
            dirfd,
            filename = %filename,
            flags = %format!("0x{:x}", flags),
            mode = %format!("0o{:o}", mode),
            "openat"
        );

        if !filename.starts_with('/') && dirfd != ROOT_DIRFD {
            return Ok(SyscallResult::error(format!(
                "directory-relative open of {:?} via fd {} is not supported",
                filename, dirfd
            )));
        }

        self.open_file(&filename, flags, mode)
    }

    /// Shared open path: materialize pseudo-files, then bind a host file
    fn open_file(
        &mut self,
        filename: &str,
        flags: u32,
        mode: u32,
    ) -> Result<SyscallResult, SyscallError> {
        let guest_path = GuestPath::parse(filename);
        if guest_path.is(URANDOM_PATH) {
            return Err(SyscallError::unimplemented("open", URANDOM_PATH));
        }

        let normalized = guest_path.with_self_pid(self.session.pid());
        let host_path = if normalized.is_proc() {
            procfs::materialize(&self.root, &normalized, &self.session, &self.config)
                .map_err(|e| SyscallError::host_io(format!("materialize {}", filename), &e))?
        } else {
            self.root.translate(&normalized)
        };

        if !host_path.is_file() {
            warn!(filename = %filename, host_path = %host_path.display(), "File does not exist");
            return Ok(SyscallResult::error(format!("no such file: {}", filename)));
        }

        let file = match open_host(&host_path) {
            Ok(file) => file,
            Err(e) => {
                warn!(filename = %filename, error = %e, "host open failed");
                return Ok(SyscallResult::error(format!("open {}: {}", filename, e)));
            }
        };

        let fd = self
            .session
            .descriptors_mut()
            .allocate(filename.to_owned(), host_path, file);
        info!(
            fd,
            filename = %filename,
            flags = %format!("0x{:x}", flags),
            mode = %format!("0o{:o}", mode),
            "File opened"
        );
        Ok(SyscallResult::success(i64::from(fd)))
    }

    pub(super) fn read(
        &mut self,
        mem: &mut dyn GuestMemory,
        fd: Fd,
        buf: GuestAddr,
        count: u32,
    ) -> Result<SyscallResult, SyscallError> {
        // Negative descriptors are skipped along with stdio
        if fd <= STDERR_FD {
            warn!(fd, "skip read for stdio descriptor");
            return Ok(SyscallResult::success(0));
        }

        let Some(entry) = self.session.descriptors_mut().get_mut(fd) else {
            return Ok(SyscallResult::bad_descriptor(fd));
        };
        info!(fd, count, file = %entry.guest_name, "Reading");

        let mut data = vec![0u8; (count as usize).min(MAX_READ_CHUNK)];
        let n = match entry.file.read(&mut data) {
            Ok(n) => n,
            Err(e) => {
                warn!(fd, file = %entry.guest_name, error = %e, "host read failed");
                return Ok(SyscallResult::error(format!("read fd {}: {}", fd, e)));
            }
        };

        mem.write_bytes(buf, &data[..n])?;
        Ok(SyscallResult::success(n as i64))
    }

    pub(super) fn write(
        &mut self,
        mem: &mut dyn GuestMemory,
        fd: Fd,
        buf: GuestAddr,
        count: u32,
    ) -> Result<SyscallResult, SyscallError> {
        let data = mem.read_bytes(buf, count as usize)?;

        match fd {
            STDOUT_FD => {
                info!(target: "guest::stdout", "{}", String::from_utf8_lossy(&data));
                return Ok(SyscallResult::success(data.len() as i64));
            }
            STDERR_FD => {
                warn!(target: "guest::stderr", "{}", String::from_utf8_lossy(&data));
                return Ok(SyscallResult::success(data.len() as i64));
            }
            _ => {}
        }

        let Some(entry) = self.session.descriptors_mut().get_mut(fd) else {
            return Ok(SyscallResult::bad_descriptor(fd));
        };

        match entry.file.write(&data) {
            Ok(n) => Ok(SyscallResult::success(n as i64)),
            Err(e) => {
                warn!(fd, file = %entry.guest_name, error = %e, "File write error, skipping");
                Ok(SyscallResult::error(format!("write fd {}: {}", fd, e)))
            }
        }
    }

    pub(super) fn writev(
        &mut self,
        mem: &mut dyn GuestMemory,
        fd: Fd,
        iov: GuestAddr,
        iovcnt: u32,
    ) -> Result<SyscallResult, SyscallError> {
        if fd != STDERR_FD {
            return Err(SyscallError::unimplemented(
                "writev",
                format!("descriptor {}", fd),
            ));
        }

        for i in 0..u64::from(iovcnt) {
            let entry = iov + i * IOVEC_ENTRY_SIZE;
            let base = GuestAddr::from(mem.read_u32(entry)?);
            let len = mem.read_u32(entry + 4)? as usize;
            let data = mem.read_bytes(base, len)?;
            error!(target: "guest::stderr", "Writev {}", String::from_utf8_lossy(&data));
        }

        Ok(SyscallResult::success(0))
    }

    pub(super) fn lseek(
        &mut self,
        fd: Fd,
        offset: i64,
        whence: u32,
    ) -> Result<SyscallResult, SyscallError> {
        let target = match whence {
            SEEK_SET => match u64::try_from(offset) {
                Ok(start) => SeekFrom::Start(start),
                Err(_) => {
                    return Ok(SyscallResult::error(format!(
                        "negative absolute offset {}",
                        offset
                    )))
                }
            },
            SEEK_CUR => SeekFrom::Current(offset),
            SEEK_END => SeekFrom::End(offset),
            other => {
                return Err(SyscallError::unimplemented(
                    "lseek",
                    format!("whence {}", other),
                ))
            }
        };

        let Some(entry) = self.session.descriptors_mut().get_mut(fd) else {
            return Ok(SyscallResult::bad_descriptor(fd));
        };

        match entry.file.seek(target) {
            Ok(position) => Ok(SyscallResult::success(position as i64)),
            Err(e) => Ok(SyscallResult::error(format!("lseek fd {}: {}", fd, e))),
        }
    }

    pub(super) fn close(&mut self, fd: Fd) -> Result<SyscallResult, SyscallError> {
        let Some(entry) = self.session.descriptors_mut().remove(fd) else {
            warn!(fd, "close of unknown descriptor");
            return Ok(SyscallResult::bad_descriptor(fd));
        };

        #[cfg(unix)]
        {
            use std::os::unix::io::IntoRawFd;

            if let Err(errno) = nix::unistd::close(entry.file.into_raw_fd()) {
                warn!(fd, file = %entry.guest_name, error = %errno, "fd close error");
                return Ok(SyscallResult::error(format!("close fd {}: {}", fd, errno)));
            }
        }

        #[cfg(not(unix))]
        drop(entry.file);

        info!(fd, file = %entry.guest_name, "File closed");
        Ok(SyscallResult::success(0))
    }
}
