/*!
 * Syscall Executor
 * Central executor servicing guest file-system syscalls against the host root
 */

use crate::core::config::BridgeConfig;
use crate::core::types::RawArgs;
use crate::memory::GuestMemory;
use crate::monitoring::SyscallSpan;
use crate::process::Session;
use crate::vfs::RootDir;
use tracing::{debug, error, info};

use super::table::SyscallTable;
use super::types::{Syscall, SyscallError, SyscallNumber, SyscallResult};

/// File-system syscall bridge for one emulated process
///
/// Runs on the emulation thread; every call is synchronous and blocks the
/// guest for the duration of the host I/O.
pub struct SyscallExecutor {
    pub(super) config: BridgeConfig,
    pub(super) root: RootDir,
    pub(super) session: Session,
    table: SyscallTable,
}

impl SyscallExecutor {
    pub fn new(config: BridgeConfig, session: Session) -> Self {
        let root = RootDir::new(config.root_dir.clone());
        let table = SyscallTable::arm_eabi();
        info!(
            root = %root.path().display(),
            pid = session.pid(),
            syscalls = table.len(),
            "Syscall executor initialized"
        );
        Self {
            config,
            root,
            session,
            table,
        }
    }

    #[inline]
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    #[inline]
    pub fn root(&self) -> &RootDir {
        &self.root
    }

    #[inline]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[inline]
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Syscalls the trap layer should route here
    #[inline]
    pub fn table(&self) -> &SyscallTable {
        &self.table
    }

    /// Service a trapped syscall and return the guest's result register
    ///
    /// `Err` means the emulation session must stop.
    pub fn dispatch(
        &mut self,
        mem: &mut dyn GuestMemory,
        number: u32,
        args: &RawArgs,
    ) -> Result<i64, SyscallError> {
        let spec = match self.table.lookup(number) {
            Some(spec) => *spec,
            None => {
                error!(number, "unhandled syscall");
                return Err(SyscallError::UnknownSyscall(number));
            }
        };
        let syscall = Syscall::decode(spec.number, args);
        self.execute(mem, syscall).map(|result| result.guest_value())
    }

    /// Dispatch by typed number
    pub fn dispatch_number(
        &mut self,
        mem: &mut dyn GuestMemory,
        number: SyscallNumber,
        args: &RawArgs,
    ) -> Result<i64, SyscallError> {
        self.dispatch(mem, number.raw(), args)
    }

    /// Execute a decoded syscall
    pub fn execute(
        &mut self,
        mem: &mut dyn GuestMemory,
        syscall: Syscall,
    ) -> Result<SyscallResult, SyscallError> {
        let span = SyscallSpan::new(syscall.name(), self.session.pid());
        let _guard = span.enter();
        debug!(syscall = ?syscall, "Executing syscall");

        let result = match syscall {
            // Descriptor I/O
            Syscall::Read { fd, buf, count } => self.read(mem, fd, buf, count),
            Syscall::Write { fd, buf, count } => self.write(mem, fd, buf, count),
            Syscall::Writev { fd, iov, iovcnt } => self.writev(mem, fd, iov, iovcnt),
            Syscall::Open { path, flags, mode } => self.open(mem, path, flags, mode),
            Syscall::OpenAt {
                dirfd,
                path,
                flags,
                mode,
            } => self.openat(mem, dirfd, path, flags, mode),
            Syscall::Close { fd } => self.close(fd),
            Syscall::Lseek { fd, offset, whence } => self.lseek(fd, offset, whence),

            // Path operations
            Syscall::Unlink { path } => self.unlink(mem, path),
            Syscall::Access { path, mode } => self.access(mem, path, mode),
            Syscall::Mkdir { path, mode } => self.mkdir(mem, path, mode),
            Syscall::Fstat64 { fd, buf } => self.fstat64(mem, fd, buf),
            Syscall::FstatAt64 {
                dirfd,
                path,
                buf,
                flags,
            } => self.fstatat64(mem, dirfd, path, buf, flags),
            Syscall::Statfs64 { path, size, buf } => self.statfs64(path, size, buf),
            Syscall::ReadlinkAt {
                dirfd,
                path,
                buf,
                bufsz,
            } => self.readlinkat(mem, dirfd, path, buf, bufsz),

            // Descriptor control
            Syscall::Ioctl { fd, request, arg } => self.ioctl(fd, request, arg),
            Syscall::Fcntl { fd, cmd, arg } => self.fcntl(fd, cmd, arg),
        };

        match &result {
            Ok(outcome) => {
                span.record_return(outcome.guest_value());
                if let SyscallResult::Error { message } = outcome {
                    debug!(reason = %message, "syscall failed");
                }
            }
            Err(err) => {
                span.record_error(&err.to_string());
                error!(error = %err, "syscall aborted emulation");
            }
        }

        result
    }
}

impl std::fmt::Debug for SyscallExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyscallExecutor")
            .field("root", &self.root)
            .field("session", &self.session)
            .finish()
    }
}
