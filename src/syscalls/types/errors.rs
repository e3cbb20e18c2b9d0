/*!
 * Syscall Error Types
 * Failures that end the emulation session instead of reaching the guest
 */

use crate::memory::GuestMemoryError;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unrecoverable syscall failures
///
/// Anything the guest is expected to handle itself is reported as a
/// [`SyscallResult::Error`](super::SyscallResult) instead.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(rename_all = "snake_case", tag = "error_type", content = "details")]
#[non_exhaustive]
pub enum SyscallError {
    /// Operation code, path shape or flag combination the bridge does not emulate
    #[error("Not implemented: {syscall}: {detail}")]
    #[diagnostic(
        code(syscall::unimplemented),
        help("The guest reached an emulation gap. Implement the case or stub it explicitly.")
    )]
    Unimplemented { syscall: String, detail: String },

    /// Syscall number with no registered handler
    #[error("Unknown syscall number 0x{0:x}")]
    #[diagnostic(code(syscall::unknown_number))]
    UnknownSyscall(u32),

    /// Result would not fit the guest-supplied buffer
    #[error("Buffer overflow in {syscall}: need {needed} bytes, guest buffer holds {capacity}")]
    #[diagnostic(code(syscall::buffer_overflow))]
    BufferOverflow {
        syscall: String,
        needed: usize,
        capacity: usize,
    },

    /// Guest pointer could not be dereferenced
    #[error("Guest memory error: {0}")]
    #[diagnostic(code(syscall::guest_memory))]
    GuestMemory(#[from] GuestMemoryError),

    /// Host-side failure while preparing state the guest depends on
    #[error("Host I/O error during {context}: {message}")]
    #[diagnostic(code(syscall::host_io))]
    HostIo { context: String, message: String },
}

impl SyscallError {
    /// Create an unimplemented-surface error
    #[inline]
    pub fn unimplemented(syscall: &str, detail: impl Into<String>) -> Self {
        Self::Unimplemented {
            syscall: syscall.to_owned(),
            detail: detail.into(),
        }
    }

    /// Create a host I/O error
    #[inline]
    pub fn host_io(context: impl Into<String>, err: &std::io::Error) -> Self {
        Self::HostIo {
            context: context.into(),
            message: err.to_string(),
        }
    }

    /// Whether this error marks an emulation gap
    #[inline]
    pub const fn is_unimplemented(&self) -> bool {
        matches!(self, Self::Unimplemented { .. } | Self::UnknownSyscall(_))
    }
}
