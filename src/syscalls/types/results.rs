/*!
 * Syscall Result Types
 * Guest-visible outcomes of a serviced syscall
 */

use crate::core::limits::GUEST_FAILURE;
use serde::{Deserialize, Serialize};

/// Outcome the guest observes as its syscall return value
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum SyscallResult {
    /// Successful operation returning `value`
    Success { value: i64 },
    /// Expected failure; the guest sees -1
    Error {
        /// Human-readable reason, for logs only
        message: String,
    },
}

impl SyscallResult {
    #[inline]
    #[must_use]
    pub const fn success(value: i64) -> Self {
        Self::Success { value }
    }

    #[inline]
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Failure for a descriptor the table does not know
    #[inline]
    #[must_use]
    pub fn bad_descriptor(fd: i32) -> Self {
        Self::error(format!("bad file descriptor {}", fd))
    }

    #[inline]
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    #[inline]
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Integer written back into the guest's return register
    #[inline]
    #[must_use]
    pub const fn guest_value(&self) -> i64 {
        match self {
            Self::Success { value } => *value,
            Self::Error { .. } => GUEST_FAILURE,
        }
    }
}
