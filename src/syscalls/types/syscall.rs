/*!
 * Syscall Enum
 * Serviced syscall numbers and their decoded arguments
 */

use crate::core::types::{arg_addr, arg_i32, arg_u32, Fd, GuestAddr, RawArgs};
use serde::{Deserialize, Serialize};

/// ARM EABI syscall numbers serviced by the bridge
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyscallNumber {
    Read = 0x03,
    Write = 0x04,
    Open = 0x05,
    Close = 0x06,
    Unlink = 0x0A,
    Lseek = 0x13,
    Access = 0x21,
    Mkdir = 0x27,
    Ioctl = 0x36,
    Fcntl = 0x37,
    Writev = 0x92,
    Fstat64 = 0xC5,
    Fcntl64 = 0xDD,
    Statfs64 = 0x10A,
    OpenAt = 0x142,
    FstatAt64 = 0x147,
    ReadlinkAt = 0x14C,
}

impl SyscallNumber {
    pub const ALL: [SyscallNumber; 17] = [
        Self::Read,
        Self::Write,
        Self::Open,
        Self::Close,
        Self::Unlink,
        Self::Lseek,
        Self::Access,
        Self::Mkdir,
        Self::Ioctl,
        Self::Fcntl,
        Self::Writev,
        Self::Fstat64,
        Self::Fcntl64,
        Self::Statfs64,
        Self::OpenAt,
        Self::FstatAt64,
        Self::ReadlinkAt,
    ];

    #[inline]
    pub const fn raw(self) -> u32 {
        self as u32
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Open => "open",
            Self::Close => "close",
            Self::Unlink => "unlink",
            Self::Lseek => "lseek",
            Self::Access => "access",
            Self::Mkdir => "mkdir",
            Self::Ioctl => "ioctl",
            Self::Fcntl => "fcntl",
            Self::Writev => "writev",
            Self::Fstat64 => "fstat64",
            Self::Fcntl64 => "fcntl64",
            Self::Statfs64 => "statfs64",
            Self::OpenAt => "openat",
            Self::FstatAt64 => "fstatat64",
            Self::ReadlinkAt => "readlinkat",
        }
    }

    /// Number of registers the trap layer must fetch
    pub const fn arg_count(self) -> usize {
        match self {
            Self::Close | Self::Unlink => 1,
            Self::Access | Self::Mkdir | Self::Fstat64 => 2,
            Self::Read | Self::Write | Self::Open | Self::Lseek | Self::Writev | Self::Statfs64 => 3,
            Self::OpenAt | Self::FstatAt64 | Self::ReadlinkAt => 4,
            Self::Ioctl | Self::Fcntl | Self::Fcntl64 => 6,
        }
    }
}

impl TryFrom<u32> for SyscallNumber {
    type Error = u32;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .iter()
            .copied()
            .find(|number| number.raw() == raw)
            .ok_or(raw)
    }
}

/// Decoded syscall with typed arguments
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "syscall")]
#[non_exhaustive]
pub enum Syscall {
    // ========================================================================
    // Descriptor I/O
    // ========================================================================
    Read {
        fd: Fd,
        buf: GuestAddr,
        count: u32,
    },

    Write {
        fd: Fd,
        buf: GuestAddr,
        count: u32,
    },

    Writev {
        fd: Fd,
        iov: GuestAddr,
        iovcnt: u32,
    },

    Open {
        path: GuestAddr,
        flags: u32,
        mode: u32,
    },

    OpenAt {
        dirfd: Fd,
        path: GuestAddr,
        flags: u32,
        mode: u32,
    },

    Close {
        fd: Fd,
    },

    /// Offset is a 32-bit `off_t` on this ABI
    Lseek {
        fd: Fd,
        offset: i64,
        whence: u32,
    },

    // ========================================================================
    // Path Operations
    // ========================================================================
    Unlink {
        path: GuestAddr,
    },

    Access {
        path: GuestAddr,
        mode: u32,
    },

    Mkdir {
        path: GuestAddr,
        mode: u32,
    },

    Fstat64 {
        fd: Fd,
        buf: GuestAddr,
    },

    FstatAt64 {
        dirfd: Fd,
        path: GuestAddr,
        buf: GuestAddr,
        flags: u32,
    },

    Statfs64 {
        path: GuestAddr,
        size: u32,
        buf: GuestAddr,
    },

    ReadlinkAt {
        dirfd: Fd,
        path: GuestAddr,
        buf: GuestAddr,
        bufsz: u32,
    },

    // ========================================================================
    // Descriptor Control
    // ========================================================================
    Ioctl {
        fd: Fd,
        request: u32,
        arg: GuestAddr,
    },

    /// Both `fcntl` and `fcntl64`
    Fcntl {
        fd: Fd,
        cmd: u32,
        arg: u32,
    },
}

impl Syscall {
    /// Decode raw guest registers for `number`
    pub fn decode(number: SyscallNumber, args: &RawArgs) -> Self {
        use SyscallNumber as N;

        match number {
            N::Read => Self::Read {
                fd: arg_i32(args[0]),
                buf: arg_addr(args[1]),
                count: arg_u32(args[2]),
            },
            N::Write => Self::Write {
                fd: arg_i32(args[0]),
                buf: arg_addr(args[1]),
                count: arg_u32(args[2]),
            },
            N::Writev => Self::Writev {
                fd: arg_i32(args[0]),
                iov: arg_addr(args[1]),
                iovcnt: arg_u32(args[2]),
            },
            N::Open => Self::Open {
                path: arg_addr(args[0]),
                flags: arg_u32(args[1]),
                mode: arg_u32(args[2]),
            },
            N::OpenAt => Self::OpenAt {
                dirfd: arg_i32(args[0]),
                path: arg_addr(args[1]),
                flags: arg_u32(args[2]),
                mode: arg_u32(args[3]),
            },
            N::Close => Self::Close {
                fd: arg_i32(args[0]),
            },
            N::Lseek => Self::Lseek {
                fd: arg_i32(args[0]),
                offset: i64::from(arg_i32(args[1])),
                whence: arg_u32(args[2]),
            },
            N::Unlink => Self::Unlink {
                path: arg_addr(args[0]),
            },
            N::Access => Self::Access {
                path: arg_addr(args[0]),
                mode: arg_u32(args[1]),
            },
            N::Mkdir => Self::Mkdir {
                path: arg_addr(args[0]),
                mode: arg_u32(args[1]),
            },
            N::Fstat64 => Self::Fstat64 {
                fd: arg_i32(args[0]),
                buf: arg_addr(args[1]),
            },
            N::FstatAt64 => Self::FstatAt64 {
                dirfd: arg_i32(args[0]),
                path: arg_addr(args[1]),
                buf: arg_addr(args[2]),
                flags: arg_u32(args[3]),
            },
            N::Statfs64 => Self::Statfs64 {
                path: arg_addr(args[0]),
                size: arg_u32(args[1]),
                buf: arg_addr(args[2]),
            },
            N::ReadlinkAt => Self::ReadlinkAt {
                dirfd: arg_i32(args[0]),
                path: arg_addr(args[1]),
                buf: arg_addr(args[2]),
                bufsz: arg_u32(args[3]),
            },
            N::Ioctl => Self::Ioctl {
                fd: arg_i32(args[0]),
                request: arg_u32(args[1]),
                arg: arg_addr(args[2]),
            },
            N::Fcntl | N::Fcntl64 => Self::Fcntl {
                fd: arg_i32(args[0]),
                cmd: arg_u32(args[1]),
                arg: arg_u32(args[2]),
            },
        }
    }

    /// Syscall name for logging
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Read { .. } => "read",
            Self::Write { .. } => "write",
            Self::Writev { .. } => "writev",
            Self::Open { .. } => "open",
            Self::OpenAt { .. } => "openat",
            Self::Close { .. } => "close",
            Self::Lseek { .. } => "lseek",
            Self::Unlink { .. } => "unlink",
            Self::Access { .. } => "access",
            Self::Mkdir { .. } => "mkdir",
            Self::Fstat64 { .. } => "fstat64",
            Self::FstatAt64 { .. } => "fstatat64",
            Self::Statfs64 { .. } => "statfs64",
            Self::ReadlinkAt { .. } => "readlinkat",
            Self::Ioctl { .. } => "ioctl",
            Self::Fcntl { .. } => "fcntl",
        }
    }
}
