/*!
 * Guest ABI Limits and Constants
 *
 * Centralized location for the numeric values the bridge shares with the
 * guest kernel ABI (32-bit ARM EABI Linux).
 * - Linux-compatible values are marked with [LINUX-COMPAT]
 */

// =============================================================================
// DESCRIPTORS
// =============================================================================

/// First descriptor handed out by the table (0, 1, 2 are stdio)
pub const FIRST_VIRTUAL_FD: i32 = 3;

/// Guest stdout
pub const STDOUT_FD: i32 = 1;

/// Guest stderr
pub const STDERR_FD: i32 = 2;

/// Directory descriptor meaning "current working directory" [LINUX-COMPAT]
pub const AT_FDCWD: i32 = -100;

/// Only directory descriptor under which openat resolves relative paths,
/// always from the guest root
pub const ROOT_DIRFD: i32 = 0;

// =============================================================================
// RETURN CONVENTIONS
// =============================================================================

/// Value the guest sees for any reported failure
pub const GUEST_FAILURE: i64 = -1;

// =============================================================================
// GUEST MEMORY
// =============================================================================

/// Upper bound on a NUL-terminated string read from the guest
pub const MAX_GUEST_STRING: usize = 4096;

/// Size of one `struct iovec` entry (two 32-bit words) [LINUX-COMPAT]
pub const IOVEC_ENTRY_SIZE: u64 = 8;

/// Size of ARM EABI `struct stat64` [LINUX-COMPAT]
pub const STAT64_SIZE: usize = 104;

// =============================================================================
// FLAG BITS
// =============================================================================

/// fstatat: do not follow symlinks [LINUX-COMPAT]
pub const AT_SYMLINK_NOFOLLOW: u32 = 0x100;

/// fstatat: do not trigger automounts [LINUX-COMPAT]
pub const AT_NO_AUTOMOUNT: u32 = 0x800;

/// fcntl: get file status flags [LINUX-COMPAT]
pub const F_GETFL: u32 = 3;

/// fcntl: set file status flags [LINUX-COMPAT]
pub const F_SETFL: u32 = 4;

/// ioctl: enumerate network interfaces [LINUX-COMPAT]
pub const SIOCGIFCONF: u32 = 0x8912;

/// lseek whence values [LINUX-COMPAT]
pub const SEEK_SET: u32 = 0;
pub const SEEK_CUR: u32 = 1;
pub const SEEK_END: u32 = 2;

// =============================================================================
// KERNEL-INFO NAMESPACE
// =============================================================================

/// Prefix of the synthesized kernel-info namespace
pub const PROC_ROOT: &str = "proc";

/// Token a guest uses to refer to its own process
pub const SELF_TOKEN: &str = "self";

/// Reserved random-byte device
pub const URANDOM_PATH: &str = "/dev/urandom";
