/*!
 * Core Types
 * Common types used across the bridge
 */

/// Guest process ID type
pub type Pid = u32;

/// Guest-visible (virtual) file descriptor
pub type Fd = i32;

/// Guest virtual address
pub type GuestAddr = u64;

/// Raw register value handed over by the trap layer
pub type RawArg = u64;

/// Syscall arguments as fetched from guest registers (r0-r5)
pub type RawArgs = [RawArg; 6];

/// Descriptors 0, 1 and 2 are the guest's stdio and never backed by the table
#[inline]
#[must_use]
pub const fn is_stdio(fd: Fd) -> bool {
    fd >= 0 && fd <= 2
}

/// Interpret a raw register as a signed 32-bit guest integer
#[inline]
#[must_use]
pub const fn arg_i32(raw: RawArg) -> i32 {
    raw as u32 as i32
}

/// Interpret a raw register as an unsigned 32-bit guest integer
#[inline]
#[must_use]
pub const fn arg_u32(raw: RawArg) -> u32 {
    raw as u32
}

/// Interpret a raw register as a guest pointer
#[inline]
#[must_use]
pub const fn arg_addr(raw: RawArg) -> GuestAddr {
    raw as u32 as GuestAddr
}
