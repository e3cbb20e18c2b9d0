/*!
 * Descriptor Control Tests
 * readlinkat, ioctl and fcntl
 */

use crate::support::*;
use guest_vfs::core::limits::{F_GETFL, F_SETFL, SIOCGIFCONF};
use guest_vfs::{GuestMemory, SyscallError, SyscallNumber};
use pretty_assertions::assert_eq;

const NAME: &str = "/data/app/base.apk";

fn readlink(h: &mut Harness, link: &str, bufsz: u64) -> Result<i64, SyscallError> {
    let path = h.path(link);
    h.call(SyscallNumber::ReadlinkAt, &[at_fdcwd(), path, BUF, bufsz])
}

#[test]
fn test_readlinkat_returns_guest_name() {
    let mut h = Harness::new();
    h.put_file(NAME, b"PK");
    let fd = h.open(NAME);

    assert_eq!(readlink(&mut h, &format!("/proc/self/fd/{}", fd), 64), Ok(0));
    let raw = h.mem.read_bytes(BUF, NAME.len() + 1).unwrap();
    assert_eq!(&raw[..NAME.len()], NAME.as_bytes());
    assert_eq!(raw[NAME.len()], 0);
}

#[test]
fn test_readlinkat_own_pid_form() {
    let mut h = Harness::new();
    h.put_file(NAME, b"PK");
    let fd = h.open(NAME);

    let link = format!("/proc/{}/fd/{}", PID, fd);
    assert_eq!(readlink(&mut h, &link, 64), Ok(0));
    assert_eq!(h.mem.read_cstring(BUF).unwrap(), NAME);
}

#[test]
fn test_readlinkat_exact_fit_has_no_terminator() {
    let mut h = Harness::new();
    h.put_file(NAME, b"PK");
    let fd = h.open(NAME);
    h.mem.write_bytes(BUF, &[0xAA; 64]).unwrap();

    let link = format!("/proc/self/fd/{}", fd);
    assert_eq!(readlink(&mut h, &link, NAME.len() as u64), Ok(0));
    let raw = h.mem.read_bytes(BUF, NAME.len() + 1).unwrap();
    assert_eq!(&raw[..NAME.len()], NAME.as_bytes());
    assert_eq!(raw[NAME.len()], 0xAA);
}

#[test]
fn test_readlinkat_short_buffer_is_fatal() {
    let mut h = Harness::new();
    h.put_file(NAME, b"PK");
    let fd = h.open(NAME);

    let link = format!("/proc/self/fd/{}", fd);
    let result = readlink(&mut h, &link, NAME.len() as u64 - 1);
    assert_eq!(
        result,
        Err(SyscallError::BufferOverflow {
            syscall: "readlinkat".to_string(),
            needed: NAME.len(),
            capacity: NAME.len() - 1,
        })
    );
}

#[test]
fn test_readlinkat_unknown_descriptor() {
    let mut h = Harness::new();
    assert_eq!(readlink(&mut h, "/proc/self/fd/9", 64), Ok(-1));
}

#[test]
fn test_readlinkat_other_links_unimplemented() {
    let mut h = Harness::new();
    let result = readlink(&mut h, "/system/bin/sh", 64);
    assert!(matches!(result, Err(SyscallError::Unimplemented { .. })));

    let result = readlink(&mut h, "/proc/self/exe", 64);
    assert!(matches!(result, Err(SyscallError::Unimplemented { .. })));
}

#[test]
fn test_ioctl_interface_listing_fails_softly() {
    let mut h = Harness::new();
    let ret = h.call(SyscallNumber::Ioctl, &[3, u64::from(SIOCGIFCONF), BUF]);
    assert_eq!(ret, Ok(-1));

    let other = h.call(SyscallNumber::Ioctl, &[1, 0x5401, BUF]);
    assert!(matches!(other, Err(SyscallError::Unimplemented { .. })));
}

#[cfg(unix)]
#[test]
fn test_fcntl_unsupported_command() {
    let mut h = Harness::new();
    // F_GETFD
    let result = h.call(SyscallNumber::Fcntl, &[0, 1, 0]);
    assert!(matches!(result, Err(SyscallError::Unimplemented { .. })));
}

#[cfg(unix)]
#[test]
fn test_fcntl_unknown_descriptor() {
    let mut h = Harness::new();
    assert_eq!(h.call(SyscallNumber::Fcntl64, &[12, u64::from(F_GETFL), 0]), Ok(-1));
}

#[test]
fn test_fcntl_setfl_on_stdio_is_ignored() {
    let mut h = Harness::new();
    assert_eq!(h.call(SyscallNumber::Fcntl, &[1, u64::from(F_SETFL), 0o4000]), Ok(0));
}

#[cfg(target_os = "linux")]
#[test]
fn test_fcntl_reads_host_flags() {
    const O_ACCMODE: i64 = 0o3;
    const O_RDWR: i64 = 0o2;
    const O_NONBLOCK: u64 = 0o4000;

    let mut h = Harness::new();
    h.put_file("/data/f", b"flags");
    let fd = h.open("/data/f") as u64;

    let flags = h.call(SyscallNumber::Fcntl64, &[fd, u64::from(F_GETFL), 0]).unwrap();
    assert_eq!(flags & O_ACCMODE, O_RDWR);

    assert_eq!(h.call(SyscallNumber::Fcntl, &[fd, u64::from(F_SETFL), O_NONBLOCK]), Ok(0));
    let flags = h.call(SyscallNumber::Fcntl, &[fd, u64::from(F_GETFL), 0]).unwrap();
    assert_ne!(flags as u64 & O_NONBLOCK, 0);
}

#[cfg(not(unix))]
#[test]
fn test_fcntl_is_noop_without_host_flags() {
    let mut h = Harness::new();
    // F_GETFD, normally an emulation gap
    assert_eq!(h.call(SyscallNumber::Fcntl, &[0, 1, 0]), Ok(0));
    assert_eq!(h.call(SyscallNumber::Fcntl64, &[12, u64::from(F_GETFL), 0]), Ok(0));
    assert_eq!(h.call(SyscallNumber::Fcntl, &[3, u64::from(F_SETFL), 0]), Ok(0));
}
