/*!
 * Path Syscall Tests
 * mkdir/unlink/access and the stat family
 */

use crate::support::*;
use guest_vfs::core::limits::{AT_NO_AUTOMOUNT, AT_SYMLINK_NOFOLLOW, STAT64_SIZE};
use guest_vfs::{GuestMemory, SyscallError, SyscallNumber};
use pretty_assertions::assert_eq;
use std::fs;

fn stat_buffer(h: &Harness) -> Vec<u8> {
    h.mem.read_bytes(STAT, STAT64_SIZE).unwrap()
}

#[test]
fn test_mkdir_is_idempotent() {
    let mut h = Harness::new();
    let path = h.path("/data/local/tmp");

    assert_eq!(h.call(SyscallNumber::Mkdir, &[path, 0o755]), Ok(0));
    assert!(h.root().join("data/local/tmp").is_dir());
    assert_eq!(h.call(SyscallNumber::Mkdir, &[path, 0o755]), Ok(0));
    assert!(h.root().join("data/local/tmp").is_dir());
}

#[test]
fn test_mkdir_over_existing_file_still_succeeds() {
    let mut h = Harness::new();
    h.put_file("/data/file", b"x");
    let path = h.path("/data/file");

    assert_eq!(h.call(SyscallNumber::Mkdir, &[path, 0o700]), Ok(0));
    assert!(h.root().join("data/file").is_file());
}

#[test]
fn test_unlink_keeps_host_file() {
    let mut h = Harness::new();
    let host = h.put_file("/data/victim.txt", b"still here");
    let path = h.path("/data/victim.txt");

    assert_eq!(h.call(SyscallNumber::Unlink, &[path]), Ok(0));
    assert_eq!(fs::read(host).unwrap(), b"still here");
}

#[test]
fn test_access_always_granted() {
    let mut h = Harness::new();
    let path = h.path("/does/not/exist");
    assert_eq!(h.call(SyscallNumber::Access, &[path, 4]), Ok(0));
}

#[test]
fn test_fstat64_reports_size() {
    let mut h = Harness::new();
    h.put_file("/data/blob.bin", &[7u8; 1500]);
    let fd = h.open("/data/blob.bin") as u64;

    assert_eq!(h.call(SyscallNumber::Fstat64, &[fd, STAT]), Ok(0));
    let raw = stat_buffer(&h);
    assert_eq!(i64_at(&raw, 48), 1500);

    #[cfg(unix)]
    assert_eq!(u32_at(&raw, 16) & 0o170000, 0o100000);
}

#[test]
fn test_fstat64_unknown_descriptor() {
    let mut h = Harness::new();
    assert_eq!(h.call(SyscallNumber::Fstat64, &[17, STAT]), Ok(-1));
    assert!(stat_buffer(&h).iter().all(|&b| b == 0));
}

#[test]
fn test_fstatat64_size_matches_file() {
    let mut h = Harness::new();
    h.put_file("/system/lib/libc.so", &[0u8; 4096 + 12]);
    let path = h.path("/system/lib/libc.so");

    let ret = h.call(SyscallNumber::FstatAt64, &[at_fdcwd(), path, STAT, 0]);
    assert_eq!(ret, Ok(0));
    assert_eq!(i64_at(&stat_buffer(&h), 48), 4108);
}

#[test]
fn test_fstatat64_times_suppressed() {
    let mut h = Harness::with_stat_times(false);
    h.put_file("/data/t.txt", b"timestamps");
    let path = h.path("/data/t.txt");

    assert_eq!(h.call(SyscallNumber::FstatAt64, &[at_fdcwd(), path, STAT, 0]), Ok(0));
    let raw = stat_buffer(&h);
    assert!(raw[72..96].iter().all(|&b| b == 0));
    assert_eq!(i64_at(&raw, 48), 10);
}

#[test]
fn test_fstatat64_times_written() {
    let mut h = Harness::with_stat_times(true);
    h.put_file("/data/t.txt", b"timestamps");
    let path = h.path("/data/t.txt");

    assert_eq!(h.call(SyscallNumber::FstatAt64, &[at_fdcwd(), path, STAT, 0]), Ok(0));
    assert_ne!(u32_at(&stat_buffer(&h), 80), 0);
}

#[test]
fn test_fstatat64_accepts_symlink_and_automount_flags() {
    let mut h = Harness::new();
    h.put_file("/a", b"a");
    let path = h.path("/a");
    let flags = u64::from(AT_SYMLINK_NOFOLLOW | AT_NO_AUTOMOUNT);

    assert_eq!(h.call(SyscallNumber::FstatAt64, &[at_fdcwd(), path, STAT, flags]), Ok(0));
}

#[test]
fn test_fstatat64_emulation_gaps() {
    let mut h = Harness::new();
    h.put_file("/a", b"a");

    let path = h.path("a");
    let relative = h.call(SyscallNumber::FstatAt64, &[at_fdcwd(), path, STAT, 0]);
    assert!(matches!(relative, Err(SyscallError::Unimplemented { .. })));

    let path = h.path("/a");
    let flags = h.call(SyscallNumber::FstatAt64, &[at_fdcwd(), path, STAT, 0x1000]);
    assert!(matches!(flags, Err(SyscallError::Unimplemented { .. })));
}

#[test]
fn test_fstatat64_missing_path() {
    let mut h = Harness::new();
    let path = h.path("/nope");
    assert_eq!(h.call(SyscallNumber::FstatAt64, &[at_fdcwd(), path, STAT, 0]), Ok(-1));
}

#[test]
fn test_fstatat64_normalizes_own_pid() {
    let mut h = Harness::new();
    h.put_file("/proc/self/status", b"Name:\tguest\n");
    let path = h.path(&format!("/proc/{}/status", PID));

    assert_eq!(h.call(SyscallNumber::FstatAt64, &[at_fdcwd(), path, STAT, 0]), Ok(0));
    assert_eq!(i64_at(&stat_buffer(&h), 48), 12);
}

#[test]
fn test_statfs64_reports_failure() {
    let mut h = Harness::new();
    let path = h.path("/data");
    assert_eq!(h.call(SyscallNumber::Statfs64, &[path, 84, STAT]), Ok(-1));
    assert!(stat_buffer(&h).iter().all(|&b| b == 0));
}
