/*!
 * Shared harness for bridge integration tests
 */

#![allow(dead_code)]

use guest_vfs::core::limits::AT_FDCWD;
use guest_vfs::{
    BridgeConfig, FlatMemory, GuestMemory, RegionMap, Session, SyscallError, SyscallExecutor,
    SyscallNumber,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

pub const BASE: u64 = 0x4000_0000;
pub const PATH: u64 = BASE;
pub const BUF: u64 = BASE + 0x1000;
pub const STAT: u64 = BASE + 0x3000;
pub const IOV: u64 = BASE + 0x4000;
pub const MEM_SIZE: usize = 0x8000;
pub const PID: u32 = 1234;
pub const PACKAGE: &str = "com.example.guest";

/// Register encoding of a negative 32-bit argument
pub fn neg(value: i32) -> u64 {
    u64::from(value as u32)
}

pub fn at_fdcwd() -> u64 {
    neg(AT_FDCWD)
}

pub struct Harness {
    pub executor: SyscallExecutor,
    pub mem: FlatMemory,
    pub maps: Arc<RegionMap>,
    root: PathBuf,
    _temp: TempDir,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_stat_times(true)
    }

    pub fn with_stat_times(enabled: bool) -> Self {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("vfs");
        fs::create_dir_all(&root).unwrap();

        let config = BridgeConfig::new(&root, PACKAGE).with_stat_times(enabled);
        let maps = Arc::new(RegionMap::new());
        let session = Session::with_maps(PID, maps.clone());

        Self {
            executor: SyscallExecutor::new(config, session),
            mem: FlatMemory::new(BASE, MEM_SIZE),
            maps,
            root,
            _temp: temp,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory that contains the root, outside the confinement
    pub fn outside(&self) -> &Path {
        self.root.parent().unwrap()
    }

    /// Create a host file at the location a guest path maps to
    pub fn put_file(&self, guest_path: &str, contents: &[u8]) -> PathBuf {
        let host = self.root.join(guest_path.trim_start_matches('/'));
        fs::create_dir_all(host.parent().unwrap()).unwrap();
        fs::write(&host, contents).unwrap();
        host
    }

    /// Place a guest string at `PATH`
    pub fn path(&mut self, guest_path: &str) -> u64 {
        self.mem.write_cstring(PATH, guest_path).unwrap();
        PATH
    }

    pub fn call(&mut self, number: SyscallNumber, args: &[u64]) -> Result<i64, SyscallError> {
        self.call_raw(number.raw(), args)
    }

    pub fn call_raw(&mut self, number: u32, args: &[u64]) -> Result<i64, SyscallError> {
        let mut regs = [0u64; 6];
        regs[..args.len()].copy_from_slice(args);
        self.executor.dispatch(&mut self.mem, number, &regs)
    }

    pub fn open(&mut self, guest_path: &str) -> i64 {
        let path = self.path(guest_path);
        self.call(SyscallNumber::Open, &[path, 0, 0]).unwrap()
    }

    pub fn read(&mut self, fd: i64, count: u32) -> Vec<u8> {
        let n = self
            .call(SyscallNumber::Read, &[fd as u64, BUF, u64::from(count)])
            .unwrap();
        assert!(n >= 0, "read failed: {}", n);
        self.mem.read_bytes(BUF, n as usize).unwrap()
    }

    pub fn open_count(&self) -> usize {
        self.executor.session().descriptors().len()
    }
}

pub fn u32_at(raw: &[u8], off: usize) -> u32 {
    u32::from_le_bytes(raw[off..off + 4].try_into().unwrap())
}

pub fn i64_at(raw: &[u8], off: usize) -> i64 {
    i64::from_le_bytes(raw[off..off + 8].try_into().unwrap())
}
