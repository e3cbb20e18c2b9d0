/*!
 * Guest VFS - Probe Entry Point
 *
 * Runs a guest path through the bridge the way an emulated process would:
 * - open the file inside the confinement root
 * - stat it into a guest buffer
 * - read the first bytes back out of guest memory
 *
 * Usage: guest-vfs <guest-path> [config.json]
 */

use std::error::Error;
use tracing::{info, warn};

use guest_vfs::core::limits::STAT64_SIZE;
use guest_vfs::{
    init_tracing, BridgeConfig, FlatMemory, GuestMemory, MappedRegion, Protection, RegionMap,
    Session, SyscallExecutor, SyscallNumber,
};
use std::path::Path;
use std::sync::Arc;

const GUEST_BASE: u64 = 0x1000_0000;
const GUEST_SIZE: usize = 64 * 1024;
const PATH_ADDR: u64 = GUEST_BASE;
const STAT_ADDR: u64 = GUEST_BASE + 0x1000;
const READ_ADDR: u64 = GUEST_BASE + 0x2000;
const READ_LEN: u32 = 256;
const PROBE_PID: u32 = 4242;

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let mut args = std::env::args().skip(1);
    let Some(guest_path) = args.next() else {
        eprintln!("usage: guest-vfs <guest-path> [config.json]");
        std::process::exit(2);
    };

    let config = match args.next() {
        Some(path) => BridgeConfig::load(Path::new(&path))?,
        None => BridgeConfig::from_env()?,
    };
    info!(root = %config.root_dir.display(), package = %config.package_name, "Guest VFS probe starting");

    std::fs::create_dir_all(&config.root_dir)?;

    let maps = Arc::new(RegionMap::new());
    maps.map(
        MappedRegion::new(GUEST_BASE, GUEST_BASE + GUEST_SIZE as u64, Protection::read_write())
            .named("[probe]"),
    );
    let session = Session::with_maps(PROBE_PID, maps);
    let mut executor = SyscallExecutor::new(config, session);
    let mut mem = FlatMemory::new(GUEST_BASE, GUEST_SIZE);

    mem.write_cstring(PATH_ADDR, &guest_path)?;

    let fd = executor.dispatch_number(&mut mem, SyscallNumber::Open, &[PATH_ADDR, 0, 0, 0, 0, 0])?;
    if fd < 0 {
        warn!(path = %guest_path, "open failed inside the guest root");
        println!("open({}) = {}", guest_path, fd);
        return Ok(());
    }
    println!("open({}) = {}", guest_path, fd);

    let fd_arg = fd as u64;
    let ret = executor.dispatch_number(&mut mem, SyscallNumber::Fstat64, &[fd_arg, STAT_ADDR, 0, 0, 0, 0])?;
    println!("fstat64({}) = {}", fd, ret);
    if ret == 0 {
        let raw = mem.read_bytes(STAT_ADDR, STAT64_SIZE)?;
        let size = i64::from_le_bytes(raw[48..56].try_into()?);
        let mode = u32::from_le_bytes(raw[16..20].try_into()?);
        println!("  st_mode=0o{:o} st_size={}", mode, size);
    }

    let n = executor.dispatch_number(
        &mut mem,
        SyscallNumber::Read,
        &[fd_arg, READ_ADDR, u64::from(READ_LEN), 0, 0, 0],
    )?;
    println!("read({}, {}) = {}", fd, READ_LEN, n);
    if n > 0 {
        let data = mem.read_bytes(READ_ADDR, n as usize)?;
        println!("{}", String::from_utf8_lossy(&data));
    }

    let ret = executor.dispatch_number(&mut mem, SyscallNumber::Close, &[fd_arg, 0, 0, 0, 0, 0])?;
    println!("close({}) = {}", fd, ret);

    info!("Guest VFS probe finished");
    Ok(())
}
