/*!
 * Stat Marshalling
 * Host metadata encoded as the guest's `struct stat64`
 *
 * Layout (ARM EABI, little-endian, 104 bytes):
 *
 * | off | field          | off | field          |
 * |-----|----------------|-----|----------------|
 * |   0 | st_dev   u64   |  56 | st_blksize u32 |
 * |   8 | __pad0   u32   |  60 | __pad      u32 |
 * |  12 | __st_ino u32   |  64 | st_blocks  u64 |
 * |  16 | st_mode  u32   |  72 | st_atime   u32 |
 * |  20 | st_nlink u32   |  76 | atime_nsec u32 |
 * |  24 | st_uid   u32   |  80 | st_mtime   u32 |
 * |  28 | st_gid   u32   |  84 | mtime_nsec u32 |
 * |  32 | st_rdev  u64   |  88 | st_ctime   u32 |
 * |  40 | __pad3   8B    |  92 | ctime_nsec u32 |
 * |  48 | st_size  i64   |  96 | st_ino     u64 |
 */

use crate::core::limits::STAT64_SIZE;
use crate::core::types::GuestAddr;
use crate::memory::{GuestMemory, MemoryResult};
use bytes::{BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};
use std::fs::Metadata;

/// Host file metadata narrowed to what `struct stat64` carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stat64 {
    pub dev: u64,
    pub ino: u64,
    pub mode: u32,
    pub nlink: u32,
    pub uid: u32,
    pub gid: u32,
    pub rdev: u64,
    pub size: i64,
    pub blksize: u32,
    pub blocks: u64,
    pub atime: u32,
    pub mtime: u32,
    pub ctime: u32,
}

impl Stat64 {
    #[cfg(unix)]
    pub fn from_metadata(md: &Metadata) -> Self {
        use std::os::unix::fs::MetadataExt;

        Self {
            dev: md.dev(),
            ino: md.ino(),
            mode: md.mode(),
            nlink: md.nlink() as u32,
            uid: md.uid(),
            gid: md.gid(),
            rdev: md.rdev(),
            size: md.size() as i64,
            blksize: md.blksize() as u32,
            blocks: md.blocks(),
            atime: md.atime() as u32,
            mtime: md.mtime() as u32,
            ctime: md.ctime() as u32,
        }
    }

    #[cfg(not(unix))]
    pub fn from_metadata(md: &Metadata) -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};

        let secs = |t: std::io::Result<SystemTime>| {
            t.ok()
                .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                .map_or(0, |d| d.as_secs() as u32)
        };
        let mode = if md.is_dir() { 0o040755 } else { 0o100644 };

        Self {
            mode,
            nlink: 1,
            size: md.len() as i64,
            blksize: 4096,
            blocks: md.len().div_ceil(512),
            atime: secs(md.accessed()),
            mtime: secs(md.modified()),
            ctime: secs(md.modified()),
            ..Self::default()
        }
    }

    /// Encode into the guest layout; timestamps stay zero unless `write_times`
    pub fn encode(&self, write_times: bool) -> Bytes {
        let mut buf = BytesMut::with_capacity(STAT64_SIZE);
        buf.put_u64_le(self.dev);
        buf.put_u32_le(0);
        buf.put_u32_le(self.ino as u32);
        buf.put_u32_le(self.mode);
        buf.put_u32_le(self.nlink);
        buf.put_u32_le(self.uid);
        buf.put_u32_le(self.gid);
        buf.put_u64_le(self.rdev);
        buf.put_bytes(0, 8);
        buf.put_i64_le(self.size);
        buf.put_u32_le(self.blksize);
        buf.put_u32_le(0);
        buf.put_u64_le(self.blocks);

        let (atime, mtime, ctime) = if write_times {
            (self.atime, self.mtime, self.ctime)
        } else {
            (0, 0, 0)
        };
        for secs in [atime, mtime, ctime] {
            buf.put_u32_le(secs);
            buf.put_u32_le(0);
        }

        buf.put_u64_le(self.ino);
        debug_assert_eq!(buf.len(), STAT64_SIZE);
        buf.freeze()
    }

    /// Marshal into guest memory at `address`
    pub fn write_to(
        &self,
        mem: &mut dyn GuestMemory,
        address: GuestAddr,
        write_times: bool,
    ) -> MemoryResult<()> {
        mem.write_bytes(address, &self.encode(write_times))
    }
}
