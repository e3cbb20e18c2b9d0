/*!
 * Kernel-Info Pseudo-Files
 * Synthesizes `/proc/self/...` content into the host root right before open
 */

use super::paths::{GuestPath, RootDir};
use crate::core::config::BridgeConfig;
use crate::process::Session;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::debug;

/// Pseudo-files with generated content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcFile {
    /// `/proc/self/maps`: the current mapped-region listing
    Maps,
    /// `/proc/self/cmdline`: the configured program name
    Cmdline,
}

impl ProcFile {
    /// Identify a self-normalized guest path
    pub fn identify(path: &GuestPath) -> Option<Self> {
        if path.is("/proc/self/maps") {
            Some(Self::Maps)
        } else if path.is("/proc/self/cmdline") {
            Some(Self::Cmdline)
        } else {
            None
        }
    }

    fn render(self, out: &mut dyn Write, session: &Session, config: &BridgeConfig) -> io::Result<()> {
        match self {
            Self::Maps => session.maps().dump_maps(out),
            Self::Cmdline => out.write_all(config.package_name.as_bytes()),
        }
    }
}

/// Prepare a kernel-info path on the host and return where it lives
///
/// `path` must already be self-normalized. The parent directory is always
/// created; recognized pseudo-files are regenerated on every call since
/// the map listing changes as the guest maps and unmaps memory.
pub fn materialize(
    root: &RootDir,
    path: &GuestPath,
    session: &Session,
    config: &BridgeConfig,
) -> io::Result<PathBuf> {
    let host_path = root.translate(path);
    if let Some(parent) = host_path.parent() {
        fs::create_dir_all(parent)?;
    }

    if let Some(kind) = ProcFile::identify(path) {
        let mut out = BufWriter::new(File::create(&host_path)?);
        kind.render(&mut out, session, config)?;
        out.flush()?;
        debug!(guest_path = %path, kind = ?kind, "pseudo-file materialized");
    }

    Ok(host_path)
}
