/*!
 * Guest Paths
 * Structured guest paths and their confinement beneath the host root
 */

use crate::core::limits::{PROC_ROOT, SELF_TOKEN};
use crate::core::types::{Fd, Pid};
use path_clean::PathClean;
use std::fmt;
use std::path::{Path, PathBuf};

/// A POSIX path as supplied by the guest
///
/// Kept as components so self-pid normalization only ever rewrites the
/// process component of `/proc/<pid>/...`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GuestPath {
    absolute: bool,
    components: Vec<String>,
}

impl GuestPath {
    pub fn parse(raw: &str) -> Self {
        Self {
            absolute: raw.starts_with('/'),
            components: raw
                .split('/')
                .filter(|c| !c.is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }

    #[inline]
    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    pub fn components(&self) -> &[String] {
        &self.components
    }

    /// Whether the path lies in the synthesized kernel-info namespace
    pub fn is_proc(&self) -> bool {
        self.absolute && self.components.first().map(String::as_str) == Some(PROC_ROOT)
    }

    /// Rewrite `/proc/<pid>/...` to `/proc/self/...` for the guest's own pid
    pub fn with_self_pid(&self, pid: Pid) -> Self {
        let mut normalized = self.clone();
        if self.is_proc() {
            if let Some(process) = normalized.components.get_mut(1) {
                if *process == pid.to_string() {
                    *process = SELF_TOKEN.to_owned();
                }
            }
        }
        normalized
    }

    /// Compare against a literal absolute path such as `/proc/self/maps`
    pub fn is(&self, literal: &str) -> bool {
        *self == Self::parse(literal)
    }

    /// Descriptor number of a `/proc/self/fd/<n>` path
    pub fn fd_number(&self) -> Option<Fd> {
        match self.components.as_slice() {
            [proc_root, this, fd_dir, n]
                if self.absolute
                    && proc_root == PROC_ROOT
                    && this == SELF_TOKEN
                    && fd_dir == "fd" =>
            {
                n.parse().ok()
            }
            _ => None,
        }
    }
}

impl fmt::Display for GuestPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.absolute {
            f.write_str("/")?;
        }
        f.write_str(&self.components.join("/"))
    }
}

/// Host directory every guest path is confined to
#[derive(Debug, Clone)]
pub struct RootDir {
    root: PathBuf,
}

impl RootDir {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Map a guest path to its host path beneath the root
    ///
    /// Relative paths are taken from the guest root. The path is cleaned
    /// lexically first, so `..` stops at the root instead of escaping it.
    pub fn translate(&self, path: &GuestPath) -> PathBuf {
        let mut rooted = PathBuf::from("/");
        rooted.extend(path.components());
        let cleaned = rooted.clean();

        match cleaned.strip_prefix("/") {
            Ok(relative) if !relative.as_os_str().is_empty() => self.root.join(relative),
            _ => self.root.clone(),
        }
    }
}
