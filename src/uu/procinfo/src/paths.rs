// This file is part of the sysmon package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use std::path::{Path, PathBuf};

pub const PROC_ROOT: &str = "/proc";
pub const ETC_ROOT: &str = "/etc";

/// Locations of every file the accessors read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemPaths {
    pub proc_root: PathBuf,
    pub os_release: PathBuf,
    pub passwd: PathBuf,
    pub version: PathBuf,
    pub meminfo: PathBuf,
    pub uptime: PathBuf,
    pub stat: PathBuf,
}

impl Default for SystemPaths {
    fn default() -> Self {
        Self::with_roots(PROC_ROOT, ETC_ROOT)
    }
}

impl SystemPaths {
    /// Derive every path from a procfs root and an `/etc`-like directory.
    pub fn with_roots(proc_root: impl AsRef<Path>, etc_root: impl AsRef<Path>) -> Self {
        let proc_root = proc_root.as_ref();
        let etc_root = etc_root.as_ref();

        Self {
            proc_root: proc_root.to_path_buf(),
            os_release: etc_root.join("os-release"),
            passwd: etc_root.join("passwd"),
            version: proc_root.join("version"),
            meminfo: proc_root.join("meminfo"),
            uptime: proc_root.join("uptime"),
            stat: proc_root.join("stat"),
        }
    }

    /// `<proc_root>/<pid>/<file>`
    pub fn pid_file(&self, pid: usize, file: &str) -> PathBuf {
        self.proc_root.join(pid.to_string()).join(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let paths = SystemPaths::default();
        assert_eq!(paths.proc_root, PathBuf::from("/proc"));
        assert_eq!(paths.os_release, PathBuf::from("/etc/os-release"));
        assert_eq!(paths.passwd, PathBuf::from("/etc/passwd"));
        assert_eq!(paths.version, PathBuf::from("/proc/version"));
        assert_eq!(paths.meminfo, PathBuf::from("/proc/meminfo"));
        assert_eq!(paths.uptime, PathBuf::from("/proc/uptime"));
        assert_eq!(paths.stat, PathBuf::from("/proc/stat"));
    }

    #[test]
    fn test_with_roots() {
        let paths = SystemPaths::with_roots("/tmp/fake/proc", "/tmp/fake/etc");
        assert_eq!(paths.stat, PathBuf::from("/tmp/fake/proc/stat"));
        assert_eq!(paths.passwd, PathBuf::from("/tmp/fake/etc/passwd"));
        assert_eq!(
            paths.pid_file(42, "cmdline"),
            PathBuf::from("/tmp/fake/proc/42/cmdline")
        );
    }
}
