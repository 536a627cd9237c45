// This file is part of the sysmon package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

//! Per-process accessors

use crate::error::{ProcError, ProcResult};
use crate::parser::{first_token, nth_token, parse_proc_file, read, stat_split};
use crate::passwd::UserTable;
use crate::paths::SystemPaths;
use crate::system::uptime_precise;
use bytesize::{ByteSize, MIB};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;

/// Clock ticks per second (`_SC_CLK_TCK`), the unit of every jiffy counter.
pub fn clock_ticks() -> u64 {
    rustix::param::clock_ticks_per_second()
}

/// Lazily parsed view of `<proc_root>/<pid>`
///
/// Each file is read the first time one of its fields is requested and kept
/// for the lifetime of the value.
///
/// - [The /proc Filesystem](https://docs.kernel.org/filesystems/proc.html#process-specific-subdirectories)
#[derive(Debug, Clone, Default)]
pub struct ProcessInformation {
    pub pid: usize,
    dir: PathBuf,

    /// Processed `/proc/<pid>/status` file
    status: OnceLock<HashMap<String, String>>,
    /// Processed `/proc/<pid>/stat` file
    stat: OnceLock<Vec<String>>,
}

impl ProcessInformation {
    pub fn new(proc_root: &Path, pid: usize) -> Self {
        Self {
            pid,
            dir: proc_root.join(pid.to_string()),
            ..Default::default()
        }
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    fn status(&self) -> ProcResult<&HashMap<String, String>> {
        if let Some(status) = self.status.get() {
            return Ok(status);
        }

        let content = read(&self.path("status"))?;
        Ok(self.status.get_or_init(|| parse_proc_file(&content)))
    }

    fn stat(&self) -> ProcResult<&Vec<String>> {
        if let Some(stat) = self.stat.get() {
            return Ok(stat);
        }

        let content = read(&self.path("stat"))?;
        Ok(self.stat.get_or_init(|| stat_split(&content)))
    }

    /// Field `index` of the stat line, counting from 0 (proc(5) number minus one).
    fn get_numeric_stat_field<T: FromStr>(&self, index: usize, name: &str) -> ProcResult<T> {
        let path = self.path("stat");
        let value = self
            .stat()?
            .get(index)
            .ok_or_else(|| ProcError::missing(&path, name))?;

        value
            .parse::<T>()
            .map_err(|_| ProcError::invalid(&path, name, value.as_str()))
    }

    /// Command line with NUL separators turned into spaces
    pub fn command(&self) -> ProcResult<String> {
        Ok(read(&self.path("cmdline"))?
            .replace('\0', " ")
            .trim_end()
            .into())
    }

    /// Real uid, the first value of the `Uid:` line
    pub fn uid(&self) -> ProcResult<u32> {
        nth_token(self.status()?, "Uid", 0, &self.path("status"))
    }

    /// Resident set size in kB
    pub fn ram_kib(&self) -> ProcResult<u64> {
        first_token(self.status()?, "VmRSS", &self.path("status"))
    }

    /// Resident set size in MiB, three decimals
    pub fn ram(&self) -> ProcResult<String> {
        let bytes = ByteSize::kib(self.ram_kib()?).as_u64();
        Ok(format!("{:.3}", bytes as f64 / MIB as f64))
    }

    /// Clock ticks after boot at which the process started (field 22)
    pub fn start_time(&self) -> ProcResult<u64> {
        self.get_numeric_stat_field(21, "starttime")
    }

    /// `utime + stime + cutime + cstime` (fields 14 to 17), in clock ticks
    ///
    /// The children's times are signed; negative values count as 0.
    pub fn active_jiffies(&self) -> ProcResult<u64> {
        let utime: u64 = self.get_numeric_stat_field(13, "utime")?;
        let stime: u64 = self.get_numeric_stat_field(14, "stime")?;
        let cutime: i64 = self.get_numeric_stat_field(15, "cutime")?;
        let cstime: i64 = self.get_numeric_stat_field(16, "cstime")?;

        Ok([stime, cutime.max(0) as u64, cstime.max(0) as u64]
            .into_iter()
            .fold(utime, u64::saturating_add))
    }

    /// Seconds the process has been alive, given the system uptime.
    pub fn uptime(&self, system_uptime: f64, hertz: u64) -> ProcResult<f64> {
        let started = self.start_time()? as f64 / hertz.max(1) as f64;
        Ok((system_uptime - started).max(0.0))
    }

    /// Average busy fraction of one CPU over the lifetime of the process.
    pub fn cpu_utilization(&self, system_uptime: f64, hertz: u64) -> ProcResult<f32> {
        let hertz = hertz.max(1) as f64;
        let busy = self.active_jiffies()? as f64 / hertz;
        let elapsed = system_uptime - self.start_time()? as f64 / hertz;

        if elapsed <= 0.0 {
            return Ok(0.0);
        }

        Ok((busy / elapsed) as f32)
    }
}

pub fn command(pid: usize, proc_root: &Path) -> ProcResult<String> {
    ProcessInformation::new(proc_root, pid).command()
}

pub fn uid(pid: usize, proc_root: &Path) -> ProcResult<u32> {
    ProcessInformation::new(proc_root, pid).uid()
}

/// Name of the user owning `pid`, resolved through the passwd file.
pub fn user(pid: usize, proc_root: &Path, passwd: &Path) -> ProcResult<String> {
    crate::passwd::user_name(uid(pid, proc_root)?, passwd)
}

pub fn start_time(pid: usize, proc_root: &Path) -> ProcResult<u64> {
    ProcessInformation::new(proc_root, pid).start_time()
}

pub fn ram(pid: usize, proc_root: &Path) -> ProcResult<String> {
    ProcessInformation::new(proc_root, pid).ram()
}

pub fn ram_kib(pid: usize, proc_root: &Path) -> ProcResult<u64> {
    ProcessInformation::new(proc_root, pid).ram_kib()
}

pub fn active_jiffies_for(pid: usize, proc_root: &Path) -> ProcResult<u64> {
    ProcessInformation::new(proc_root, pid).active_jiffies()
}

/// Whole seconds `pid` has been running.
pub fn process_uptime(
    pid: usize,
    proc_root: &Path,
    uptime_path: &Path,
    hertz: u64,
) -> ProcResult<u64> {
    let (system_uptime, _) = uptime_precise(uptime_path)?;
    ProcessInformation::new(proc_root, pid)
        .uptime(system_uptime, hertz)
        .map(|seconds| seconds as u64)
}

pub fn process_cpu_utilization(
    pid: usize,
    proc_root: &Path,
    uptime_path: &Path,
    hertz: u64,
) -> ProcResult<f32> {
    let (system_uptime, _) = uptime_precise(uptime_path)?;
    ProcessInformation::new(proc_root, pid).cpu_utilization(system_uptime, hertz)
}

/// One `PID <pid>: <percent>` line per pid, percent truncated to an integer.
///
/// A pid whose files cannot be read reports `0`.
pub fn cpu_utilization(
    pids: &[usize],
    proc_root: &Path,
    uptime_path: &Path,
    hertz: u64,
) -> ProcResult<Vec<String>> {
    let (system_uptime, _) = uptime_precise(uptime_path)?;

    Ok(pids
        .iter()
        .map(|&pid| {
            let utilization = ProcessInformation::new(proc_root, pid)
                .cpu_utilization(system_uptime, hertz)
                .unwrap_or_default();
            format!("PID {}: {}", pid, (utilization * 100.0) as u64)
        })
        .collect())
}

/// One row of the process table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Process {
    pub pid: usize,
    pub user: String,
    pub command: String,
    /// Busy fraction of one CPU, `0.25` is 25%
    pub cpu: f32,
    /// Resident memory in MiB
    pub ram: String,
    /// Seconds since the process started
    pub uptime: u64,
}

impl Process {
    /// Read every attribute of `pid`; anything unreadable falls back to its default.
    pub fn collect(pid: usize, paths: &SystemPaths, hertz: u64) -> Self {
        let users = UserTable::load(&paths.passwd).unwrap_or_default();
        let (system_uptime, _) = uptime_precise(&paths.uptime).unwrap_or_default();

        Self::collect_with(pid, &paths.proc_root, &users, system_uptime, hertz)
    }

    /// Same as [Process::collect] with the passwd table and uptime already loaded.
    pub fn collect_with(
        pid: usize,
        proc_root: &Path,
        users: &UserTable,
        system_uptime: f64,
        hertz: u64,
    ) -> Self {
        let info = ProcessInformation::new(proc_root, pid);

        Self {
            pid,
            user: info
                .uid()
                .ok()
                .and_then(|uid| users.name(uid))
                .unwrap_or_default()
                .to_string(),
            command: info.command().unwrap_or_default(),
            cpu: info
                .cpu_utilization(system_uptime, hertz)
                .unwrap_or_default(),
            ram: info.ram().unwrap_or_default(),
            uptime: info.uptime(system_uptime, hertz).unwrap_or_default() as u64,
        }
    }

    /// Busiest process first, ties broken by pid.
    pub fn cmp_by_cpu(&self, other: &Self) -> Ordering {
        other
            .cpu
            .total_cmp(&self.cpu)
            .then_with(|| self.pid.cmp(&other.pid))
    }
}
