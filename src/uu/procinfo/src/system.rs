// This file is part of the sysmon package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

//! System-wide accessors

use crate::cpu::CpuTimes;
use crate::error::{ProcError, ProcResult};
use crate::parser::{first_token, parse_proc_file, read};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// `PRETTY_NAME` of an os-release file, without its quotes.
///
/// - [os-release(5)](https://www.freedesktop.org/software/systemd/man/latest/os-release.html)
pub fn operating_system(path: &Path) -> ProcResult<String> {
    const KEY: &str = "PRETTY_NAME";

    read(path)?
        .lines()
        .filter_map(|line| line.split_once('='))
        .find(|(key, _)| key.trim() == KEY)
        .map(|(_, value)| unquote(value.trim()).to_string())
        .ok_or_else(|| ProcError::missing(path, KEY))
}

fn unquote(value: &str) -> &str {
    ['"', '\'']
        .iter()
        .find_map(|quote| value.strip_prefix(*quote)?.strip_suffix(*quote))
        .unwrap_or(value)
}

/// Kernel release out of `/proc/version`: `Linux version <release> ...`
pub fn kernel(path: &Path) -> ProcResult<String> {
    read(path)?
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(2))
        .map(String::from)
        .ok_or_else(|| ProcError::missing(path, "version"))
}

/// Fraction of `MemTotal` that is not `MemFree`.
pub fn memory_utilization(path: &Path) -> ProcResult<f32> {
    // kernel docs: https://www.kernel.org/doc/html/latest/filesystems/proc.html#meminfo
    let meminfo = parse_proc_file(&read(path)?);
    let total = first_token::<u64>(&meminfo, "MemTotal", path)?;
    let free = first_token::<u64>(&meminfo, "MemFree", path)?;

    if total == 0 {
        return Err(ProcError::invalid(path, "MemTotal", "0"));
    }

    Ok(total.saturating_sub(free) as f32 / total as f32)
}

/// Uptime and aggregate idle time from `/proc/uptime`, in seconds.
pub fn uptime_precise(path: &Path) -> ProcResult<(f64, f64)> {
    let content = read(path)?;
    let mut parts = content.split_whitespace();

    let mut next = |field: &str| -> ProcResult<f64> {
        let token = parts.next().ok_or_else(|| ProcError::missing(path, field))?;
        token
            .parse::<f64>()
            .map_err(|_| ProcError::invalid(path, field, token))
    };

    let uptime = next("uptime")?;
    let idle = next("idle")?;
    Ok((uptime, idle))
}

/// Whole seconds since boot.
pub fn uptime(path: &Path) -> ProcResult<u64> {
    uptime_precise(path).map(|(uptime, _)| uptime as u64)
}

/// Number of forks since boot, the `processes` line of `/proc/stat`.
pub fn total_processes(path: &Path) -> ProcResult<u64> {
    first_token(&parse_proc_file(&read(path)?), "processes", path)
}

/// The `procs_running` line of `/proc/stat`.
pub fn running_processes(path: &Path) -> ProcResult<u64> {
    first_token(&parse_proc_file(&read(path)?), "procs_running", path)
}

/// The aggregate `cpu` line of `/proc/stat`.
pub fn cpu_times(path: &Path) -> ProcResult<CpuTimes> {
    let stat = parse_proc_file(&read(path)?);
    let load = stat.get("cpu").ok_or_else(|| ProcError::missing(path, "cpu"))?;

    load.parse::<CpuTimes>()
        .map_err(|_| ProcError::invalid(path, "cpu", load.as_str()))
}

pub fn jiffies(path: &Path) -> ProcResult<u64> {
    cpu_times(path).map(|times| times.total())
}

pub fn active_jiffies(path: &Path) -> ProcResult<u64> {
    cpu_times(path).map(|times| times.active())
}

pub fn idle_jiffies(path: &Path) -> ProcResult<u64> {
    cpu_times(path).map(|times| times.idle())
}

/// Pids of every process directory directly below `proc_root`, ascending.
pub fn pids(proc_root: &Path) -> ProcResult<Vec<usize>> {
    fs::metadata(proc_root).map_err(|e| ProcError::io(proc_root, e))?;

    let mut pids = WalkDir::new(proc_root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .into_iter()
        .flatten()
        .filter(|it| it.file_type().is_dir())
        .filter_map(|it| it.file_name().to_str()?.parse::<usize>().ok())
        .collect::<Vec<_>>();

    pids.sort_unstable();
    Ok(pids)
}
