// This file is part of the sysmon package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

//! Accessors for the kernel pseudo-files the sysmon utilities read
//!
//! Every accessor opens one file, extracts one value and returns it. Nothing
//! is cached between calls, and all paths are explicit so that a fixture tree
//! can stand in for `/proc` and `/etc`.
//!
//! # Example
//!
//! ```ignore
//! use uu_procinfo::{kernel, memory_utilization, SystemPaths};
//!
//! let paths = SystemPaths::default();
//! println!("{}", kernel(&paths.version).unwrap_or_default());
//! println!("{:.2}", memory_utilization(&paths.meminfo).unwrap_or_default());
//! ```

pub mod cpu;
pub mod error;
pub mod format;
pub mod parser;
pub mod passwd;
pub mod paths;
pub mod process;
pub mod system;

// Re-export commonly used types and functions
pub use cpu::{CpuTimes, Processor};
pub use error::{ProcError, ProcResult};
pub use format::{elapsed_time, progress_bar};
pub use passwd::UserTable;
pub use paths::SystemPaths;
pub use process::{
    active_jiffies_for, clock_ticks, command, cpu_utilization, process_cpu_utilization,
    process_uptime, ram, ram_kib, start_time, uid, user, Process, ProcessInformation,
};
pub use system::{
    active_jiffies, cpu_times, idle_jiffies, jiffies, kernel, memory_utilization,
    operating_system, pids, running_processes, total_processes, uptime, uptime_precise,
};

/// Root of the checked-in fixture tree, used by the unit tests of every module.
#[cfg(test)]
pub(crate) fn fixtures() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../tests/fixtures/sysmon")
}
