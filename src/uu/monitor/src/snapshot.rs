// This file is part of the sysmon package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use std::collections::HashSet;
use std::path::PathBuf;
use uu_procinfo::{
    kernel, memory_utilization, operating_system, pids, running_processes, total_processes,
    uptime_precise, ProcResult, Process, Processor, SystemPaths, UserTable,
};

/// Everything shown by one refresh
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Snapshot {
    pub(crate) os: String,
    pub(crate) kernel: String,
    pub(crate) cpu: f32,
    pub(crate) memory: f32,
    pub(crate) total_processes: u64,
    pub(crate) running_processes: u64,
    pub(crate) uptime: u64,
    pub(crate) processes: Vec<Process>,
}

/// Reads a [Snapshot] on every refresh, keeping the CPU counters between calls.
pub(crate) struct Sampler {
    paths: SystemPaths,
    hertz: u64,
    limit: usize,
    processor: Processor,

    /// Report unreadable system files on stderr
    verbose: bool,
    warned: HashSet<PathBuf>,
}

impl Sampler {
    pub(crate) fn new(paths: SystemPaths, hertz: u64, limit: usize, verbose: bool) -> Self {
        Self {
            paths,
            hertz,
            limit,
            processor: Processor::new(),
            verbose,
            warned: HashSet::new(),
        }
    }

    pub(crate) fn sample(&mut self) -> Snapshot {
        self.warned.clear();

        let (uptime, _) = self.or_default(uptime_precise(&self.paths.uptime));

        let cpu = self.processor.utilization(&self.paths.stat);
        let cpu = self.or_default(cpu);

        Snapshot {
            os: self.or_default(operating_system(&self.paths.os_release)),
            kernel: self.or_default(kernel(&self.paths.version)),
            cpu,
            memory: self.or_default(memory_utilization(&self.paths.meminfo)),
            total_processes: self.or_default(total_processes(&self.paths.stat)),
            running_processes: self.or_default(running_processes(&self.paths.stat)),
            uptime: uptime as u64,
            processes: self.processes(uptime),
        }
    }

    /// The `limit` busiest processes.
    fn processes(&mut self, uptime: f64) -> Vec<Process> {
        let users = self.or_default(UserTable::load(&self.paths.passwd));
        let pids = self.or_default(pids(&self.paths.proc_root));

        let mut processes = pids
            .into_iter()
            .map(|pid| {
                Process::collect_with(pid, &self.paths.proc_root, &users, uptime, self.hertz)
            })
            .collect::<Vec<_>>();

        processes.sort_by(Process::cmp_by_cpu);
        processes.truncate(self.limit);
        processes
    }

    /// Unwrap `result`, warning at most once per file and refresh on failure.
    fn or_default<T: Default>(&mut self, result: ProcResult<T>) -> T {
        result.unwrap_or_else(|e| {
            if self.verbose && self.warned.insert(e.path().to_path_buf()) {
                uucore::show_warning!("{}", e);
            }
            T::default()
        })
    }
}
