// This file is part of the sysmon package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use crate::error::ProcResult;
use crate::system::cpu_times;
use std::path::Path;
use std::str::FromStr;

/// Jiffies of the aggregate `cpu` line of `/proc/stat`
///
/// - [The /proc Filesystem: 1.7 Miscellaneous kernel statistics](https://docs.kernel.org/filesystems/proc.html#miscellaneous-kernel-statistics-in-proc-stat)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuTimes {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub io_wait: u64,
    pub hardware_interrupt: u64,
    pub software_interrupt: u64,
    pub steal_time: u64,
    pub guest: u64,
    pub guest_nice: u64,
}

impl CpuTimes {
    /// Jiffies spent doing work
    pub fn active(&self) -> u64 {
        [
            self.nice,
            self.system,
            self.hardware_interrupt,
            self.software_interrupt,
            self.steal_time,
        ]
        .into_iter()
        .fold(self.user, u64::saturating_add)
    }

    /// Jiffies spent idle or waiting for I/O
    pub fn idle(&self) -> u64 {
        self.idle.saturating_add(self.io_wait)
    }

    /// Guest time is already accounted in user and nice, so it is not added again.
    pub fn total(&self) -> u64 {
        self.active().saturating_add(self.idle())
    }
}

impl FromStr for CpuTimes {
    type Err = std::num::ParseIntError;

    /// Parse the columns following the `cpu` tag.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let load = s.split_whitespace().collect::<Vec<_>>();

        let required = |index: usize| -> Result<u64, Self::Err> {
            load.get(index).copied().unwrap_or_default().parse::<u64>()
        };
        let optional = |index: usize| -> u64 {
            load.get(index)
                .and_then(|it| it.parse::<u64>().ok())
                .unwrap_or_default()
        };

        Ok(Self {
            user: required(0)?,
            nice: required(1)?,
            system: required(2)?,
            idle: required(3)?,
            io_wait: optional(4),            // since 2.5.41
            hardware_interrupt: optional(5), // since 2.6.0
            software_interrupt: optional(6), // since 2.6.0
            steal_time: optional(7),         // since 2.6.11
            guest: optional(8),              // since 2.6.24
            guest_nice: optional(9),         // since 2.6.33
        })
    }
}

/// Aggregate CPU utilization between two samples of `/proc/stat`
#[derive(Debug, Default, Clone)]
pub struct Processor {
    previous: CpuTimes,
}

impl Processor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample `stat_path` and return the busy fraction since the last sample.
    ///
    /// The first call compares against an all-zero sample, which yields the
    /// utilization since boot.
    pub fn utilization(&mut self, stat_path: &Path) -> ProcResult<f32> {
        Ok(self.update(cpu_times(stat_path)?))
    }

    /// Record `current` and return the busy fraction since the previous sample.
    pub fn update(&mut self, current: CpuTimes) -> f32 {
        let total = current.total().saturating_sub(self.previous.total());
        let active = current.active().saturating_sub(self.previous.active());
        self.previous = current;

        if total == 0 {
            return 0.0;
        }

        (active as f32 / total as f32).clamp(0.0, 1.0)
    }
}
