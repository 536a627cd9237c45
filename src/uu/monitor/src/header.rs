// This file is part of the sysmon package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use crate::snapshot::Snapshot;
use uu_procinfo::{elapsed_time, progress_bar};

pub(crate) fn header(snapshot: &Snapshot) -> String {
    format!(
        "OS: {os}\n\
        Kernel: {kernel}\n\
        CPU: {cpu}\n\
        Memory: {memory}\n\
        Total Processes: {total}\n\
        Running Processes: {running}\n\
        Up Time: {uptime}",
        os = snapshot.os,
        kernel = snapshot.kernel,
        cpu = progress_bar(snapshot.cpu),
        memory = progress_bar(snapshot.memory),
        total = snapshot.total_processes,
        running = snapshot.running_processes,
        uptime = elapsed_time(snapshot.uptime),
    )
}
