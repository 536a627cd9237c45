// This file is part of the sysmon package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use crate::fixtures;
use pretty_assertions::assert_eq;
use procinfo::{
    active_jiffies, active_jiffies_for, command, cpu_utilization, idle_jiffies, jiffies, kernel,
    memory_utilization, operating_system, pids, ram, running_processes, start_time,
    total_processes, uid, uptime, user, Process, ProcessInformation, SystemPaths,
};
use std::fs;
use tempfile::TempDir;

fn paths() -> SystemPaths {
    SystemPaths::with_roots(fixtures().join("proc"), fixtures().join("etc"))
}

// ============================================================================
// System
// ============================================================================

#[test]
fn test_operating_system() {
    assert_eq!(
        operating_system(&paths().os_release).unwrap(),
        "Pretty Name of a OS"
    );
}

#[test]
fn test_kernel() {
    assert_eq!(
        kernel(&paths().version).unwrap(),
        "5.4.72-microsoft-standard-WSL2"
    );
}

#[test]
fn test_memory_utilization() {
    let utilization = memory_utilization(&paths().meminfo).unwrap();
    assert!((utilization - 0.2214).abs() < 0.001);
}

#[test]
fn test_uptime() {
    assert!(uptime(&paths().uptime).unwrap() >= 1200);
}

#[test]
fn test_processes() {
    assert!(total_processes(&paths().stat).unwrap() >= 5000);
    assert_eq!(running_processes(&paths().stat).unwrap(), 300);
}

#[test]
fn test_jiffies() {
    let stat = paths().stat;

    assert_eq!(jiffies(&stat).unwrap(), 3370364);
    assert_eq!(active_jiffies(&stat).unwrap(), 51246);
    assert_eq!(idle_jiffies(&stat).unwrap(), 3319118);
}

#[test]
fn test_pids() {
    assert_eq!(pids(&paths().proc_root).unwrap(), vec![1015, 1016, 1017]);
}

// ============================================================================
// Processes
// ============================================================================

#[test]
fn test_process_accessors() {
    let root = paths().proc_root;

    assert_eq!(command(1015, &root).unwrap(), "/command");
    assert_eq!(uid(1015, &root).unwrap(), 0);
    assert_eq!(user(1015, &root, &paths().passwd).unwrap(), "root");
    assert_eq!(start_time(1015, &root).unwrap(), 46397);
    assert_eq!(ram(1015, &root).unwrap(), "1.632");
    assert_eq!(active_jiffies_for(1015, &root).unwrap(), 5000);
}

#[test]
fn test_cpu_utilization() {
    let paths = paths();
    let utilizations = cpu_utilization(&[1016, 1017], &paths.proc_root, &paths.uptime, 10).unwrap();

    assert_eq!(utilizations, vec!["PID 1016: 59", "PID 1017: 29"]);
}

#[test]
fn test_process_information_is_reusable() {
    let info = ProcessInformation::new(&paths().proc_root, 1016);

    assert_eq!(info.uid().unwrap(), 1000);
    assert_eq!(info.ram_kib().unwrap(), 20480);
    assert_eq!(info.start_time().unwrap(), 3875);
    assert_eq!(info.active_jiffies().unwrap(), 5000);
}

#[test]
fn test_process_disappears() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("proc");
    fs::create_dir_all(root.join("77")).unwrap();
    fs::write(root.join("77/cmdline"), "sleep\x0010\x00").unwrap();

    assert_eq!(command(77, &root).unwrap(), "sleep 10");
    assert_eq!(uid(77, &root).unwrap_or_default(), 0);
    assert_eq!(ram(77, &root).unwrap_or_default(), "");

    fs::remove_dir_all(root.join("77")).unwrap();
    assert_eq!(command(77, &root).unwrap_or_default(), "");

    let process = Process::collect(77, &SystemPaths::with_roots(&root, dir.path()), 100);
    assert_eq!(process.command, "");
    assert_eq!(process.cpu, 0.0);
}
