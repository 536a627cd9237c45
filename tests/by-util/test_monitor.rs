// This file is part of the sysmon package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use crate::fixtures;
use pretty_assertions::assert_eq;
use uutests::new_ucmd;
use uutests::util::TestScenario;
use uutests::util_name;

fn fixture_args() -> Vec<String> {
    vec![
        "--batch".into(),
        "--hertz=10".into(),
        format!("--proc-root={}", fixtures().join("proc").display()),
        format!("--etc-root={}", fixtures().join("etc").display()),
    ]
}

#[test]
fn test_invalid_arg() {
    new_ucmd!().arg("--definitely-invalid").fails().code_is(1);
}

#[test]
fn test_invalid_delay() {
    new_ucmd!().args(&["-b", "-d", "0"]).fails().code_is(1);
    new_ucmd!().args(&["-b", "-d", "soon"]).fails().code_is(1);
    new_ucmd!()
        .args(&["-b", "-d", "1e300"])
        .fails()
        .code_is(1)
        .stderr_contains("delay must be a positive number of seconds");
}

#[test]
fn test_completion() {
    let scene = TestScenario::new(util_name!());

    scene
        .cmd(&scene.bin_path)
        .args(&["completion", "monitor", "bash"])
        .succeeds()
        .stdout_contains("monitor")
        .stdout_contains("--delay");
}

#[test]
fn test_manpage() {
    let scene = TestScenario::new(util_name!());

    scene
        .cmd(&scene.bin_path)
        .args(&["manpage", "monitor"])
        .succeeds()
        .stdout_contains(".TH ")
        .stdout_contains("delay");
}

#[test]
fn test_invalid_iterations() {
    new_ucmd!().args(&["-b", "-n", "0"]).fails().code_is(1);
}

#[test]
fn test_invalid_hertz() {
    new_ucmd!().args(&["-b", "--hertz=0"]).fails().code_is(1);
}

#[test]
fn test_batch_header() {
    let result = new_ucmd!().args(&fixture_args()).succeeds();
    let stdout = result.stdout_str();
    let lines = stdout.lines().collect::<Vec<_>>();

    assert_eq!(lines[0], "OS: Pretty Name of a OS");
    assert_eq!(lines[1], "Kernel: 5.4.72-microsoft-standard-WSL2");
    assert!(lines[2].starts_with("CPU: 0%|"));
    assert!(lines[2].ends_with("   1.5/100%"));
    assert!(lines[3].starts_with("Memory: 0%|"));
    assert!(lines[3].ends_with("  22.1/100%"));
    assert_eq!(lines[4], "Total Processes: 5123");
    assert_eq!(lines[5], "Running Processes: 300");
    assert_eq!(lines[6], "Up Time: 00:20:34");
    assert_eq!(lines[7], "");

    result.no_stderr();
}

#[test]
fn test_batch_process_table() {
    let result = new_ucmd!().args(&fixture_args()).succeeds();

    let rows = result
        .stdout_str()
        .lines()
        .skip(8)
        .map(|line| line.split_whitespace().collect::<Vec<_>>())
        .collect::<Vec<_>>();

    assert_eq!(
        rows[0],
        vec!["PID", "USER", "CPU[%]", "RAM[MB]", "TIME+", "COMMAND"]
    );
    assert_eq!(rows.len(), 4);

    // busiest first
    assert_eq!(rows[1][..5], ["1016", "udacity", "59.0", "20.000", "00:14:07"]);
    assert_eq!(rows[2][..5], ["1017", "daemon", "29.5", "0.500", "00:14:07"]);
    assert_eq!(rows[3], vec!["1015", "root", "0.0", "1.632", "00:00:00", "/command"]);
}

#[test]
fn test_batch_process_limit() {
    let result = new_ucmd!()
        .args(&fixture_args())
        .args(&["--processes", "1"])
        .succeeds();

    let stdout = result.stdout_str();
    assert!(stdout.contains("1016"));
    assert!(!stdout.contains("1017"));
    assert!(!stdout.contains("/command"));
}

#[test]
fn test_batch_iterations() {
    let result = new_ucmd!()
        .args(&fixture_args())
        .args(&["-n", "2", "-d", "0.01"])
        .succeeds();

    let stdout = result.stdout_str();
    assert_eq!(stdout.matches("OS: Pretty Name of a OS").count(), 2);
    assert_eq!(stdout.matches("Up Time: 00:20:34").count(), 2);
}

#[test]
fn test_roots_from_environment() {
    new_ucmd!()
        .env("SYSMON_PROC_ROOT", fixtures().join("proc"))
        .env("SYSMON_ETC_ROOT", fixtures().join("etc"))
        .env("SYSMON_HERTZ", "10")
        .arg("-b")
        .succeeds()
        .stdout_contains("Running Processes: 300")
        .stdout_contains("udacity");
}

#[test]
fn test_missing_files_fall_back_to_defaults() {
    let result = new_ucmd!()
        .args(&[
            "-b",
            "--proc-root=/definitely/not/proc",
            "--etc-root=/definitely/not/etc",
        ])
        .succeeds();

    let stdout = result.stdout_str();
    assert!(stdout.contains("OS: \n"));
    assert!(stdout.contains("Total Processes: 0"));
    assert!(stdout.contains("Up Time: 00:00:00"));

    // one warning per unreadable file
    let stderr = result.stderr_str();
    assert!(stderr.contains("warning"));
    assert_eq!(stderr.matches("/definitely/not/proc/stat").count(), 1);
    assert_eq!(stderr.matches("/definitely/not/etc/os-release").count(), 1);
}
