// This file is part of the sysmon package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use std::path::PathBuf;
use std::thread::sleep;
use std::time::{Duration, Instant};

use clap::{arg, crate_version, value_parser, ArgAction, ArgMatches, Command};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use prettytable::{format::consts::FORMAT_CLEAN, Row, Table};
use snapshot::{Sampler, Snapshot};
use uu_procinfo::{clock_ticks, elapsed_time, SystemPaths};
use uucore::{
    error::{set_exit_code, UResult, USimpleError},
    format_usage, help_about, help_usage,
};

const ABOUT: &str = help_about!("monitor.md");
const USAGE: &str = help_usage!("monitor.md");

mod header;
mod snapshot;
mod tui;

#[derive(Debug)]
struct Settings {
    batch: bool,
    delay: Duration,
    /// `None` refreshes until the user quits
    iterations: Option<u64>,
    processes: usize,
    paths: SystemPaths,
    hertz: u64,
}

impl Settings {
    fn new(matches: &ArgMatches) -> UResult<Self> {
        let batch = matches.get_flag("batch");

        let delay = matches.get_one::<f64>("delay").copied().unwrap_or(1.0);
        let invalid_delay = || {
            USimpleError::new(
                1,
                format!("delay must be a positive number of seconds: '{delay}'"),
            )
        };
        if delay <= 0.0 {
            return Err(invalid_delay());
        }
        let delay = Duration::try_from_secs_f64(delay).map_err(|_| invalid_delay())?;

        let iterations = matches
            .get_one::<u64>("iterations")
            .copied()
            .or(batch.then_some(1));

        let proc_root = matches
            .get_one::<PathBuf>("proc-root")
            .cloned()
            .unwrap_or_else(|| PathBuf::from("/proc"));
        let etc_root = matches
            .get_one::<PathBuf>("etc-root")
            .cloned()
            .unwrap_or_else(|| PathBuf::from("/etc"));

        Ok(Self {
            batch,
            delay,
            iterations,
            processes: matches.get_one::<usize>("processes").copied().unwrap_or(10),
            paths: SystemPaths::with_roots(proc_root, etc_root),
            hertz: matches
                .get_one::<u64>("hertz")
                .copied()
                .unwrap_or_else(clock_ticks),
        })
    }
}

#[uucore::main]
pub fn uumain(args: impl uucore::Args) -> UResult<()> {
    let matches = uu_app().try_get_matches_from(args)?;
    let settings = Settings::new(&matches)?;

    let mut sampler = Sampler::new(
        settings.paths.clone(),
        settings.hertz,
        settings.processes,
        settings.batch,
    );

    if settings.batch {
        batch(&settings, &mut sampler);
        return Ok(());
    }

    let mut terminal = ratatui::init();
    let result = interactive(&mut terminal, &settings, &mut sampler);
    ratatui::restore();

    result
}

fn batch(settings: &Settings, sampler: &mut Sampler) {
    let iterations = settings.iterations.unwrap_or(1);

    for iteration in 0..iterations {
        if iteration > 0 {
            sleep(settings.delay);
            println!();
        }

        let snapshot = sampler.sample();

        println!("{}", header::header(&snapshot));
        println!();
        print!("{}", process_table(&snapshot));
    }
}

fn process_table(snapshot: &Snapshot) -> Table {
    let mut table = Table::new();

    table.set_format(*FORMAT_CLEAN);

    table.add_row(Row::from_iter([
        "PID", "USER", "CPU[%]", "RAM[MB]", "TIME+", "COMMAND",
    ]));
    table.extend(snapshot.processes.iter().map(|process| {
        Row::from_iter([
            process.pid.to_string(),
            process.user.clone(),
            format!("{:.1}", process.cpu * 100.0),
            process.ram.clone(),
            elapsed_time(process.uptime),
            process.command.clone(),
        ])
    }));

    table
}

/// The exit code to quit with after `event`, if it ends the session.
fn key_action(event: &Event) -> Option<i32> {
    match event {
        Event::Key(KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        }) => Some(130),
        Event::Key(KeyEvent {
            code: KeyCode::Char('q'),
            kind: KeyEventKind::Press,
            ..
        }) => Some(0),
        _ => None,
    }
}

fn interactive(
    terminal: &mut ratatui::DefaultTerminal,
    settings: &Settings,
    sampler: &mut Sampler,
) -> UResult<()> {
    let mut refreshed = 0;

    loop {
        let snapshot = sampler.sample();
        refreshed += 1;

        terminal.draw(|frame| frame.render_widget(tui::Tui::new(&snapshot), frame.area()))?;

        let deadline = Instant::now() + settings.delay;
        while let Some(timeout) = deadline.checked_duration_since(Instant::now()) {
            // Use `event::poll` for non-blocking event reading
            if !event::poll(timeout)? {
                continue;
            }

            if let Some(code) = key_action(&event::read()?) {
                if code != 0 {
                    set_exit_code(code);
                }
                return Ok(());
            }
        }

        if settings.iterations.is_some_and(|limit| refreshed >= limit) {
            return Ok(());
        }
    }
}

#[allow(clippy::cognitive_complexity)]
pub fn uu_app() -> Command {
    Command::new(uucore::util_name())
        .version(crate_version!())
        .about(ABOUT)
        .override_usage(format_usage(USAGE))
        .infer_long_args(true)
        .args([
            arg!(-b --batch                     "print text snapshots instead of the interactive display")
                .action(ArgAction::SetTrue),
            arg!(-d --delay         <SECS>      "refresh every SECS seconds")
                .value_parser(value_parser!(f64))
                .default_value("1"),
            arg!(-n --iterations    <NUMBER>    "exit after NUMBER refreshes")
                .value_parser(value_parser!(u64).range(1..)),
            arg!(-p --processes     <NUMBER>    "show the NUMBER busiest processes")
                .value_parser(value_parser!(usize))
                .default_value("10"),
            arg!(--"proc-root"      <DIR>       "read process information below DIR")
                .value_parser(value_parser!(PathBuf))
                .env("SYSMON_PROC_ROOT")
                .default_value("/proc"),
            arg!(--"etc-root"       <DIR>       "read os-release and passwd from DIR")
                .value_parser(value_parser!(PathBuf))
                .env("SYSMON_ETC_ROOT")
                .default_value("/etc"),
            arg!(--hertz            <TICKS>     "clock ticks per second [default: sysconf(_SC_CLK_TCK)]")
                .value_parser(value_parser!(u64).range(1..))
                .env("SYSMON_HERTZ"),
        ])
}
