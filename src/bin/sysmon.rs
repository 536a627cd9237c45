// This file is part of the sysmon package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use clap::{Arg, Command};
use clap_complete::Shell;
use std::cmp;
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use uucore::display::Quotable;

const VERSION: &str = env!("CARGO_PKG_VERSION");

include!(concat!(env!("OUT_DIR"), "/sysmon_map.rs"));

fn usage<T>(utils: &UtilityMap<T>, name: &str) {
    println!("{name} {VERSION} (multi-call binary)\n");
    println!("Usage: {name} [function [arguments...]]\n");
    println!("Currently defined functions:\n");
    #[allow(clippy::map_clone)]
    let mut utils: Vec<&str> = utils.keys().map(|&s| s).collect();
    utils.sort_unstable();
    let display_list = utils.join(", ");
    let width = usage_width(textwrap::termwidth());
    println!(
        "{}",
        textwrap::indent(&textwrap::fill(&display_list, width), "    ")
    );
}

/// Wrap width for the utility list: at most 100 columns with 4 character side indentions.
fn usage_width(term_width: usize) -> usize {
    cmp::min(term_width, 100).saturating_sub(4 * 2).max(1)
}

fn binary_path(args: &mut impl Iterator<Item = OsString>) -> PathBuf {
    match args.next() {
        Some(ref s) if !s.is_empty() => PathBuf::from(s),
        _ => std::env::current_exe().unwrap(),
    }
}

fn name(binary_path: &Path) -> Option<&str> {
    binary_path.file_stem()?.to_str()
}

/// The utility a binary named `binary_name` stands for: the exact name, or a
/// `-<util>`/`_<util>` suffix as in `sysmon-monitor`.
fn find_prefixed_util<'a>(
    binary_name: &str,
    mut util_keys: impl Iterator<Item = &'a str>,
) -> Option<&'a str> {
    util_keys.find(|util| {
        binary_name == *util
            || binary_name
                .strip_suffix(util)
                .is_some_and(|prefix| prefix.ends_with('-') || prefix.ends_with('_'))
    })
}

fn main() {
    uucore::panic::mute_sigpipe_panic();

    let utils = util_map();
    let mut args = uucore::args_os();

    let binary = binary_path(&mut args);
    let binary_as_util = name(&binary).unwrap_or_else(|| {
        usage(&utils, "<unknown binary name>");
        process::exit(0);
    });

    // binary name equals util name?
    if let Some(&(uumain, _)) = utils.get(binary_as_util) {
        process::exit(uumain(vec![binary.into()].into_iter().chain(args)));
    }

    // binary name equals prefixed util name?
    if let Some(util) = find_prefixed_util(binary_as_util, utils.keys().copied()) {
        if let Some(&(uumain, _)) = utils.get(util) {
            process::exit(uumain(vec![binary.into()].into_iter().chain(args)));
        }
    }

    // else default to "multi-call binary" usage ...
    uucore::set_utility_is_second_arg();

    if let Some(util_os) = args.next() {
        let util = util_os.as_os_str().to_string_lossy();

        if util == "completion" {
            gen_completions(args, &utils);
        }

        if util == "manpage" {
            gen_manpage(args, &utils);
        }

        match utils.get(&util[..]) {
            Some(&(uumain, _)) => {
                process::exit(uumain(vec![util_os].into_iter().chain(args)));
            }
            None => {
                if util == "--help" || util == "-h" {
                    // see if they want help on a specific util
                    if let Some(util_os) = args.next() {
                        let util = util_os.as_os_str().to_string_lossy();

                        match utils.get(&util[..]) {
                            Some(&(uumain, _)) => {
                                let code = uumain(
                                    vec![util_os, OsString::from("--help")]
                                        .into_iter()
                                        .chain(args),
                                );
                                io::stdout().flush().expect("could not flush stdout");
                                process::exit(code);
                            }
                            None => {
                                println!("{}: function/utility not found", util.maybe_quote());
                                process::exit(1);
                            }
                        }
                    }
                    usage(&utils, binary_as_util);
                    process::exit(0);
                } else {
                    println!("{}: function/utility not found", util.maybe_quote());
                    process::exit(1);
                }
            }
        }
    } else {
        // no arguments provided
        usage(&utils, binary_as_util);
        process::exit(0);
    }
}

/// Prints completions for the utility in the first parameter for the shell in the second parameter to stdout
fn gen_completions<T: uucore::Args>(
    args: impl Iterator<Item = OsString>,
    util_map: &UtilityMap<T>,
) -> ! {
    let all_utilities: Vec<_> = std::iter::once("sysmon")
        .chain(util_map.keys().copied())
        .collect();

    let matches = Command::new("completion")
        .about("Prints completions to stdout")
        .arg(
            Arg::new("utility")
                .value_parser(clap::builder::PossibleValuesParser::new(all_utilities))
                .required(true),
        )
        .arg(
            Arg::new("shell")
                .value_parser(clap::builder::EnumValueParser::<Shell>::new())
                .required(true),
        )
        .get_matches_from(std::iter::once(OsString::from("completion")).chain(args));

    let utility = matches.get_one::<String>("utility").unwrap();
    let shell = *matches.get_one::<Shell>("shell").unwrap();

    let mut command = if utility == "sysmon" {
        gen_sysmon_app(util_map)
    } else {
        util_map.get(utility.as_str()).unwrap().1()
    };
    let bin_name = std::env::var("PROG_PREFIX").unwrap_or_default() + utility;

    clap_complete::generate(shell, &mut command, bin_name, &mut io::stdout());
    io::stdout().flush().unwrap();
    process::exit(0);
}

/// Generate the manpage for the utility in the first parameter
fn gen_manpage<T: uucore::Args>(
    args: impl Iterator<Item = OsString>,
    util_map: &UtilityMap<T>,
) -> ! {
    let all_utilities: Vec<_> = std::iter::once("sysmon")
        .chain(util_map.keys().copied())
        .collect();

    let matches = Command::new("manpage")
        .about("Prints manpage to stdout")
        .arg(
            Arg::new("utility")
                .value_parser(clap::builder::PossibleValuesParser::new(all_utilities))
                .required(true),
        )
        .get_matches_from(std::iter::once(OsString::from("manpage")).chain(args));

    let utility = matches.get_one::<String>("utility").unwrap();

    let command = if utility == "sysmon" {
        gen_sysmon_app(util_map)
    } else {
        util_map.get(utility.as_str()).unwrap().1()
    };

    let man = clap_mangen::Man::new(command);
    man.render(&mut io::stdout())
        .expect("Man page generation failed");
    io::stdout().flush().unwrap();
    process::exit(0);
}

fn gen_sysmon_app<T: uucore::Args>(util_map: &UtilityMap<T>) -> Command {
    let mut command = Command::new("sysmon");
    for (name, (_, sub_app)) in util_map {
        // Recreate a small subcommand with only the relevant info
        // (name & short description)
        let about = sub_app()
            .get_about()
            .expect("Could not get the 'about'")
            .to_string();
        let sub_app = Command::new(*name).about(about);
        command = command.subcommand(sub_app);
    }
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_prefixed_util() {
        let utils = ["monitor"];

        assert_eq!(
            find_prefixed_util("monitor", utils.iter().copied()),
            Some("monitor")
        );
        assert_eq!(
            find_prefixed_util("sysmon-monitor", utils.iter().copied()),
            Some("monitor")
        );
        assert_eq!(
            find_prefixed_util("sysmon_monitor", utils.iter().copied()),
            Some("monitor")
        );
        assert_eq!(find_prefixed_util("sysmonitor", utils.iter().copied()), None);
        assert_eq!(find_prefixed_util("top", utils.iter().copied()), None);
    }

    #[test]
    fn test_usage_width() {
        assert_eq!(usage_width(80), 72);
        assert_eq!(usage_width(300), 92);
        assert_eq!(usage_width(8), 1);
        assert_eq!(usage_width(3), 1);
        assert_eq!(usage_width(0), 1);
    }

    #[test]
    fn test_name() {
        assert_eq!(name(Path::new("/usr/bin/sysmon")), Some("sysmon"));
        assert_eq!(name(Path::new("monitor.exe")), Some("monitor"));
    }
}
