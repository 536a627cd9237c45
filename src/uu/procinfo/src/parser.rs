// This file is part of the sysmon package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use crate::error::{ProcError, ProcResult};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Read a whole pseudo-file, attaching the path to any I/O error.
///
/// Command names and arguments are arbitrary bytes, so invalid UTF-8 is
/// replaced instead of failing the whole file.
pub fn read(path: &Path) -> ProcResult<String> {
    let bytes = fs::read(path).map_err(|e| ProcError::io(path, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Split `key: value` and `key value` lines into a map.
///
/// Works for `/proc/meminfo`, `/proc/stat` and `/proc/<pid>/status`. The
/// trailing colon of the key is dropped and the value keeps everything after
/// the separating whitespace. The first occurrence of a key wins.
pub fn parse_proc_file(content: &str) -> HashMap<String, String> {
    let mut map: HashMap<String, String> = HashMap::new();

    for line in content.lines() {
        if let Some((key, value)) = line.split_once(char::is_whitespace) {
            map.entry(key.strip_suffix(':').unwrap_or(key).to_string())
                .or_insert_with(|| value.trim().to_string());
        }
    }

    map
}

/// Convert the first token of `map[key]`, e.g. `8052952` out of `8052952 kB`.
pub fn first_token<T: FromStr>(
    map: &HashMap<String, String>,
    key: &str,
    path: &Path,
) -> ProcResult<T> {
    nth_token(map, key, 0, path)
}

/// Convert the `index`-th whitespace separated token of `map[key]`.
pub fn nth_token<T: FromStr>(
    map: &HashMap<String, String>,
    key: &str,
    index: usize,
    path: &Path,
) -> ProcResult<T> {
    let token = map
        .get(key)
        .ok_or_else(|| ProcError::missing(path, key))?
        .split_whitespace()
        .nth(index)
        .ok_or_else(|| ProcError::missing(path, key))?;

    token
        .parse::<T>()
        .map_err(|_| ProcError::invalid(path, key, token))
}

/// Split a `/proc/<pid>/stat` line into its fields.
///
/// The command name sits between the first `(` and the last `)` and may
/// itself contain spaces and parentheses, so it is cut out before the rest of
/// the line is split on whitespace. Index 0 is the pid, 1 the command, 2 the
/// state, and so on, matching the field numbers of proc(5) minus one.
pub fn stat_split(stat: &str) -> Vec<String> {
    let stat = stat.trim_end();

    match (stat.find('('), stat.rfind(')')) {
        (Some(left), Some(right)) if left < right => {
            let mut split_stat = vec![stat[..left].trim_end().to_string()];

            split_stat.push(stat[left + 1..right].to_string());
            split_stat.extend(stat[right + 1..].split_whitespace().map(String::from));

            split_stat
        }
        _ => stat.split_whitespace().map(String::from).collect(),
    }
}
