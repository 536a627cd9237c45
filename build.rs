// This file is part of the sysmon package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

// spell-checker:ignore (vars) krate

use std::env;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Generate `util_map()`, the name to entry point table of every utility
/// enabled through a cargo feature.
pub fn main() {
    const ENV_FEATURE_PREFIX: &str = "CARGO_FEATURE_";
    const FEATURE_PREFIX: &str = "feat_";

    let out_dir = env::var("OUT_DIR").unwrap();

    let mut crates = Vec::new();
    for (key, val) in env::vars() {
        if val != "1" || !key.starts_with(ENV_FEATURE_PREFIX) {
            continue;
        }

        let krate = key[ENV_FEATURE_PREFIX.len()..].to_lowercase();
        if krate == "default" || krate.starts_with(FEATURE_PREFIX) {
            continue;
        }
        crates.push(krate);
    }
    crates.sort();

    let mut mf = File::create(Path::new(&out_dir).join("sysmon_map.rs")).unwrap();

    mf.write_all(
        "type UtilityMap<T> = phf::OrderedMap<&'static str, (fn(T) -> i32, fn() -> Command)>;\n\
         \n\
         fn util_map<T: uucore::Args>() -> UtilityMap<T> {\n"
            .as_bytes(),
    )
    .unwrap();

    // the map borrows its values until `build`
    let entries: Vec<String> = crates
        .iter()
        .map(|krate| format!("({krate}::uumain, {krate}::uu_app)"))
        .collect();
    let mut phf_map = phf_codegen::OrderedMap::<&str>::new();
    for (krate, entry) in crates.iter().zip(&entries) {
        phf_map.entry(krate.as_str(), entry.as_str());
    }
    write!(mf, "{}", phf_map.build()).unwrap();
    mf.write_all(b"\n}\n").unwrap();

    mf.flush().unwrap();
}
