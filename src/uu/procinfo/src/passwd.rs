// This file is part of the sysmon package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use crate::error::{ProcError, ProcResult};
use crate::parser::read;
use std::collections::HashMap;
use std::path::Path;

/// uid to user name mapping loaded from a passwd(5) file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserTable {
    names: HashMap<u32, String>,
}

impl UserTable {
    pub fn load(path: &Path) -> ProcResult<Self> {
        Ok(Self::parse(&read(path)?))
    }

    /// `name:password:uid:gid:gecos:home:shell`; malformed lines are skipped
    /// and the first entry for a uid wins.
    pub fn parse(content: &str) -> Self {
        let mut names = HashMap::new();

        for line in content.lines() {
            let mut fields = line.split(':');
            let (Some(name), Some(_), Some(uid)) = (fields.next(), fields.next(), fields.next())
            else {
                continue;
            };
            let Ok(uid) = uid.parse::<u32>() else {
                continue;
            };

            names.entry(uid).or_insert_with(|| name.to_string());
        }

        Self { names }
    }

    pub fn name(&self, uid: u32) -> Option<&str> {
        self.names.get(&uid).map(String::as_str)
    }
}

/// Name of the user owning `uid` according to the passwd file at `path`.
pub fn user_name(uid: u32, path: &Path) -> ProcResult<String> {
    UserTable::load(path)?
        .name(uid)
        .map(String::from)
        .ok_or_else(|| ProcError::missing(path, uid.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_user_name() {
        let passwd = fixtures().join("etc/passwd");

        assert_eq!(user_name(0, &passwd).unwrap(), "root");
        assert_eq!(user_name(1000, &passwd).unwrap(), "udacity");
        assert!(matches!(
            user_name(4242, &passwd),
            Err(ProcError::MissingField { .. })
        ));
    }

    #[test]
    fn test_parse_skips_malformed_lines() {
        let table = UserTable::parse("\n# comment\nbroken\nnobody:x:notanumber:0::/:/bin/false\nalice:x:1001:1001::/home/alice:/bin/sh\n");

        assert_eq!(table.name(1001), Some("alice"));
        assert_eq!(table.name(0), None);
    }

    #[test]
    fn test_parse_first_entry_wins() {
        let table = UserTable::parse("root:x:0:0::/root:/bin/sh\ntoor:x:0:0::/root:/bin/sh\n");
        assert_eq!(table.name(0), Some("root"));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(UserTable::load(Path::new("/definitely/not/passwd"))
            .unwrap_err()
            .is_not_found());
    }
}
