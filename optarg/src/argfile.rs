//! Argument files: options kept in a text file, one per line, turned
//! into argument tokens that can be spliced into an argument vector.
//!
//! ```text
//! # comment
//! verbose
//! count = 3
//! name = "Alice Smith"
//! ```

use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::opt::parse_bool;
use crate::set::OptionSet;

/// Read `path` and convert it with [`parse`].
pub fn read<P: AsRef<Path>>(path: P, set: &OptionSet) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path.as_ref())?;
    debug!(path = %path.as_ref().display(), "reading argument file");
    parse(&content, set)
}

/// Convert argument-file text into tokens using `set`'s long prefix. A
/// bare `key` becomes `--key`; `key = value` or `key value` becomes
/// `--key value`. Quotes in the value are honoured and removed.
///
/// For flags the value is read as a boolean: true emits the bare switch,
/// false drops the line. Keys that `set` does not declare are passed
/// through so the scanner reports them.
pub fn parse(content: &str, set: &OptionSet) -> Result<Vec<String>> {
    let long_switch = set.long_prefix();
    let mut args = Vec::new();

    for (n, line) in content.lines().enumerate() {
        let l = line.trim();
        if l.is_empty() || l.starts_with('#') {
            continue;
        }

        let key_end = l
            .find(|c: char| c.is_whitespace() || c == '=')
            .unwrap_or(l.len());
        let key = &l[..key_end];
        if key.is_empty() {
            debug!(line = n + 1, "skipping line without a key");
            continue;
        }

        let rest = l[key_end..].trim_start();
        let rest = rest.strip_prefix('=').unwrap_or(rest).trim();
        let switch = format!("{}{}", long_switch, key);
        if rest.is_empty() {
            args.push(switch);
            continue;
        }

        let value = split(rest)
            .map_err(|e| Error::BadQuote(format!("line {}: {}", n + 1, e)))?
            .join(" ");

        if set.find(key).is_some_and(|o| o.is_flag()) {
            match parse_bool(value.trim()) {
                Some(true) => args.push(switch),
                Some(false) => debug!(line = n + 1, key, "flag turned off"),
                None => {
                    return Err(Error::BadLine {
                        line: n + 1,
                        msg: format!("'{}' is a flag, '{}' is not a boolean", key, value),
                    })
                }
            }
            continue;
        }

        if reads_as_switch(set, value.trim()) {
            return Err(Error::BadLine {
                line: n + 1,
                msg: format!("value '{}' of '{}' would be read as a switch", value, key),
            });
        }
        args.push(switch);
        args.push(value);
    }

    Ok(args)
}

/// True if the scanner would not take `token` as a plain value.
fn reads_as_switch(set: &OptionSet, token: &str) -> bool {
    let long = set.long_prefix();
    let short = set.short_prefix();
    (!long.is_empty() && token.starts_with(long))
        || (!short.is_empty() && token.starts_with(short) && token.len() > short.len())
}

/// Split `s` on whitespace, honouring single and double quotes and
/// backslash escapes.
pub fn split(s: &str) -> Result<Vec<String>> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            } else if c == '\\' {
                match chars.next() {
                    None => return Err(Error::BadQuote("unterminated backslash".to_string())),
                    Some(next) => {
                        if next != q && next != '\\' {
                            current.push('\\');
                        }
                        current.push(next);
                    }
                }
            } else {
                current.push(c);
            }
        } else if c.is_whitespace() {
            if in_token {
                args.push(std::mem::take(&mut current));
                in_token = false;
            }
        } else {
            in_token = true;
            match c {
                '"' | '\'' => quote = Some(c),
                '\\' => match chars.next() {
                    None => return Err(Error::BadQuote("unterminated backslash".to_string())),
                    Some(next) => current.push(next),
                },
                _ => current.push(c),
            }
        }
    }

    if let Some(q) = quote {
        return Err(Error::BadQuote(format!("unterminated {} quote", q)));
    }
    if in_token {
        args.push(current);
    }

    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn split_plain_words() {
        assert_eq!(split("  a b\tc  ").unwrap(), vec!["a", "b", "c"]);
        assert!(split("").unwrap().is_empty());
    }

    #[test]
    fn split_quotes() {
        assert_eq!(
            split(r#""Alice Smith" 'x y' z"#).unwrap(),
            vec!["Alice Smith", "x y", "z"]
        );
        assert_eq!(split(r#""""#).unwrap(), vec![""]);
    }

    #[test]
    fn split_escapes() {
        assert_eq!(split(r"a\ b").unwrap(), vec!["a b"]);
        assert_eq!(split(r#""say \"hi\"""#).unwrap(), vec![r#"say "hi""#]);
        assert_eq!(split(r#""a\nb""#).unwrap(), vec![r"a\nb"]);
    }

    #[test]
    fn split_unterminated() {
        assert!(matches!(split("\"open"), Err(Error::BadQuote(_))));
        assert!(matches!(split("trailing\\"), Err(Error::BadQuote(_))));
    }

    fn set() -> OptionSet {
        OptionSet::new("prog")
            .add('v', "verbose", "", false)
            .add('c', "count", "", 1)
            .add('n', "name", "", "")
            .add('r', "ratio", "", 0.5)
            .add('o', "output", "", "")
    }

    #[test]
    fn parse_lines() {
        let content = "# settings\n\
                       verbose\n\
                       \n\
                       count = 3\n\
                       name \"Alice Smith\"\n\
                       ratio=0.25\n";
        assert_eq!(
            parse(content, &set()).unwrap(),
            vec![
                "--verbose",
                "--count",
                "3",
                "--name",
                "Alice Smith",
                "--ratio",
                "0.25"
            ]
        );
    }

    #[test]
    fn parse_uses_set_prefix() {
        let set = set().long_switch("//");
        assert_eq!(parse("count = 1", &set).unwrap(), vec!["//count", "1"]);
    }

    #[test]
    fn parse_skips_keyless_lines() {
        assert_eq!(parse("= 4\nquiet", &set()).unwrap(), vec!["--quiet"]);
    }

    #[test]
    fn flag_values_are_booleans() {
        assert_eq!(parse("verbose = true", &set()).unwrap(), vec!["--verbose"]);
        assert_eq!(parse("v = 1", &set()).unwrap(), vec!["--v"]);
        assert!(parse("verbose = false", &set()).unwrap().is_empty());
        assert!(parse("verbose \"F\"", &set()).unwrap().is_empty());
    }

    #[test]
    fn flag_with_non_boolean_value() {
        match parse("count = 2\nverbose = loud", &set()) {
            Err(Error::BadLine { line, msg }) => {
                assert_eq!(line, 2);
                assert!(msg.contains("'verbose' is a flag"), "{}", msg);
            }
            other => panic!("expected bad line, got {:?}", other),
        }
    }

    #[test]
    fn switch_like_value_is_rejected() {
        for content in ["name = -x", "name = --count", "# c\nname '--'", "ratio = -0.5"] {
            assert!(
                matches!(parse(content, &set()), Err(Error::BadLine { .. })),
                "{}",
                content
            );
        }
        match parse("\nname = -x", &set()) {
            Err(e) => assert_eq!(e.to_string(), "line 2: value '-x' of 'name' would be read as a switch"),
            Ok(args) => panic!("unexpected {:?}", args),
        }
    }

    #[test]
    fn lone_dash_value_is_kept() {
        assert_eq!(parse("output = -", &set()).unwrap(), vec!["--output", "-"]);
    }

    #[test]
    fn unknown_keys_pass_through() {
        assert_eq!(parse("bogus = 3", &set()).unwrap(), vec!["--bogus", "3"]);
    }

    #[test]
    fn parse_reports_line_of_bad_quote() {
        match parse("a\nb = 'oops", &set()) {
            Err(Error::BadQuote(msg)) => assert!(msg.starts_with("line 2:"), "{}", msg),
            other => panic!("expected bad quote, got {:?}", other),
        }
    }

    #[test]
    fn read_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "count = 7").unwrap();
        writeln!(file, "# done").unwrap();
        file.flush().unwrap();
        assert_eq!(read(file.path(), &set()).unwrap(), vec!["--count", "7"]);
    }

    #[test]
    fn read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let r = read(dir.path().join("absent.conf"), &set());
        assert!(matches!(r, Err(Error::Io(_))));
    }
}
