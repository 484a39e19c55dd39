use optarg::{argfile, Dangling, Matches, OptionSet};
use tracing::debug;

use crate::error::{EchoError, Result};

#[derive(Debug)]
pub struct Cmdline {
    /// `(option, value)` per match, in command-line order.
    pub events: Vec<(String, String)>,
    pub remainder: Vec<String>,
    pub name: String,
    pub count: i64,
    pub ratio: f64,
    pub verbose: bool,
    pub quiet: bool,
    pub help: bool,
    pub args_file: Option<String>,
}

pub fn option_set(strict: bool) -> OptionSet {
    let policy = if strict {
        Dangling::Error
    } else {
        Dangling::Drop
    };
    OptionSet::new("optecho")
        .dangling(policy)
        .header("General")
        .add('n', "name", "Who to greet.", "world")
        .add('c', "count", "How many times to print the greeting.", 1)
        .add(
            'r',
            "ratio",
            "Scaling factor echoed back in the settings line. Values that do \
             not parse as a number are replaced by the default.",
            0.5,
        )
        .add(
            'f',
            "args-file",
            "Read more options from this file, one 'key = value' per line.",
            "",
        )
        .add(
            's',
            "strict",
            "Reject options that are left without a value. Only honoured as \
             the first argument.",
            false,
        )
        .add('h', "help", "Show this help.", false)
        .header("Output")
        .add('v', "verbose", "Also print the coerced settings.", false)
        .add('q', "quiet", "Suppress the greeting.", false)
}

/// `--strict` has to be known before the option set is built.
pub fn strict_requested(argv: &[String]) -> bool {
    matches!(argv.get(1).map(|a| a.trim()), Some("--strict") | Some("-s"))
}

fn collect(matches: &Matches<'_>) -> optarg::Result<Cmdline> {
    let args_file = matches
        .value_of("args-file")
        .filter(|f| !f.is_empty())
        .map(|f| f.to_string());

    Ok(Cmdline {
        events: matches
            .iter()
            .map(|m| (m.name().to_string(), m.value().to_string()))
            .collect(),
        remainder: matches.remainder().to_vec(),
        name: matches.get("name")?,
        count: matches.get("count")?,
        ratio: matches.get("ratio")?,
        verbose: matches.get("verbose")?,
        quiet: matches.get("quiet")?,
        help: matches.get("help")?,
        args_file,
    })
}

/// Scan `argv`. If it names an args file, the file's options are
/// appended and the whole vector is scanned again. Args files do not
/// nest.
pub fn parse_args(set: &OptionSet, argv: &[String]) -> Result<Cmdline> {
    let first = collect(&set.parse(argv.iter().cloned())?)?;
    let path = match first.args_file {
        Some(ref path) => path.clone(),
        None => return Ok(first),
    };

    let extra = argfile::read(&path, set)?;
    debug!(path = %path, tokens = extra.len(), "splicing args file");

    let mut full = argv.to_vec();
    full.extend(extra);
    let cmd = collect(&set.parse(full)?)?;
    if file_count(&cmd) > file_count(&first) {
        return Err(EchoError::NestedArgsFile(path));
    }
    Ok(cmd)
}

fn file_count(cmd: &Cmdline) -> usize {
    cmd.events.iter().filter(|(name, _)| name == "args-file").count()
}
