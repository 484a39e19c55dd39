use tracing::debug;

use crate::error::{Error, Result};
use crate::opt::{Entry, IntoValue, Opt};
use crate::scan::{Dangling, Matches, Scan};

/// Ordered option registry plus the settings that govern scanning and
/// usage output. Declare everything first, then scan; a scan borrows the
/// set immutably.
#[derive(Debug, Clone)]
pub struct OptionSet {
    entries: Vec<Entry>,
    short_switch: String,
    long_switch: String,
    usage_info: String,
    dangling: Dangling,
}

impl OptionSet {
    pub fn new(program: &str) -> Self {
        OptionSet {
            entries: Vec::new(),
            short_switch: "-".to_string(),
            long_switch: "--".to_string(),
            usage_info: format!("Usage: {} [options]:", program),
            dangling: Dangling::Drop,
        }
    }

    /// Append a section header. Headers only show up in usage output.
    pub fn header(mut self, title: &str) -> Self {
        self.entries.push(Entry::Header(title.to_string()));
        self
    }

    /// Append an option. Names are not checked for uniqueness; lookups
    /// return the first declared match.
    pub fn add<T: IntoValue>(self, short: char, name: &str, description: &str, default: T) -> Self {
        self.option(
            Opt::new(name)
                .short(short)
                .description(description)
                .default_val(default),
        )
    }

    pub fn option(mut self, opt: Opt) -> Self {
        self.entries.push(Entry::Option(opt));
        self
    }

    /// Prefix introducing a short switch or cluster (default `-`).
    pub fn short_switch(mut self, prefix: &str) -> Self {
        self.short_switch = prefix.to_string();
        self
    }

    /// Prefix introducing a long switch (default `--`).
    pub fn long_switch(mut self, prefix: &str) -> Self {
        self.long_switch = prefix.to_string();
        self
    }

    /// Replace the banner line printed above the option listing.
    pub fn usage_info(mut self, banner: &str) -> Self {
        self.usage_info = banner.to_string();
        self
    }

    /// How to treat an option left without a value.
    pub fn dangling(mut self, policy: Dangling) -> Self {
        self.dangling = policy;
        self
    }

    /// Current short switch prefix.
    pub fn short_prefix(&self) -> &str {
        &self.short_switch
    }

    /// Current long switch prefix.
    pub fn long_prefix(&self) -> &str {
        &self.long_switch
    }

    /// Line printed above the option listing.
    pub fn banner(&self) -> &str {
        &self.usage_info
    }

    /// Current [`Dangling`] policy.
    pub fn dangling_policy(&self) -> Dangling {
        self.dangling
    }

    /// All entries, headers included, in declaration order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Declared options in declaration order.
    pub fn options(&self) -> impl Iterator<Item = &Opt> {
        self.entries.iter().filter_map(|e| match e {
            Entry::Option(opt) => Some(opt),
            Entry::Header(_) => None,
        })
    }

    /// First option whose long name or short char equals `token`.
    pub fn find(&self, token: &str) -> Option<&Opt> {
        self.options().find(|o| o.answers_to(token))
    }

    /// Lazily scan `args`. The first element is the program name and is
    /// skipped.
    pub fn scan<I, S>(&self, args: I) -> Scan<'_, I::IntoIter>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Scan::new(self, args.into_iter())
    }

    /// Scan `args` to completion.
    pub fn parse<I, S>(&self, args: I) -> Result<Matches<'_>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut scan = self.scan(args);
        let mut matches = Vec::new();
        for m in scan.by_ref() {
            matches.push(m?);
        }
        debug!(
            matched = matches.len(),
            remainder = scan.remainder().len(),
            "scan complete"
        );
        Ok(Matches::new(self, matches, scan.into_remainder()))
    }

    /// Scan the process arguments.
    pub fn parse_env(&self) -> Result<Matches<'_>> {
        self.parse(std::env::args())
    }

    /// Like [`OptionSet::parse`], but a scan failure is fatal.
    pub fn parse_or_exit<I, S>(&self, args: I) -> Matches<'_>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match self.parse(args) {
            Ok(matches) => matches,
            Err(e) => self.exit_on_error(&e),
        }
    }

    /// Report `err` on stderr, print the usage listing and exit with
    /// status 1.
    pub fn exit_on_error(&self, err: &Error) -> ! {
        eprintln!("{}", err);
        // exiting either way
        let _ = self.print_usage();
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> OptionSet {
        OptionSet::new("prog")
            .header("General")
            .add('v', "verbose", "Be chatty.", false)
            .add('c', "count", "How many.", 5)
            .header("Output")
            .add('o', "output", "Where to write.", "out.txt")
    }

    #[test]
    fn defaults() {
        let set = OptionSet::new("prog");
        assert_eq!(set.short_prefix(), "-");
        assert_eq!(set.long_prefix(), "--");
        assert_eq!(set.banner(), "Usage: prog [options]:");
        assert_eq!(set.dangling_policy(), Dangling::Drop);
    }

    #[test]
    fn settings_are_rebindable() {
        let set = OptionSet::new("prog")
            .short_switch("/")
            .long_switch("//")
            .usage_info("prog FILE...")
            .dangling(Dangling::Error);
        assert_eq!(set.short_prefix(), "/");
        assert_eq!(set.long_prefix(), "//");
        assert_eq!(set.banner(), "prog FILE...");
        assert_eq!(set.dangling_policy(), Dangling::Error);
    }

    #[test]
    fn options_skip_headers() {
        let set = sample();
        assert_eq!(set.entries().len(), 5);
        let names: Vec<&str> = set.options().map(|o| o.name()).collect();
        assert_eq!(names, vec!["verbose", "count", "output"]);
    }

    #[test]
    fn find_by_long_and_short() {
        let set = sample();
        assert_eq!(set.find("count").map(|o| o.name()), Some("count"));
        assert_eq!(set.find("o").map(|o| o.name()), Some("output"));
        assert!(set.find("missing").is_none());
    }

    #[test]
    fn headers_never_match() {
        let set = sample();
        assert!(set.find("General").is_none());
        assert!(set.find("Output").is_none());
    }

    #[test]
    fn parse_or_exit_returns_matches() {
        let set = sample();
        let m = set.parse_or_exit(["prog", "-v", "-o", "x.txt", "rest"]);
        assert!(m.is_present("verbose"));
        assert_eq!(m.value_of("output"), Some("x.txt"));
        assert_eq!(m.remainder(), ["rest"]);
    }

    #[test]
    fn first_declared_wins() {
        let set = OptionSet::new("prog")
            .add('x', "first", "", false)
            .add('x', "second", "", false);
        assert_eq!(set.find("x").map(|o| o.name()), Some("first"));
    }
}
