//! Argument scanner.
//!
//! Tokens are classified left to right as long switches, short switch
//! clusters or plain tokens. Flags are emitted as soon as they are seen;
//! value-bearing options wait in a single pending slot for the next plain
//! token. Everything else goes to the remainder.

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::opt::{coerce, FromValue, Opt};
use crate::set::OptionSet;

/// What to do with a value-bearing option that never gets its value,
/// either because input ended or because another switch displaced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dangling {
    /// Forget it silently.
    #[default]
    Drop,
    /// Report `Error::MissingValue`.
    Error,
}

// ============================================================================
// Match
// ============================================================================

/// One matched switch and the value it captured (`"true"` for flags).
#[derive(Debug, Clone)]
pub struct Match<'a> {
    opt: &'a Opt,
    value: String,
}

impl<'a> Match<'a> {
    pub fn opt(&self) -> &'a Opt {
        self.opt
    }

    pub fn name(&self) -> &'a str {
        self.opt.name()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// The captured value, coerced to `T`. Unparseable values fall back to
    /// the declared default.
    pub fn get<T: FromValue>(&self) -> Result<T> {
        coerce(self.opt.name(), Some(&self.value), self.opt.default_value())
    }
}

// ============================================================================
// Scan — lazy scanner
// ============================================================================

/// Lazy scan over an argument vector, created by [`OptionSet::scan`].
/// Yields matches in input order and stops after the first error.
pub struct Scan<'a, I> {
    set: &'a OptionSet,
    args: I,
    pending: Option<&'a Opt>,
    queue: VecDeque<Result<Match<'a>>>,
    remainder: Vec<String>,
    done: bool,
}

impl<'a, I, S> Scan<'a, I>
where
    I: Iterator<Item = S>,
    S: Into<String>,
{
    pub(crate) fn new(set: &'a OptionSet, mut args: I) -> Self {
        // program name
        let _ = args.next();
        Scan {
            set,
            args,
            pending: None,
            queue: VecDeque::new(),
            remainder: Vec::new(),
            done: false,
        }
    }
}

impl<'a, I> Scan<'a, I> {
    /// Tokens seen so far that were neither switches nor switch values.
    pub fn remainder(&self) -> &[String] {
        &self.remainder
    }

    /// Consume the scan, keeping only the remainder.
    pub fn into_remainder(self) -> Vec<String> {
        self.remainder
    }

    fn step(&mut self, raw: &str) {
        let set = self.set;
        let token = raw.trim();
        if token.is_empty() {
            return;
        }

        let long = set.long_prefix();
        if !long.is_empty() && token.starts_with(long) {
            let name = token[long.len()..].trim();
            if name.is_empty() {
                self.push_remainder(long);
                return;
            }
            match set.find(name) {
                Some(opt) => self.switch(opt),
                None => self.unknown(format!("{}{}", long, name)),
            }
            return;
        }

        // A bare short prefix is a plain token, so `--output -` works.
        let short = set.short_prefix();
        if !short.is_empty() && token.starts_with(short) && token.len() > short.len() {
            let cluster = token[short.len()..].trim();
            let mut buf = [0u8; 4];
            for c in cluster.chars() {
                match set.find(c.encode_utf8(&mut buf)) {
                    Some(opt) => self.switch(opt),
                    None => {
                        self.unknown(format!("{}{}", short, c));
                        return;
                    }
                }
            }
            return;
        }

        match self.pending.take() {
            Some(opt) => {
                debug!(option = opt.name(), value = token, "option value assigned");
                self.queue.push_back(Ok(Match {
                    opt,
                    value: token.to_string(),
                }));
            }
            None => self.push_remainder(token),
        }
    }

    fn switch(&mut self, opt: &'a Opt) {
        if let Some(prev) = self.pending.take() {
            self.displace(prev);
        }
        if opt.is_flag() {
            debug!(option = opt.name(), "flag set");
            self.queue.push_back(Ok(Match {
                opt,
                value: "true".to_string(),
            }));
        } else {
            debug!(option = opt.name(), "waiting for value");
            self.pending = Some(opt);
        }
    }

    fn displace(&mut self, opt: &'a Opt) {
        match self.set.dangling_policy() {
            Dangling::Drop => {
                debug!(option = opt.name(), "dropping option without a value");
            }
            Dangling::Error => {
                let name = self.switch_text(opt);
                self.queue.push_back(Err(Error::MissingValue(name)));
            }
        }
    }

    fn unknown(&mut self, switch: String) {
        debug!(switch = %switch, "unknown option");
        self.queue.push_back(Err(Error::UnknownOption(switch)));
    }

    fn push_remainder(&mut self, token: &str) {
        trace!(token, "remainder");
        self.remainder.push(token.to_string());
    }

    /// The option as a user would have typed it.
    fn switch_text(&self, opt: &Opt) -> String {
        match opt.short_name() {
            Some(c) if opt.name().is_empty() => format!("{}{}", self.set.short_prefix(), c),
            _ => format!("{}{}", self.set.long_prefix(), opt.name()),
        }
    }
}

impl<'a, I, S> Iterator for Scan<'a, I>
where
    I: Iterator<Item = S>,
    S: Into<String>,
{
    type Item = Result<Match<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.queue.pop_front() {
                if item.is_err() {
                    self.queue.clear();
                    self.done = true;
                }
                return Some(item);
            }
            if self.done {
                return None;
            }
            match self.args.next() {
                Some(arg) => {
                    let arg: String = arg.into();
                    self.step(&arg);
                }
                None => {
                    self.done = true;
                    if let Some(opt) = self.pending.take() {
                        self.displace(opt);
                    }
                }
            }
        }
    }
}

// ============================================================================
// Matches — result of a full scan
// ============================================================================

#[derive(Debug)]
pub struct Matches<'a> {
    set: &'a OptionSet,
    matches: Vec<Match<'a>>,
    remainder: Vec<String>,
}

impl<'a> Matches<'a> {
    pub(crate) fn new(set: &'a OptionSet, matches: Vec<Match<'a>>, remainder: Vec<String>) -> Self {
        Matches {
            set,
            matches,
            remainder,
        }
    }

    /// Matches in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, Match<'a>> {
        self.matches.iter()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn remainder(&self) -> &[String] {
        &self.remainder
    }

    fn last_for(&self, name: &str) -> Option<&Match<'a>> {
        let opt = self.set.find(name)?;
        self.matches
            .iter()
            .rev()
            .find(|m| std::ptr::eq(m.opt, opt))
    }

    /// True if the option was matched at least once.
    pub fn is_present(&self, name: &str) -> bool {
        self.last_for(name).is_some()
    }

    /// Value from the last occurrence of the option.
    pub fn value_of(&self, name: &str) -> Option<&str> {
        self.last_for(name).map(|m| m.value())
    }

    /// Typed value of the option, falling back to its declared default
    /// when it was not given or does not parse.
    pub fn get<T: FromValue>(&self, name: &str) -> Result<T> {
        let opt = self
            .set
            .find(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;
        coerce(opt.name(), self.value_of(name), opt.default_value())
    }
}

impl<'m, 'a> IntoIterator for &'m Matches<'a> {
    type Item = &'m Match<'a>;
    type IntoIter = std::slice::Iter<'m, Match<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.iter()
    }
}
