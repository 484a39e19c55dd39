//! Usage listing: an aligned label column followed by word-wrapped
//! descriptions.

use std::io::{self, Write};

use crate::opt::{Entry, Opt};
use crate::set::OptionSet;

/// Total line width the listing is laid out for.
pub const SCREEN_WIDTH: usize = 80;

/// Word-wrap `text` to `width` columns, prefixing every line with
/// `indent` spaces. Words are never split; a word wider than `width`
/// gets a line of its own. Text that already fits comes back unchanged.
pub fn wrap(text: &str, width: usize, indent: usize) -> Vec<String> {
    let width = width.max(1);
    let pad = " ".repeat(indent);
    if text.chars().count() <= width {
        return vec![format!("{}{}", pad, text)];
    }

    let mut lines = Vec::new();
    let mut line = String::new();
    let mut len = 0;
    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if len > 0 && len + 1 + word_len > width {
            lines.push(format!("{}{}", pad, line));
            line.clear();
            len = 0;
        }
        if len > 0 {
            line.push(' ');
            len += 1;
        }
        line.push_str(word);
        len += word_len;
    }
    if !line.is_empty() || lines.is_empty() {
        lines.push(format!("{}{}", pad, line));
    }
    lines
}

impl OptionSet {
    /// Left column text for `opt`, e.g. `--count, -c: `.
    fn label(&self, opt: &Opt) -> String {
        let long = self.long_prefix();
        let short = self.short_prefix();
        match opt.short_name() {
            Some(c) if opt.name().is_empty() => format!("{}{}: ", short, c),
            Some(c) => format!("{}{}, {}{}: ", long, opt.name(), short, c),
            None => format!("{}{}: ", long, opt.name()),
        }
    }

    /// Width of the label column: widest label plus one column of margin.
    fn label_offset(&self) -> usize {
        let widest = self
            .options()
            .map(|o| self.label(o).chars().count())
            .max()
            .unwrap_or(0);
        widest + 1
    }

    /// Write the banner and the option listing to `out`.
    pub fn write_usage<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}\n", self.banner())?;

        let offset = self.label_offset();
        let width = SCREEN_WIDTH.saturating_sub(offset);

        for entry in self.entries() {
            let opt = match entry {
                Entry::Header(title) => {
                    write!(out, "\n[{}]\n", title)?;
                    continue;
                }
                Entry::Option(opt) => opt,
            };

            write!(out, "{:>width$}", self.label(opt), width = offset)?;

            let mut lines = wrap(&describe(opt), width, offset).into_iter();
            if let Some(first) = lines.next() {
                write!(out, "{}\n", first.trim())?;
            }
            for line in lines {
                write!(out, "{}\n", line)?;
            }
        }
        Ok(())
    }

    /// The listing as a string.
    pub fn usage(&self) -> String {
        let mut buf = Vec::new();
        // writing into a Vec cannot fail
        let _ = self.write_usage(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Write the listing to stdout.
    pub fn print_usage(&self) -> io::Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.write_usage(&mut out)?;
        out.flush()
    }
}

/// Description with the default appended. Flags never show one.
fn describe(opt: &Opt) -> String {
    if opt.is_flag() {
        return opt.help_text().to_string();
    }
    let default = opt.default_value().to_string();
    if default.is_empty() {
        opt.help_text().to_string()
    } else {
        format!("{} (defaults to: {})", opt.help_text(), default)
    }
}
