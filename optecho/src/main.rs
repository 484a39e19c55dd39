mod arguments;
mod error;

use std::io::{self, Write};

use arguments::Cmdline;
use error::{yourfault, EchoError, Result};

fn print_report(cmd: &Cmdline, out: &mut dyn Write) -> io::Result<()> {
    for (name, value) in &cmd.events {
        write!(out, "match {}={}\n", name, value)?;
    }

    write!(out, "remainder:")?;
    for arg in &cmd.remainder {
        write!(out, " {}", arg)?;
    }
    write!(out, "\n")?;

    if cmd.verbose {
        write!(
            out,
            "settings: name={} count={} ratio={} quiet={}\n",
            cmd.name, cmd.count, cmd.ratio, cmd.quiet
        )?;
    }

    if !cmd.quiet {
        for _ in 0..cmd.count {
            write!(out, "hello, {}\n", cmd.name)?;
        }
    }
    Ok(())
}

fn run(argv: &[String]) -> Result<()> {
    let set = arguments::option_set(arguments::strict_requested(argv));

    let cmd = match arguments::parse_args(&set, argv) {
        Ok(cmd) => cmd,
        Err(EchoError::Options(
            e @ (optarg::Error::UnknownOption(_) | optarg::Error::MissingValue(_)),
        )) => set.exit_on_error(&e),
        Err(e) => return Err(e),
    };

    if cmd.help {
        set.print_usage()?;
        return Ok(());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_report(&cmd, &mut out)?;
    out.flush()?;
    Ok(())
}

fn main() {
    let argv: Vec<String> = std::env::args().collect();
    if let Err(e) = run(&argv) {
        yourfault(&format!("optecho: {}", e));
    }
}
