use owo_colors::OwoColorize;

/// User-facing message printing, kept apart from tracing so summaries stay
/// readable at any log level. Labels are colored only when stdout is a TTY.
fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

pub fn print_info(msg: &str) {
    if is_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

/// Final summary line, e.g. "Fixed encoding for 3 files.".
/// Printed without a prefix so scripts can match it verbatim.
pub fn print_summary(msg: &str) {
    if is_tty() {
        println!("{}", msg.green().bold());
    } else {
        println!("{}", msg);
    }
}

/// List per-file failures after a run, one per line on stderr.
pub fn print_failures<'a, I>(failures: I)
where
    I: IntoIterator<Item = &'a crate::ops::FileFailure>,
{
    for f in failures {
        print_warn(&format!("{}: {}", f.path.display(), f.message));
    }
}
