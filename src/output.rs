use owo_colors::OwoColorize;

/// Small wrapper around stderr printing to provide consistent, colored
/// user-facing messages. Colors are enabled only when stderr is a TTY and
/// `NO_COLOR` is unset or empty.
fn use_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
        return false;
    }
    atty::is(atty::Stream::Stderr)
}

/// Bold, for lines the user should not miss.
pub fn print_notice(msg: &str) {
    if use_color() {
        eprintln!("{}", msg.bold());
    } else {
        eprintln!("{}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if use_color() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if use_color() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

pub fn print_success(msg: &str) {
    if use_color() {
        eprintln!("{} {}", "ok:".green().bold(), msg);
    } else {
        eprintln!("ok: {}", msg);
    }
}
