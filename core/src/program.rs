/// Program name derived from `argv[0]`: the last path component, without a
/// trailing `.exe`. Backslash-separated paths are recognised first.
#[must_use]
pub fn program_name(argv0: &str) -> &str {
    let last = match argv0.rsplit_once('\\') {
        Some((_, tail)) => tail,
        None => argv0.rsplit('/').next().unwrap_or(argv0),
    };
    last.strip_suffix(".exe").unwrap_or(last)
}

/// Default config file name for a program: `<program>.yaml`.
#[must_use]
pub fn default_file_name(argv0: &str) -> String {
    format!("{}.yaml", program_name(argv0))
}

/// [`default_file_name`] for the running process.
#[must_use]
pub fn process_file_name() -> String {
    let argv0 = std::env::args_os()
        .next()
        .map(|arg| arg.to_string_lossy().into_owned())
        .unwrap_or_default();
    default_file_name(&argv0)
}
