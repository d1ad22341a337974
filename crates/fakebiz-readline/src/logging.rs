use std::io::{self, Write};
use std::sync::Mutex;

use indicatif::ProgressBar;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

/// Crates whose events reach the terminal by default.
const LOG_TARGETS: [&str; 4] = [
    "fakebiz",
    "fakebiz_core",
    "fakebiz_infrastructure",
    "fakebiz_interaction",
];

pub fn level_for_verbosity(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn build_filter_string(level: Level) -> String {
    let level = level.as_str().to_ascii_lowercase();
    LOG_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Spinner currently drawing on stderr, if any.
static ACTIVE_SPINNER: Mutex<Option<ProgressBar>> = Mutex::new(None);

fn active_spinner() -> Option<ProgressBar> {
    ACTIVE_SPINNER
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}

/// Routes log lines around `spinner` until [`detach_spinner`].
pub fn attach_spinner(spinner: &ProgressBar) {
    *ACTIVE_SPINNER
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(spinner.clone());
}

pub fn detach_spinner() {
    ACTIVE_SPINNER
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .take();
}

/// Stderr writer that hides the active spinner while a line is written.
#[derive(Clone, Copy, Default)]
pub struct SpinnerAwareStderr;

impl Write for SpinnerAwareStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match active_spinner() {
            Some(spinner) => spinner.suspend(|| io::stderr().write(buf)),
            None => io::stderr().write(buf),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match active_spinner() {
            Some(spinner) => spinner.suspend(|| io::stderr().write_all(buf)),
            None => io::stderr().write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

impl<'a> MakeWriter<'a> for SpinnerAwareStderr {
    type Writer = SpinnerAwareStderr;

    fn make_writer(&'a self) -> Self::Writer {
        *self
    }
}

/// Installs the stderr subscriber. `RUST_LOG` wins over `--verbose`.
pub fn init_logging(verbose: u8) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(build_filter_string(level_for_verbosity(verbose))));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(SpinnerAwareStderr)
        .try_init();
}
