//! Tracing setup. Events go to stderr so they don't mix with downloaded output
//! or the summary line on stdout. While a progress bar is attached, each event
//! is written with the bar suspended so log lines don't tear through it.

use indicatif::ProgressBar;
use std::io;
use std::sync::Mutex;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

static ACTIVE_BAR: Mutex<Option<ProgressBar>> = Mutex::new(None);

pub fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(ProgressAwareStderr)
        .init();
}

/// Routes log output around `pb` until the returned guard is dropped.
pub fn attach_progress(pb: &ProgressBar) -> ProgressGuard {
    if let Ok(mut slot) = ACTIVE_BAR.lock() {
        *slot = Some(pb.clone());
    }
    ProgressGuard { _priv: () }
}

pub struct ProgressGuard {
    _priv: (),
}

impl Drop for ProgressGuard {
    fn drop(&mut self) {
        if let Ok(mut slot) = ACTIVE_BAR.lock() {
            *slot = None;
        }
    }
}

fn active_bar() -> Option<ProgressBar> {
    ACTIVE_BAR.lock().ok().and_then(|slot| slot.clone())
}

pub struct ProgressAwareStderr;

impl<'a> MakeWriter<'a> for ProgressAwareStderr {
    type Writer = ProgressAwareWriter<io::Stderr>;

    fn make_writer(&'a self) -> Self::Writer {
        ProgressAwareWriter(io::stderr())
    }
}

pub struct ProgressAwareWriter<W>(W);

impl<W: io::Write> io::Write for ProgressAwareWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match active_bar() {
            Some(pb) => pb.suspend(|| self.0.write(buf)),
            None => self.0.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}
