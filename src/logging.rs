use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::app_dirs::AppDirs;

fn filter(verbose: bool) -> EnvFilter {
    let log_level = if verbose { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
}

fn open_log(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber. The terminal belongs to the UI, so events
/// go to a log file in the state dir. Returns the log path, or `None` when
/// no state dir could be resolved and logging stays off.
pub fn init(verbose: bool) -> io::Result<Option<PathBuf>> {
    let Some(path) = AppDirs::log_path() else {
        return Ok(None);
    };
    init_at(&path, verbose)?;
    Ok(Some(path))
}

/// Like [`init`] with an explicit log file.
pub fn init_at(path: &Path, verbose: bool) -> io::Result<()> {
    let file = open_log(path)?;

    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
    {
        warn!(%err, path = %path.display(), "log subscriber already installed");
    }

    Ok(())
}
