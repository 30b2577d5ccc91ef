//! Raw inbound frame archive.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

/// Receives every raw inbound frame.
pub trait FrameSink {
    fn record(&mut self, since_event: f64, raw: &str);
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn record(&mut self, _since_event: f64, _raw: &str) {}
}

/// Writes frames as `<n>.txt` into a directory once the triggering event
/// has happened (`since_event > 0`). Numbering continues from the number of
/// files already in the directory, and never overwrites an existing file.
///
/// Write failures are logged and the frame is dropped.
#[derive(Debug)]
pub struct DirectorySink {
    dir: PathBuf,
    next: usize,
    written: usize,
}

impl DirectorySink {
    /// Creates the directory if needed.
    pub fn create(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        let next = fs::read_dir(&dir)?
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
            .count();
        info!("Dumping frames to {} from {next}.txt", dir.display());
        Ok(Self {
            dir,
            next,
            written: 0,
        })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Frames written by this sink.
    #[must_use]
    pub fn written(&self) -> usize {
        self.written
    }
}

impl FrameSink for DirectorySink {
    fn record(&mut self, since_event: f64, raw: &str) {
        if since_event <= 0.0 {
            return;
        }
        let mut path = self.dir.join(format!("{}.txt", self.next));
        while path.exists() {
            self.next += 1;
            path = self.dir.join(format!("{}.txt", self.next));
        }
        match fs::write(&path, raw) {
            Ok(()) => {
                self.next += 1;
                self.written += 1;
            }
            Err(e) => warn!("failed to dump frame to {}: {e}", path.display()),
        }
    }
}
