//! Native stand-ins for the browser widgets: analysis documents are written
//! to disk as standalone HTML files, and the form's widgets are drawn on the
//! terminal.

mod console;

pub use self::console::ConsoleView;

use crate::config::OutputConfig;
use crate::error::FormError;
use crate::form::{BrowsingContext, WindowOpener};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

// ── Window opener ─────────────────────────────────────────────────────────────

/// Opens "windows" as `<TICKER>-<timestamp>-<n>.html` files under the output
/// directory.
pub struct FileWindowOpener {
    dir: PathBuf,
    allow: bool,
    opens: usize,
    written: Arc<Mutex<Vec<PathBuf>>>,
}

impl FileWindowOpener {
    pub fn new(config: &OutputConfig) -> Self {
        Self {
            dir: config.dir.clone(),
            allow: config.allow_windows,
            opens: 0,
            written: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Documents that were completely written, oldest first.
    pub fn opened(&self) -> Vec<PathBuf> {
        self.written
            .lock()
            .map(|w| w.clone())
            .unwrap_or_default()
    }

    fn next_path(&mut self, title: &str) -> PathBuf {
        self.opens += 1;
        let stamp = Local::now().format("%Y%m%d-%H%M%S%.3f");
        // Sequence number keeps two opens in the same millisecond apart.
        self.dir
            .join(format!("{}-{}-{}.html", file_stem(title), stamp, self.opens))
    }
}

/// File-name-safe form of a window title. "BRK/B" → "BRK_B", "" → "analysis"
fn file_stem(title: &str) -> String {
    let stem: String = title
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if stem.is_empty() || stem.chars().all(|c| c == '.') {
        "analysis".to_string()
    } else {
        stem
    }
}

impl WindowOpener for FileWindowOpener {
    type Window = FileWindow;

    fn open_blank(&mut self, title: &str) -> Option<FileWindow> {
        if !self.allow {
            debug!("Window blocked by configuration");
            return None;
        }

        if let Err(e) = fs::create_dir_all(&self.dir) {
            warn!("Cannot open window in {:?}: {}", self.dir, e);
            return None;
        }

        let path = self.next_path(title);
        Some(FileWindow::new(path, Arc::clone(&self.written)))
    }
}

/// A document being written to disk. Writes are buffered and land as one
/// complete file on `close`; nothing touches the disk before that.
#[derive(Debug)]
pub struct FileWindow {
    path: PathBuf,
    buffer: String,
    closed: bool,
    written: Arc<Mutex<Vec<PathBuf>>>,
}

impl FileWindow {
    fn new(path: PathBuf, written: Arc<Mutex<Vec<PathBuf>>>) -> Self {
        Self {
            path,
            buffer: String::new(),
            closed: false,
            written,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BrowsingContext for FileWindow {
    fn write(&mut self, html: &str) -> Result<(), FormError> {
        if self.closed {
            return Err(FormError::Render(format!("{:?} is already closed", self.path)));
        }
        self.buffer.push_str(html);
        Ok(())
    }

    fn close(&mut self) -> Result<(), FormError> {
        if self.closed {
            return Ok(());
        }
        if let Err(e) = fs::write(&self.path, &self.buffer) {
            // Don't leave a truncated document behind.
            let _ = fs::remove_file(&self.path);
            return Err(e.into());
        }
        self.closed = true;

        if let Ok(mut written) = self.written.lock() {
            written.push(self.path.clone());
        }
        debug!("Wrote {} bytes to {:?}", self.buffer.len(), self.path);
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
