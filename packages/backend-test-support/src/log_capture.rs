//! In-memory log capture for asserting log side effects.
//!
//! Installs a JSON `fmt` subscriber as the thread-local default, so it
//! sees everything logged on the test's thread (actix test runtimes are
//! single-threaded) without touching the global subscriber.

use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;
use tracing::subscriber::DefaultGuard;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
pub struct LogCapture {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture until the returned guard is dropped.
    #[must_use = "capture stops when the guard is dropped"]
    pub fn install(&self) -> DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .json()
            .with_max_level(Level::DEBUG)
            .with_writer(self.clone())
            .without_time()
            .with_ansi(false)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        self.buf.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Every captured record, one JSON object per line.
    pub fn records(&self) -> Vec<Value> {
        let bytes = self.lock().clone();
        String::from_utf8_lossy(&bytes)
            .lines()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }

    /// Records at `level` (e.g. `"ERROR"`) whose rendered JSON contains
    /// `needle`.
    pub fn matching(&self, level: &str, needle: &str) -> Vec<Value> {
        self.records()
            .into_iter()
            .filter(|r| r["level"].as_str() == Some(level))
            .filter(|r| r.to_string().contains(needle))
            .collect()
    }

    pub fn count(&self, level: &str, needle: &str) -> usize {
        self.matching(level, needle).len()
    }

    pub fn contains(&self, needle: &str) -> bool {
        String::from_utf8_lossy(&self.lock()).contains(needle)
    }
}

pub struct CaptureWriter {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl io::Write for CaptureWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter {
            buf: Arc::clone(&self.buf),
        }
    }
}
