use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing_subscriber::EnvFilter;

/// Anything a finished report can be appended to.
pub trait ReportSink {
    fn append(&self, report: &str) -> std::io::Result<()>;
}

/// Append-only report file. Earlier runs are never touched.
pub struct ReportLog {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl ReportLog {
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;

        Ok(ReportLog {
            path,
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for ReportLog {
    fn append(&self, report: &str) -> std::io::Result<()> {
        let mut writer = self.writer.lock();
        writer.write_all(report.as_bytes())?;
        writer.flush()
    }
}

/// Collects reports in memory.
#[cfg(test)]
#[derive(Default)]
pub struct MemorySink {
    reports: Mutex<Vec<String>>,
}

#[cfg(test)]
impl MemorySink {
    pub fn reports(&self) -> Vec<String> {
        self.reports.lock().clone()
    }
}

#[cfg(test)]
impl ReportSink for MemorySink {
    fn append(&self, report: &str) -> std::io::Result<()> {
        self.reports.lock().push(report.to_string());
        Ok(())
    }
}

/// Diagnostics go to stderr so stdout carries only the report.
/// `COMPUTE_SALES_LOG` takes an `EnvFilter` directive; defaults to `warn`.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("COMPUTE_SALES_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
