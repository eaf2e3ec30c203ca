//! Rotating file writer with size-based rotation and backup retention.
//!
//! Keeps the log file from growing without bound: once it passes the size
//! threshold it is renamed with a timestamp suffix and a fresh file is started.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Maximum file size before rotation (10 MiB).
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of backup files to retain after rotation.
const MAX_BACKUP_FILES: usize = 3;

/// Thread-safe rotating file writer.
///
/// The size is checked before each write. When it exceeds the limit the file
/// is renamed to `<name>.<unix_timestamp>` and backups beyond the retention
/// count are removed, oldest first.
pub struct FileWriter {
    file_path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    /// Opened on first write.
    writer: Mutex<Option<File>>,
}

impl FileWriter {
    /// Creates a writer with the default limits. The file is not opened until
    /// the first write.
    #[must_use]
    pub const fn new(file_path: PathBuf) -> Self {
        Self::with_limits(file_path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    #[must_use]
    pub const fn with_limits(file_path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            file_path,
            max_bytes,
            max_backups,
            writer: Mutex::new(None),
        }
    }

    /// Appends `buf`, rotating first if the file is over the limit.
    ///
    /// # Errors
    ///
    /// Fails on permission or disk errors, or if the lock was poisoned.
    pub fn append(&self, buf: &[u8]) -> io::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("log writer lock poisoned: {e}")))?;

        self.check_and_rotate(&mut writer)?;

        if writer.is_none() {
            *writer = Some(OpenOptions::new().create(true).append(true).open(&self.file_path)?);
        }
        let Some(file) = writer.as_mut() else {
            return Err(io::Error::new(io::ErrorKind::Other, "log file not open"));
        };

        file.write_all(buf)?;
        file.flush()
    }

    fn check_and_rotate(&self, writer: &mut Option<File>) -> io::Result<()> {
        if let Ok(metadata) = fs::metadata(&self.file_path) {
            if metadata.len() > self.max_bytes {
                *writer = None;
                self.rotate_files()?;
            }
        }
        Ok(())
    }

    fn rotate_files(&self) -> io::Result<()> {
        let mut timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_nanos();

        let backup = loop {
            let mut name = self.file_path.clone().into_os_string();
            name.push(format!(".{timestamp}"));
            let candidate = PathBuf::from(name);
            if !candidate.exists() {
                break candidate;
            }
            timestamp += 1;
        };

        if self.file_path.exists() {
            fs::rename(&self.file_path, backup)?;
        }

        self.cleanup_old_backups()
    }

    /// Removes `<name>.*` backups beyond the retention limit, keeping the newest.
    ///
    /// Individual deletion errors are ignored.
    fn cleanup_old_backups(&self) -> io::Result<()> {
        let Some(parent_dir) = self.file_path.parent() else {
            return Ok(());
        };
        let parent_dir = if parent_dir.as_os_str().is_empty() {
            std::path::Path::new(".")
        } else {
            parent_dir
        };
        let Some(prefix) = self
            .file_path
            .file_name()
            .and_then(|s| s.to_str())
            .map(|name| format!("{name}."))
        else {
            return Ok(());
        };

        let mut backups: Vec<(u128, PathBuf)> = fs::read_dir(parent_dir)?
            .filter_map(std::result::Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().into_string().ok()?;
                let stamp = name.strip_prefix(&prefix)?.parse::<u128>().ok()?;
                Some((stamp, entry.path()))
            })
            .collect();

        backups.sort_by(|a, b| b.0.cmp(&a.0));

        for (_, old_backup) in backups.iter().skip(self.max_backups) {
            let _ = fs::remove_file(old_backup);
        }

        Ok(())
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("file_path", &self.file_path)
            .field("max_bytes", &self.max_bytes)
            .finish_non_exhaustive()
    }
}

/// Cloneable `io::Write` handle handed out to the fmt layer per event.
#[derive(Debug, Clone)]
pub struct LogHandle(pub Arc<FileWriter>);

impl Write for LogHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.append(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
