//! Session log with rotation.
//!
//! Records each state change of a session to an append-only file and rotates
//! it when it grows past a configurable line limit.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::config::DEFAULT_LOG_MAX_LINES;

/// File logger for one application session.
pub struct SessionLogger {
    /// Path to the log file.
    pub path: PathBuf,
    /// Maximum lines before rotation.
    pub max_lines: usize,
}

impl SessionLogger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_lines: DEFAULT_LOG_MAX_LINES,
        }
    }

    /// Create a logger with a custom max lines setting.
    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines;
        self
    }

    /// Write a log entry.
    ///
    /// Format: `YYYY-MM-DD HH:MM:SS | <action> | <message>`
    pub fn log(&self, action: &str, message: &str) -> io::Result<()> {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        self.append(&format!("{} | {} | {}\n", timestamp, action, message))?;
        self.rotate_if_needed()
    }

    /// Write a separator for a new session.
    pub fn log_session_start(&self, mode: &str) -> io::Result<()> {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let separator = format!(
            "\n======================================================================\n\
             === taskpad ({}) - Session Started at {} ===\n\
             ======================================================================\n\n",
            mode, timestamp
        );
        self.append(&separator)
    }

    fn append(&self, text: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(text.as_bytes())?;
        file.flush()
    }

    fn rotate_if_needed(&self) -> io::Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        if count_lines(&self.path)? <= self.max_lines {
            return Ok(());
        }
        rotate_log(&self.path)
    }

}

/// Count lines in a file.
pub fn count_lines(path: &Path) -> io::Result<usize> {
    let reader = BufReader::new(File::open(path)?);
    Ok(reader.lines().count())
}

/// Rotate a log file.
///
/// Moves it to a timestamped backup and leaves an empty file behind. A
/// counter is appended when a backup from the same second already exists.
pub fn rotate_log(path: &Path) -> io::Result<()> {
    if !path.exists() {
        return Ok(());
    }

    let timestamp = Local::now().format("%Y%m%d-%H%M%S");
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("session.log");
    let mut backup_path = path.with_file_name(format!("{}.{}.bak", name, timestamp));
    let mut counter = 1;
    while backup_path.exists() {
        backup_path = path.with_file_name(format!("{}.{}-{}.bak", name, timestamp, counter));
        counter += 1;
    }

    fs::rename(path, &backup_path)?;
    File::create(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn backups(dir: &Path) -> Vec<PathBuf> {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.to_string_lossy().ends_with(".bak"))
            .collect()
    }

    #[test]
    fn test_logger_defaults() {
        let logger = SessionLogger::new("/tmp/taskpad/session.log");
        assert_eq!(logger.max_lines, DEFAULT_LOG_MAX_LINES);
        assert_eq!(logger.path, PathBuf::from("/tmp/taskpad/session.log"));
        assert_eq!(logger.with_max_lines(5).max_lines, 5);
    }

    #[test]
    fn test_log_line_format() {
        let temp = TempDir::new().unwrap();
        let logger = SessionLogger::new(temp.path().join("session.log"));

        logger.log("added", "#1 Buy milk (High)").unwrap();
        logger.log("deleted", "#1").unwrap();

        let content = fs::read_to_string(&logger.path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" | added | #1 Buy milk (High)"));
        assert!(lines[1].ends_with(" | deleted | #1"));
        // "YYYY-MM-DD HH:MM:SS" prefix
        assert_eq!(lines[0].find(" | "), Some(19));
    }

    #[test]
    fn test_session_start_banner() {
        let temp = TempDir::new().unwrap();
        let logger = SessionLogger::new(temp.path().join("session.log"));

        logger.log_session_start("tui").unwrap();

        let content = fs::read_to_string(&logger.path).unwrap();
        assert!(content.contains("======"));
        assert!(content.contains("taskpad (tui)"));
        assert!(content.contains("Session Started"));
    }

    #[test]
    fn test_logger_creates_directory() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("deep").join("nested").join("session.log");
        let logger = SessionLogger::new(&nested);

        logger.log("closed", "").unwrap();
        assert!(nested.exists());
    }

    #[test]
    fn test_count_lines() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test.log");

        fs::write(&path, "line1\nline2\nline3\n").unwrap();
        assert_eq!(count_lines(&path).unwrap(), 3);

        fs::write(&path, "").unwrap();
        assert_eq!(count_lines(&path).unwrap(), 0);
    }

    #[test]
    fn test_rotate_log_moves_content_to_backup() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test.log");

        fs::write(&path, "line1\nline2\n").unwrap();
        rotate_log(&path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "");
        let backups = backups(temp.path());
        assert_eq!(backups.len(), 1);
        assert_eq!(fs::read_to_string(&backups[0]).unwrap(), "line1\nline2\n");
    }

    #[test]
    fn test_rotate_log_nonexistent() {
        let temp = TempDir::new().unwrap();
        rotate_log(&temp.path().join("missing.log")).unwrap();
    }

    #[test]
    fn test_logger_rotation() {
        let temp = TempDir::new().unwrap();
        let logger = SessionLogger::new(temp.path().join("session.log")).with_max_lines(5);

        for i in 0..10 {
            logger.log("added", &format!("#{}", i)).unwrap();
        }

        let line_count = count_lines(&logger.path).unwrap();
        assert!(line_count <= 5, "Expected <= 5 lines, got {}", line_count);
        assert!(!backups(temp.path()).is_empty(), "Expected backup file to exist");
    }

    #[test]
    fn test_rotations_in_same_second_keep_every_line() {
        let temp = TempDir::new().unwrap();
        let logger = SessionLogger::new(temp.path().join("session.log")).with_max_lines(2);

        for i in 0..12 {
            logger.log("added", &format!("#{}", i)).unwrap();
        }

        let mut messages = Vec::new();
        for path in backups(temp.path()).iter().chain([&logger.path]) {
            for line in fs::read_to_string(path).unwrap().lines() {
                messages.push(line.rsplit(" | ").next().unwrap().to_string());
            }
        }
        messages.sort_by_key(|m| m[1..].parse::<u32>().unwrap());
        let expected: Vec<String> = (0..12).map(|i| format!("#{}", i)).collect();
        assert_eq!(messages, expected);
        assert!(backups(temp.path()).len() >= 3);
    }

    #[test]
    fn test_rotate_log_twice_keeps_both_backups() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test.log");

        fs::write(&path, "first\n").unwrap();
        rotate_log(&path).unwrap();
        fs::write(&path, "second\n").unwrap();
        rotate_log(&path).unwrap();

        let mut contents: Vec<String> = backups(temp.path())
            .iter()
            .map(|p| fs::read_to_string(p).unwrap())
            .collect();
        contents.sort();
        assert_eq!(contents, vec!["first\n", "second\n"]);
    }
}
