use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Entries kept in `activity.log`; older ones are dropped on write.
pub const DEFAULT_MAX_ENTRIES: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn marker(self) -> &'static str {
        match self {
            LogLevel::Info => "🟢",
            LogLevel::Warn => "🟡",
            LogLevel::Error => "🔴",
        }
    }
}

/// One line of `activity.log`, stored as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    pub event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.level.marker(),
            self.event,
            self.host.as_deref().unwrap_or("*"),
        )?;
        if let Some(details) = &self.details {
            write!(f, " {details}")?;
        }
        Ok(())
    }
}

/// Activity log of refreshes and failures, kept in the workflow data
/// directory so problems can be looked at after the fact. Bounded to the
/// most recent `max_entries` entries.
pub struct ActivityLogger {
    log_path: PathBuf,
    max_entries: usize,
}

impl ActivityLogger {
    pub fn new(dir: impl AsRef<Path>) -> crate::Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        Ok(Self {
            log_path: dir.join("activity.log"),
            max_entries: DEFAULT_MAX_ENTRIES,
        })
    }

    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries.max(1);
        self
    }

    pub fn log(
        &self,
        level: LogLevel,
        host: Option<&str>,
        event: &str,
        details: Option<&str>,
    ) -> crate::Result<()> {
        let entry = LogEntry {
            timestamp: Utc::now(),
            level,
            host: host.map(|h| h.to_string()),
            event: event.to_string(),
            details: details.map(|d| d.to_string()),
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;
        writeln!(file, "{}", serde_json::to_string(&entry)?)?;
        drop(file);

        self.trim()
    }

    /// Keep only the newest `max_entries` lines.
    fn trim(&self) -> crate::Result<()> {
        let content = fs::read_to_string(&self.log_path)?;
        let lines: Vec<&str> = content.lines().collect();
        if lines.len() <= self.max_entries {
            return Ok(());
        }

        let mut kept = lines[lines.len() - self.max_entries..].join("\n");
        kept.push('\n');
        let tmp = self.log_path.with_extension(format!("log.{}.part", std::process::id()));
        fs::write(&tmp, kept)?;
        fs::rename(&tmp, &self.log_path)?;
        Ok(())
    }

    /// Matching entries, most recent first. Lines that do not parse are
    /// skipped.
    pub fn read_logs(&self, host_filter: Option<&str>, errors_only: bool) -> crate::Result<Vec<LogEntry>> {
        if !self.log_path.exists() {
            return Ok(vec![]);
        }

        let content = fs::read_to_string(&self.log_path)?;
        let mut matching = Vec::new();

        for line in content.lines().filter(|l| !l.trim().is_empty()) {
            let entry: LogEntry = match serde_json::from_str(line) {
                Ok(entry) => entry,
                Err(e) => {
                    log::debug!("skipping unreadable activity line: {e}");
                    continue;
                }
            };

            if errors_only && entry.level != LogLevel::Error {
                continue;
            }

            if let Some(host) = host_filter {
                if entry.host.as_deref() != Some(host) {
                    continue;
                }
            }

            matching.push(entry);
        }

        matching.reverse();
        Ok(matching)
    }
}
