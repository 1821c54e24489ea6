use anyhow::{Context, Result};
use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Info,
    Warn,
    Error,
}

impl Level {
    fn label(self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warn => "WARNING",
            Level::Error => "ERROR",
        }
    }
}

#[derive(Debug)]
pub struct RunLog {
    name: String,
    file: Option<File>,
}

impl RunLog {
    pub fn to_file(name: &str, path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("ログファイルを開けませんでした: {}", path.display()))?;
        Ok(Self {
            name: name.to_string(),
            file: Some(file),
        })
    }

    pub fn console_only(name: &str) -> Self {
        Self {
            name: name.to_string(),
            file: None,
        }
    }

    pub fn info(&mut self, message: impl AsRef<str>) {
        self.record(Level::Info, message.as_ref());
    }

    pub fn warn(&mut self, message: impl AsRef<str>) {
        self.record(Level::Warn, message.as_ref());
    }

    pub fn error(&mut self, message: impl AsRef<str>) {
        self.record(Level::Error, message.as_ref());
    }

    fn record(&mut self, level: Level, message: &str) {
        match level {
            Level::Info => println!("{message}"),
            Level::Warn | Level::Error => eprintln!("{message}"),
        }

        if let Some(file) = self.file.as_mut() {
            let line = format!(
                "{} - {} - {} - {}\n",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                self.name,
                level.label(),
                message
            );
            let _ = file.write_all(line.as_bytes());
        }
    }
}
