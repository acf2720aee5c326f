//! Session event logger
//!
//! Centralized logger owned by the session. Output can go to stdout, to an
//! in-memory buffer (for tests), or both.

use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};
use std::ops::Deref;

/// How much session output to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum VerbosityLevel {
    /// No output
    Silent,
    /// Only game-changing events (draws, game end)
    Minimal,
    /// Events plus zone summaries (default)
    #[default]
    Normal,
    /// Everything, including persistence traffic
    Verbose,
}

/// Output destination for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Output only to stdout (default)
    #[default]
    Stdout,
    /// Capture only to in-memory buffer (no stdout)
    Memory,
    /// Both stdout and in-memory buffer
    Both,
}

/// A captured log entry
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: VerbosityLevel,
    pub message: String,
}

/// Guard type providing read-only slice access to captured entries
pub struct LogGuard<'a> {
    guard: Ref<'a, Vec<LogEntry>>,
}

impl<'a> Deref for LogGuard<'a> {
    type Target = [LogEntry];

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

/// Session logger with verbosity filtering and optional capture
#[derive(Debug, Clone)]
pub struct SessionLogger {
    verbosity: VerbosityLevel,
    output_mode: OutputMode,
    log_buffer: RefCell<Vec<LogEntry>>,
}

impl SessionLogger {
    pub fn new() -> Self {
        SessionLogger {
            verbosity: VerbosityLevel::default(),
            output_mode: OutputMode::default(),
            log_buffer: RefCell::new(Vec::new()),
        }
    }

    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        SessionLogger {
            verbosity,
            ..Self::new()
        }
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = verbosity;
    }

    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.output_mode = mode;
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    /// Log a message at the given level
    ///
    /// Messages above the configured verbosity are dropped before any
    /// formatting cost is paid by callers using the convenience methods.
    pub fn log(&self, level: VerbosityLevel, message: &str) {
        if level > self.verbosity || self.verbosity == VerbosityLevel::Silent {
            return;
        }
        match self.output_mode {
            OutputMode::Stdout => println!("{message}"),
            OutputMode::Memory => self.capture(level, message),
            OutputMode::Both => {
                println!("{message}");
                self.capture(level, message);
            }
        }
    }

    pub fn minimal(&self, message: &str) {
        self.log(VerbosityLevel::Minimal, message);
    }

    pub fn normal(&self, message: &str) {
        self.log(VerbosityLevel::Normal, message);
    }

    pub fn verbose(&self, message: &str) {
        self.log(VerbosityLevel::Verbose, message);
    }

    /// Read-only access to the captured entries
    pub fn entries(&self) -> LogGuard<'_> {
        LogGuard {
            guard: self.log_buffer.borrow(),
        }
    }

    pub fn clear(&self) {
        self.log_buffer.borrow_mut().clear();
    }

    fn capture(&self, level: VerbosityLevel, message: &str) {
        self.log_buffer.borrow_mut().push(LogEntry {
            level,
            message: message.to_string(),
        });
    }
}

impl Default for SessionLogger {
    fn default() -> Self {
        Self::new()
    }
}
