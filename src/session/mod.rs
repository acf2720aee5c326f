//! Play-session state machine and orchestration

pub mod controller;
pub mod interactive;
pub mod logger;
pub mod runner;
pub mod scripted;
pub mod snapshot;
pub mod state;

pub use controller::{SchemeAction, SessionController, SessionView};
pub use interactive::InteractiveController;
pub use logger::{LogEntry, OutputMode, SessionLogger, VerbosityLevel};
pub use runner::SessionRunner;
pub use scripted::ScriptedController;
pub use snapshot::{SessionSnapshot, SNAPSHOT_KEY, SNAPSHOT_VERSION};
pub use state::Session;
