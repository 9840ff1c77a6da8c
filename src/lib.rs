//! Proctor Timer Library
//!
//! Core of a proctored exam countdown. It includes:
//! - Timer engine with a lazily armed one-second clock
//! - Threshold classification and one-shot threshold alerts
//! - Violation ledger with per-type counts and a timeline
//! - Exam session policy (permission gate, compound reset)
//! - Single-task session driver multiplexing ticks and commands
//! - Notification and tone sinks with terminal, rodio and mock backends
//! - Settings, title formatting and CLI utilities

pub mod alert;
pub mod cli;
pub mod driver;
pub mod ledger;
pub mod notification;
pub mod session;
pub mod settings;
pub mod sound;
pub mod timer;
pub mod title;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    ConfigError, TimerConfig, TimerPhase, TimerSnapshot, TimerStatus, Violation, ViolationType,
};

pub use alert::{AlertCoordinator, AlertKind, AlertRecord};
pub use driver::{Command, SessionDriver, SessionEvent};
pub use ledger::{ViolationCounts, ViolationLedger};
pub use session::{ExamSession, SessionError, SessionSummary, TickReport, DEFAULT_RECENT_LIMIT};
pub use settings::{Settings, SettingsError};
pub use timer::{classify, TimerEngine, TimerUpdate};
pub use title::TitleFormatter;

// Re-export notification types
pub use notification::{
    MockNotificationSender, NotificationContent, NotificationError, NotificationPermission,
    NotificationSink, TerminalNotifier,
};

// Re-export sound types
pub use sound::{
    try_create_player, MockTonePlayer, RodioTonePlayer, SilentTonePlayer, SoundError, Tone,
    ToneSink,
};
