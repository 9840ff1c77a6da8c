//! Session event loop.
//!
//! Runs an [`ExamSession`] on a single task. Clock ticks and user commands
//! are multiplexed with `tokio::select!`, so every mutation is serialized and
//! no locking is needed. Commands are polled first: a pause that arrives
//! together with a due tick disarms the clock before the tick is applied,
//! and the tick is lost with the dropped interval.
//!
//! Observers receive [`SessionEvent`]s over an unbounded channel. A closed
//! event channel is not an error; the loop keeps running without an
//! observer.

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::alert::{content_for, AlertKind};
use crate::notification::NotificationContent;
use crate::session::{ExamSession, SessionError, SessionSummary};
use crate::types::{TimerConfig, TimerPhase, TimerSnapshot, Violation, ViolationType};

// ============================================================================
// Command / SessionEvent
// ============================================================================

/// User actions relayed into the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Toggle,
    Reset,
    AddViolation(ViolationType),
    ToggleSound,
    Configure(TimerConfig),
    Status,
    Shutdown,
}

/// Everything an observer might render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Started(TimerSnapshot),
    Paused(TimerSnapshot),
    Reset(TimerSnapshot),
    /// A command was absorbed without effect in the given phase.
    Ignored {
        command: &'static str,
        phase: TimerPhase,
    },
    StartRejected(SessionError),
    Tick {
        snapshot: TimerSnapshot,
        status_changed: bool,
    },
    Alert {
        kind: AlertKind,
        content: NotificationContent,
    },
    Finished(TimerSnapshot),
    ViolationRecorded(Violation),
    ViolationRejected(ViolationType),
    Configured(TimerSnapshot),
    ConfigurationLocked(TimerPhase),
    SoundToggled(bool),
    Status(SessionSummary),
}

impl SessionEvent {
    /// Timer state carried by the event, if any.
    pub fn snapshot(&self) -> Option<&TimerSnapshot> {
        match self {
            SessionEvent::Started(snapshot)
            | SessionEvent::Paused(snapshot)
            | SessionEvent::Reset(snapshot)
            | SessionEvent::Finished(snapshot)
            | SessionEvent::Configured(snapshot)
            | SessionEvent::Tick { snapshot, .. } => Some(snapshot),
            SessionEvent::Status(summary) => Some(&summary.timer),
            _ => None,
        }
    }
}

// ============================================================================
// SessionDriver
// ============================================================================

pub struct SessionDriver {
    session: ExamSession,
    commands: mpsc::UnboundedReceiver<Command>,
    events: mpsc::UnboundedSender<SessionEvent>,
}

impl SessionDriver {
    pub fn new(
        session: ExamSession,
        commands: mpsc::UnboundedReceiver<Command>,
        events: mpsc::UnboundedSender<SessionEvent>,
    ) -> Self {
        Self {
            session,
            commands,
            events,
        }
    }

    /// Runs until `Shutdown` is received or every command sender is dropped.
    ///
    /// The clock is disarmed before returning. Returns the final summary.
    pub async fn run(mut self) -> SessionSummary {
        info!(
            total = self.session.config().total_seconds(),
            "session loop started"
        );

        loop {
            tokio::select! {
                biased;

                command = self.commands.recv() => match command {
                    Some(Command::Shutdown) | None => break,
                    Some(command) => self.handle_command(command),
                },
                _ = self.session.next_tick() => self.handle_tick(),
            }
        }

        self.session.teardown();
        info!("session loop stopped");
        self.session.summary()
    }

    fn handle_tick(&mut self) {
        let Some(report) = self.session.tick() else {
            return;
        };
        let snapshot = self.session.snapshot();

        self.emit(SessionEvent::Tick {
            snapshot,
            status_changed: report.status_changed,
        });
        for kind in report.fired {
            let content = content_for(kind, self.session.config());
            self.emit(SessionEvent::Alert { kind, content });
        }
        if snapshot.phase == TimerPhase::Finished {
            self.emit(SessionEvent::Finished(snapshot));
        }
    }

    fn handle_command(&mut self, command: Command) {
        debug!(?command, phase = %self.session.phase(), "command received");

        let event = match command {
            Command::Start => self.apply_start("start", ExamSession::start),
            Command::Toggle => self.apply_start("toggle", ExamSession::toggle),
            Command::Pause => {
                if self.session.pause() {
                    SessionEvent::Paused(self.session.snapshot())
                } else {
                    self.ignored("pause")
                }
            }
            Command::Reset => {
                self.session.reset();
                SessionEvent::Reset(self.session.snapshot())
            }
            Command::AddViolation(kind) => match self.session.add_violation(kind) {
                Ok(violation) => SessionEvent::ViolationRecorded(violation),
                Err(_) => SessionEvent::ViolationRejected(kind),
            },
            Command::ToggleSound => SessionEvent::SoundToggled(self.session.toggle_sound()),
            Command::Configure(config) => {
                if self.session.configure(config) {
                    SessionEvent::Configured(self.session.snapshot())
                } else {
                    SessionEvent::ConfigurationLocked(self.session.phase())
                }
            }
            Command::Status => SessionEvent::Status(self.session.summary()),
            Command::Shutdown => return,
        };
        self.emit(event);
    }

    /// Shared handling for the two commands that may start the clock.
    fn apply_start(
        &mut self,
        name: &'static str,
        op: fn(&mut ExamSession) -> Result<bool, SessionError>,
    ) -> SessionEvent {
        match op(&mut self.session) {
            Ok(true) => match self.session.phase() {
                TimerPhase::Paused => SessionEvent::Paused(self.session.snapshot()),
                _ => SessionEvent::Started(self.session.snapshot()),
            },
            Ok(false) => self.ignored(name),
            Err(e) => SessionEvent::StartRejected(e),
        }
    }

    fn ignored(&self, command: &'static str) -> SessionEvent {
        SessionEvent::Ignored {
            command,
            phase: self.session.phase(),
        }
    }

    fn emit(&self, event: SessionEvent) {
        if self.events.send(event).is_err() {
            debug!("event receiver dropped");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
