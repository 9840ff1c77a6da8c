//! Terminal notification sink.
//!
//! Renders each notification as a bell followed by a one-line banner. A
//! terminal has no permission model, so permission is granted on request.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use super::content::NotificationContent;
use super::error::NotificationError;
use super::{NotificationPermission, NotificationSink};

/// Writes notifications to a terminal stream (stderr by default).
pub struct TerminalNotifier<W: Write + Send = io::Stderr> {
    out: Mutex<W>,
    granted: AtomicBool,
    bell: bool,
}

impl TerminalNotifier<io::Stderr> {
    /// Creates a notifier writing to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> TerminalNotifier<W> {
    /// Creates a notifier writing to the given stream.
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            granted: AtomicBool::new(false),
            bell: true,
        }
    }

    /// Disables the terminal bell that precedes each banner.
    #[must_use]
    pub fn without_bell(mut self) -> Self {
        self.bell = false;
        self
    }

    /// Consumes the notifier and returns the underlying stream.
    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write + Send> NotificationSink for TerminalNotifier<W> {
    fn permission(&self) -> NotificationPermission {
        if self.granted.load(Ordering::SeqCst) {
            NotificationPermission::Granted
        } else {
            NotificationPermission::Default
        }
    }

    fn request_permission(&self) -> NotificationPermission {
        self.granted.store(true, Ordering::SeqCst);
        NotificationPermission::Granted
    }

    fn show(&self, content: &NotificationContent) -> Result<(), NotificationError> {
        if !self.granted.load(Ordering::SeqCst) {
            return Err(NotificationError::PermissionNotGranted);
        }
        let mut out = self
            .out
            .lock()
            .map_err(|_| NotificationError::SendFailed("output lock poisoned".to_string()))?;
        let bell = if self.bell { "\x07" } else { "" };
        writeln!(out, "{}[{}] {}", bell, content.title, content.body)
            .and_then(|()| out.flush())
            .map_err(|e| NotificationError::SendFailed(e.to_string()))
    }
}
