//! Bounded queue of transient notifications.
//!
//! Entries live for a three second display window plus a short fade tail,
//! then drop out on the next sweep. There is no background timer; expiry is
//! evaluated lazily against a caller-supplied clock so the queue stays
//! deterministic under test.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long a notification stays fully visible.
pub const DISPLAY_DURATION: Duration = Duration::from_secs(3);
/// Fade-out tail after the visible window.
pub const FADE_DURATION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
}

/// A message plus the moment it was raised.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    raised_at: Instant,
}

impl Notification {
    /// True while the notification is inside its display or fade window.
    pub fn is_live(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.raised_at) < DISPLAY_DURATION + FADE_DURATION
    }

    /// True once display time has elapsed and the fade tail started.
    pub fn is_fading(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.raised_at) >= DISPLAY_DURATION && self.is_live(now)
    }
}

/// Keeps the most recent notifications, discarding the oldest once full.
#[derive(Debug)]
pub struct Notifier {
    entries: VecDeque<Notification>,
    limit: usize,
}

impl Notifier {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit: limit.max(1),
        }
    }

    pub fn push(&mut self, message: impl Into<String>, severity: Severity) {
        self.push_at(message, severity, Instant::now());
    }

    pub fn push_at(&mut self, message: impl Into<String>, severity: Severity, now: Instant) {
        self.sweep(now);
        while self.entries.len() >= self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(Notification {
            message: message.into(),
            severity,
            raised_at: now,
        });
    }

    /// Drops entries whose display and fade windows have both passed.
    pub fn sweep(&mut self, now: Instant) {
        self.entries.retain(|n| n.is_live(now));
    }

    pub fn live(&self) -> Vec<&Notification> {
        self.live_at(Instant::now())
    }

    pub fn live_at(&self, now: Instant) -> Vec<&Notification> {
        self.entries.iter().filter(|n| n.is_live(now)).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
