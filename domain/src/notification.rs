use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A transient toast.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    pub raised_at: Instant,
}

/// Toast board. Entries expire `ttl` after they are raised or when dismissed.
#[derive(Debug, Clone)]
pub struct Notifications {
    entries: Vec<Notification>,
    next_id: u64,
    ttl: Duration,
}

impl Notifications {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
            ttl,
        }
    }

    pub fn raise(&mut self, kind: NotificationKind, message: impl Into<String>, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Notification {
            id,
            kind,
            message: message.into(),
            raised_at: now,
        });
        id
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.raise(NotificationKind::Success, message, Instant::now())
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.raise(NotificationKind::Error, message, Instant::now())
    }

    pub fn dismiss(&mut self, id: u64) {
        self.entries.retain(|n| n.id != id);
    }

    /// Drops every toast older than the ttl.
    pub fn prune(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.entries
            .retain(|n| now.saturating_duration_since(n.raised_at) < ttl);
    }

    pub fn active(&self) -> &[Notification] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.entries.last()
    }
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}
