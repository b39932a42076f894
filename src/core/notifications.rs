//! Transient user-facing notices. A notice expires after its time-to-live;
//! nothing is scheduled, expiry is checked against the clock on read.

use chrono::{Duration, NaiveDateTime};

pub const DEFAULT_NOTICE_TTL_SECS: u64 = 3;
const MAX_NOTICE_TTL_SECS: u64 = 86_400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
    pub issued_at: NaiveDateTime,
}

impl Notice {
    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// Holds the latest notice. A newer notice replaces the previous one.
#[derive(Debug, Clone)]
pub struct Notifier {
    current: Option<Notice>,
    ttl: Duration,
}

impl Notifier {
    pub fn new(ttl_secs: u64) -> Self {
        let secs = ttl_secs.min(MAX_NOTICE_TTL_SECS) as i64;
        Self {
            current: None,
            ttl: Duration::seconds(secs),
        }
    }

    pub fn success(&mut self, message: impl Into<String>, at: NaiveDateTime) {
        self.push(message.into(), NoticeKind::Success, at);
    }

    pub fn error(&mut self, message: impl Into<String>, at: NaiveDateTime) {
        self.push(message.into(), NoticeKind::Error, at);
    }

    fn push(&mut self, message: String, kind: NoticeKind, issued_at: NaiveDateTime) {
        self.current = Some(Notice {
            message,
            kind,
            issued_at,
        });
    }

    /// The notice still visible at `now`, if any.
    pub fn active(&self, now: NaiveDateTime) -> Option<&Notice> {
        self.current
            .as_ref()
            .filter(|notice| now < notice.issued_at + self.ttl)
    }

    /// Takes the latest notice regardless of expiry.
    pub fn take(&mut self) -> Option<Notice> {
        self.current.take()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_TTL_SECS)
    }
}
