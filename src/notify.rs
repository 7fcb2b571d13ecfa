use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long a toast stays on screen.
pub const TOAST_TTL: Duration = Duration::from_secs(3);
const MAX_TOASTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub shown_at: Instant,
}

/// Transient notifications, oldest first.
#[derive(Debug, Default)]
pub struct Toasts {
    queue: VecDeque<Toast>,
}

impl Toasts {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::with_capacity(MAX_TOASTS),
        }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Info, message.into());
    }

    fn push(&mut self, kind: ToastKind, message: String) {
        if self.queue.len() == MAX_TOASTS {
            self.queue.pop_front();
        }
        self.queue.push_back(Toast {
            kind,
            message,
            shown_at: Instant::now(),
        });
    }

    /// Drops expired toasts and returns the rest.
    pub fn active(&mut self, now: Instant) -> impl Iterator<Item = &Toast> {
        self.queue
            .retain(|t| now.saturating_duration_since(t.shown_at) < TOAST_TTL);
        self.queue.iter()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.queue.iter()
    }

    pub fn last(&self) -> Option<&Toast> {
        self.queue.back()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
