//! Transient notifications.
//!
//! A single process-wide toast: showing a new one replaces the previous one,
//! and each disappears three seconds after it was shown.

use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::usecase::{Notice, NoticeLevel};

pub const TOAST_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: Uuid,
    pub notice: Notice,
    shown_at: Instant,
}

impl Toast {
    pub fn is_visible_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) < TOAST_DURATION
    }
}

#[derive(Debug, Default)]
pub struct Toaster {
    current: Option<Toast>,
}

impl Toaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, notice: Notice) -> Uuid {
        self.show_at(notice, Instant::now())
    }

    pub fn show_at(&mut self, notice: Notice, now: Instant) -> Uuid {
        let id = Uuid::new_v4();
        match notice.level {
            NoticeLevel::Danger => tracing::warn!(toast = %id, "{}", notice.message),
            _ => tracing::debug!(toast = %id, "{}", notice.message),
        }
        self.current = Some(Toast {
            id,
            notice,
            shown_at: now,
        });
        id
    }

    pub fn visible(&mut self) -> Option<&Toast> {
        self.visible_at(Instant::now())
    }

    /// Current toast, dropping it once it has expired.
    pub fn visible_at(&mut self, now: Instant) -> Option<&Toast> {
        if self
            .current
            .as_ref()
            .is_some_and(|toast| !toast.is_visible_at(now))
        {
            self.current = None;
        }
        self.current.as_ref()
    }

    /// Dismiss the toast with `id`, if it is still the current one.
    pub fn dismiss(&mut self, id: Uuid) {
        if self.current.as_ref().is_some_and(|toast| toast.id == id) {
            self.current = None;
        }
    }
}
