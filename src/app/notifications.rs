// ABOUTME: Toast notifications - stacked, self-dismissing status messages with slide-in and fade-out

use ratatui::style::Color;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::components::theme;
use crate::config::NotificationConfig;

/// Notification system for TUI messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationType {
    pub fn color(&self) -> Color {
        match self {
            Self::Info => theme::INFO_BLUE,
            Self::Success => theme::SUCCESS_GREEN,
            Self::Warning => theme::WARNING_ORANGE,
            Self::Error => theme::DANGER_RED,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Info => "ℹ ",
            Self::Success => "✓ ",
            Self::Warning => "⚠ ",
            Self::Error => "✗ ",
        }
    }
}

pub type NotificationId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Sliding in
    Entering,
    Shown,
    /// Fading out since the given instant; removed once the fade completes
    Leaving { since: Instant },
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub notification_type: NotificationType,
    pub created_at: Instant,
    pub phase: Phase,
}

impl Notification {
    pub fn is_leaving(&self) -> bool {
        matches!(self.phase, Phase::Leaving { .. })
    }

    /// Drawn dimmed while animating in or out
    pub fn is_transitioning(&self) -> bool {
        !matches!(self.phase, Phase::Shown)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationTiming {
    pub enter: Duration,
    pub lifetime: Duration,
    pub fade: Duration,
}

impl Default for NotificationTiming {
    fn default() -> Self {
        Self {
            enter: Duration::from_millis(100),
            lifetime: Duration::from_secs(5),
            fade: Duration::from_millis(300),
        }
    }
}

/// Owns every live toast. Toasts stack independently; with a cap set,
/// the oldest are evicted first.
#[derive(Debug, Clone)]
pub struct NotificationPresenter {
    notifications: Vec<Notification>,
    next_id: NotificationId,
    timing: NotificationTiming,
    max_visible: Option<usize>,
}

impl NotificationPresenter {
    pub fn new(timing: NotificationTiming, max_visible: Option<usize>) -> Self {
        Self {
            notifications: Vec::new(),
            next_id: 1,
            timing,
            max_visible,
        }
    }

    pub fn from_config(config: &NotificationConfig) -> Self {
        let timing = NotificationTiming {
            enter: Duration::from_millis(config.enter_ms),
            lifetime: Duration::from_millis(config.lifetime_ms),
            fade: Duration::from_millis(config.fade_ms),
        };
        // 0 means unbounded
        let max_visible = (config.max_visible > 0).then_some(config.max_visible);
        Self::new(timing, max_visible)
    }

    pub fn show(&mut self, message: impl Into<String>, kind: NotificationType) -> NotificationId {
        self.show_at(message, kind, Instant::now())
    }

    pub fn show_at(
        &mut self,
        message: impl Into<String>,
        kind: NotificationType,
        now: Instant,
    ) -> NotificationId {
        let id = self.next_id;
        self.next_id += 1;
        self.notifications.push(Notification {
            id,
            message: message.into(),
            notification_type: kind,
            created_at: now,
            phase: Phase::Entering,
        });

        if let Some(cap) = self.max_visible {
            while self.notifications.len() > cap {
                let evicted = self.notifications.remove(0);
                debug!("Evicting notification {} over cap {}", evicted.id, cap);
            }
        }

        id
    }

    pub fn success(&mut self, message: impl Into<String>) -> NotificationId {
        self.show(message, NotificationType::Success)
    }

    pub fn error(&mut self, message: impl Into<String>) -> NotificationId {
        self.show(message, NotificationType::Error)
    }

    pub fn info(&mut self, message: impl Into<String>) -> NotificationId {
        self.show(message, NotificationType::Info)
    }

    pub fn warning(&mut self, message: impl Into<String>) -> NotificationId {
        self.show(message, NotificationType::Warning)
    }

    /// Close button: start fading out now. Unknown or already leaving ids are ignored.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        self.dismiss_at(id, Instant::now())
    }

    pub fn dismiss_at(&mut self, id: NotificationId, now: Instant) -> bool {
        match self.notifications.iter_mut().find(|n| n.id == id) {
            Some(n) if !n.is_leaving() => {
                n.phase = Phase::Leaving { since: now };
                true
            }
            _ => false,
        }
    }

    /// Dismiss the most recent toast that is not already leaving
    pub fn dismiss_newest(&mut self) -> bool {
        let newest = self
            .notifications
            .iter()
            .rev()
            .find(|n| !n.is_leaving())
            .map(|n| n.id);
        newest.is_some_and(|id| self.dismiss(id))
    }

    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Advance every toast's lifecycle to `now`
    pub fn tick_at(&mut self, now: Instant) {
        let timing = self.timing;
        for n in &mut self.notifications {
            let age = now.saturating_duration_since(n.created_at);
            if n.phase == Phase::Entering && age >= timing.enter {
                n.phase = Phase::Shown;
            }
            if !n.is_leaving() && age >= timing.lifetime {
                n.phase = Phase::Leaving { since: now };
            }
        }
        self.notifications.retain(|n| match n.phase {
            Phase::Leaving { since } => now.saturating_duration_since(since) < timing.fade,
            _ => true,
        });
    }

    /// Live toasts, oldest first
    pub fn current(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }
}

impl Default for NotificationPresenter {
    fn default() -> Self {
        Self::new(NotificationTiming::default(), None)
    }
}
