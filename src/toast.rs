use std::time::Duration;

pub const DEFAULT_DURATION: Duration = Duration::from_millis(2500);

/// Short-lived status message. A new message replaces the old one and
/// restarts the timer.
#[derive(Debug, Default, Clone)]
pub struct Toast {
    current: Option<(String, Duration)>, // message, hide-at
}

impl Toast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, message: impl Into<String>, now: Duration) {
        self.show_for(message, now, DEFAULT_DURATION);
    }

    pub fn show_for(&mut self, message: impl Into<String>, now: Duration, duration: Duration) {
        let message = message.into();
        log::info!("{}", message);
        self.current = Some((message, now + duration));
    }

    /// Message still on screen at `now`, if any
    pub fn visible(&self, now: Duration) -> Option<&str> {
        match &self.current {
            Some((message, hide_at)) if now < *hide_at => Some(message.as_str()),
            _ => None,
        }
    }
}
