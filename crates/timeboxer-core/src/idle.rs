//! Idle drift detection.
//!
//! Watches the gap between activity signals and raises an alert once the gap
//! crosses a threshold, at most once per cooldown window. The watcher owns no
//! thread or timer: the host notes activity as it observes it and polls
//! [`IdleWatcher::check`] on its own cadence
//! ([`IdleWatcherConfig::interval_secs`] is the suggested one).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Idle watcher thresholds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdleWatcherConfig {
    /// Suggested polling cadence for hosts (seconds)
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Idle span that triggers an alert (seconds)
    #[serde(default = "default_idle_threshold_secs")]
    pub idle_threshold_secs: u64,
    /// Minimum gap between alerts (seconds)
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: u64,
    /// Alert only while a focus session is running
    #[serde(default = "default_true")]
    pub focus_only: bool,
}

fn default_interval_secs() -> u64 {
    30
}
fn default_idle_threshold_secs() -> u64 {
    300
}
fn default_cooldown_secs() -> u64 {
    600
}
fn default_true() -> bool {
    true
}

impl Default for IdleWatcherConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            idle_threshold_secs: default_idle_threshold_secs(),
            cooldown_secs: default_cooldown_secs(),
            focus_only: true,
        }
    }
}

/// An idle span that crossed the threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdleAlert {
    /// Seconds since the last noted activity
    pub idle_seconds: u64,
    /// When the alert was raised
    pub at: DateTime<Utc>,
}

/// Caller-driven drift detector.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdleWatcher {
    config: IdleWatcherConfig,
    last_activity: Option<DateTime<Utc>>,
    last_alert: Option<DateTime<Utc>>,
}

impl IdleWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: IdleWatcherConfig) -> Self {
        Self {
            config,
            last_activity: None,
            last_alert: None,
        }
    }

    /// Swap thresholds without losing the recorded timestamps.
    pub fn set_config(&mut self, config: IdleWatcherConfig) {
        self.config = config;
    }

    pub fn config(&self) -> &IdleWatcherConfig {
        &self.config
    }

    /// Record an activity signal. Resets the idle span.
    pub fn note_activity(&mut self, now: DateTime<Utc>) {
        self.last_activity = Some(now);
    }

    /// Poll for drift.
    ///
    /// Returns an alert when the span since the last noted activity reaches
    /// the threshold, unless one fired within the cooldown window or the
    /// focus-only gate suppresses it. Before any noted activity the watcher
    /// is unarmed and stays quiet.
    pub fn check(&mut self, now: DateTime<Utc>, in_focus: bool) -> Option<IdleAlert> {
        if self.config.focus_only && !in_focus {
            return None;
        }
        let last = self.last_activity?;
        let idle_seconds = (now - last).num_seconds().max(0) as u64;
        if idle_seconds < self.config.idle_threshold_secs {
            return None;
        }
        if let Some(alerted) = self.last_alert {
            let since_alert = (now - alerted).num_seconds().max(0) as u64;
            if since_alert < self.config.cooldown_secs {
                return None;
            }
        }
        self.last_alert = Some(now);
        Some(IdleAlert {
            idle_seconds,
            at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn watcher() -> IdleWatcher {
        IdleWatcher::with_config(IdleWatcherConfig {
            focus_only: false,
            ..IdleWatcherConfig::default()
        })
    }

    #[test]
    fn unarmed_watcher_stays_quiet() {
        let mut w = watcher();
        assert!(w.check(Utc::now(), true).is_none());
    }

    #[test]
    fn below_threshold_stays_quiet() {
        let mut w = watcher();
        let start = Utc::now();
        w.note_activity(start);
        assert!(w.check(start + Duration::seconds(299), true).is_none());
    }

    #[test]
    fn alert_fires_at_threshold() {
        let mut w = watcher();
        let start = Utc::now();
        w.note_activity(start);

        let alert = w.check(start + Duration::seconds(300), true);
        assert_eq!(alert.map(|a| a.idle_seconds), Some(300));
    }

    #[test]
    fn cooldown_suppresses_repeat_alerts() {
        let mut w = watcher();
        let start = Utc::now();
        w.note_activity(start);

        assert!(w.check(start + Duration::seconds(300), true).is_some());
        assert!(w.check(start + Duration::seconds(330), true).is_none());
        assert!(w.check(start + Duration::seconds(899), true).is_none());

        let again = w.check(start + Duration::seconds(900), true);
        assert_eq!(again.map(|a| a.idle_seconds), Some(900));
    }

    #[test]
    fn activity_resets_the_idle_span() {
        let mut w = watcher();
        let start = Utc::now();
        w.note_activity(start);
        w.note_activity(start + Duration::seconds(290));
        assert!(w.check(start + Duration::seconds(500), true).is_none());
        assert!(w.check(start + Duration::seconds(590), true).is_some());
    }

    #[test]
    fn focus_only_gates_alerts() {
        let mut w = IdleWatcher::new();
        let start = Utc::now();
        w.note_activity(start);

        assert!(w.check(start + Duration::seconds(400), false).is_none());
        assert!(w.check(start + Duration::seconds(400), true).is_some());
    }
}
