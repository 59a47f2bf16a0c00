//! The auto-hide timer for video controls.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::BrowserEvent;

/// Identifies one armed timer. A fired token that is no longer the armed
/// one is stale and must be ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(pub u64);

pub trait HideTimer {
    fn arm(&mut self, delay: Duration) -> TimerToken;
    fn cancel(&mut self, token: TimerToken);
}

// ---------------------------------------------------------------------------
// TokioHideTimer (production)
// ---------------------------------------------------------------------------

/// Posts `BrowserEvent::HideControlsElapsed` onto the view's event channel
/// when the delay runs out. Must be used from within a tokio runtime.
pub struct TokioHideTimer {
    events: mpsc::UnboundedSender<BrowserEvent>,
    next: u64,
    tasks: HashMap<TimerToken, JoinHandle<()>>,
}

impl TokioHideTimer {
    pub fn new(events: mpsc::UnboundedSender<BrowserEvent>) -> Self {
        Self {
            events,
            next: 1,
            tasks: HashMap::new(),
        }
    }

    pub fn pending(&self) -> usize {
        self.tasks.values().filter(|t| !t.is_finished()).count()
    }
}

impl HideTimer for TokioHideTimer {
    fn arm(&mut self, delay: Duration) -> TimerToken {
        self.tasks.retain(|_, task| !task.is_finished());

        let token = TimerToken(self.next);
        self.next += 1;

        // Deadline is fixed at arm time, not when the task first gets polled.
        let deadline = tokio::time::Instant::now() + delay;
        let events = self.events.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            // Receiver gone means the view was torn down.
            let _ = events.send(BrowserEvent::HideControlsElapsed(token));
        });
        self.tasks.insert(token, task);
        token
    }

    fn cancel(&mut self, token: TimerToken) {
        if let Some(task) = self.tasks.remove(&token) {
            task.abort();
        }
    }
}

impl Drop for TokioHideTimer {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

// ---------------------------------------------------------------------------
// ManualHideTimer (tests)
// ---------------------------------------------------------------------------

/// Hands out tokens without scheduling anything; the test decides when a
/// timer "fires" by feeding the token back as an event.
#[derive(Debug, Default)]
pub struct ManualHideTimer {
    next: u64,
    armed: Vec<(TimerToken, Duration)>,
    cancelled: Vec<TimerToken>,
}

impl ManualHideTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently armed token that has not been cancelled.
    pub fn pending(&self) -> Option<TimerToken> {
        self.armed
            .iter()
            .rev()
            .map(|(token, _)| *token)
            .find(|token| !self.cancelled.contains(token))
    }

    pub fn armed(&self) -> &[(TimerToken, Duration)] {
        &self.armed
    }

    pub fn cancelled(&self) -> &[TimerToken] {
        &self.cancelled
    }
}

impl HideTimer for ManualHideTimer {
    fn arm(&mut self, delay: Duration) -> TimerToken {
        self.next += 1;
        let token = TimerToken(self.next);
        self.armed.push((token, delay));
        token
    }

    fn cancel(&mut self, token: TimerToken) {
        if !self.cancelled.contains(&token) {
            self.cancelled.push(token);
        }
    }
}
