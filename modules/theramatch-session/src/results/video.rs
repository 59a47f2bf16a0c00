use std::time::Duration;

use tracing::debug;

use super::player::{PlayerDirective, PlayerEvent};
use super::timer::{HideTimer, TimerToken};

/// Playback state of the primary profile's intro video.
///
/// Paused always shows the controls. Playing shows them until the hide
/// timer fires; hovering or pausing brings them back and cancels the timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoPlayback {
    is_playing: bool,
    controls_visible: bool,
    hide_timer: Option<TimerToken>,
}

impl Default for VideoPlayback {
    fn default() -> Self {
        Self {
            is_playing: false,
            controls_visible: true,
            hide_timer: None,
        }
    }
}

impl VideoPlayback {
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn controls_visible(&self) -> bool {
        self.controls_visible
    }

    pub fn hide_timer(&self) -> Option<TimerToken> {
        self.hide_timer
    }

    /// The play/pause button stays up whenever the video is paused.
    pub fn show_play_button(&self) -> bool {
        self.controls_visible || !self.is_playing
    }

    /// User click on the video. Returns the directive to post to the player.
    pub fn toggle(&mut self, timer: &mut dyn HideTimer, delay: Duration) -> PlayerDirective {
        if self.is_playing {
            self.enter_paused(timer);
            PlayerDirective::Pause
        } else {
            self.enter_playing(timer, delay);
            PlayerDirective::Play
        }
    }

    /// Play/pause reported by the player itself, e.g. from its own UI or
    /// the end of the video. Local state follows the player.
    pub fn apply_external(&mut self, event: PlayerEvent, timer: &mut dyn HideTimer, delay: Duration) {
        match event {
            PlayerEvent::Play => self.enter_playing(timer, delay),
            PlayerEvent::Pause => self.enter_paused(timer),
        }
    }

    /// Returns whether the token was the armed one.
    pub fn hide_elapsed(&mut self, token: TimerToken) -> bool {
        if self.hide_timer != Some(token) {
            debug!(?token, "Ignoring stale hide timer");
            return false;
        }
        self.hide_timer = None;
        self.controls_visible = false;
        true
    }

    pub fn pointer_enter(&mut self, timer: &mut dyn HideTimer) {
        self.cancel_timer(timer);
        self.controls_visible = true;
    }

    pub fn pointer_leave(&mut self, timer: &mut dyn HideTimer, delay: Duration) {
        if self.is_playing {
            self.arm_timer(timer, delay);
        }
    }

    /// Back to paused with controls shown, whatever the previous state.
    pub fn reset(&mut self, timer: &mut dyn HideTimer) {
        self.cancel_timer(timer);
        *self = Self::default();
    }

    fn enter_playing(&mut self, timer: &mut dyn HideTimer, delay: Duration) {
        self.is_playing = true;
        self.controls_visible = true;
        self.arm_timer(timer, delay);
    }

    fn enter_paused(&mut self, timer: &mut dyn HideTimer) {
        self.is_playing = false;
        self.controls_visible = true;
        self.cancel_timer(timer);
    }

    fn arm_timer(&mut self, timer: &mut dyn HideTimer, delay: Duration) {
        self.cancel_timer(timer);
        self.hide_timer = Some(timer.arm(delay));
    }

    fn cancel_timer(&mut self, timer: &mut dyn HideTimer) {
        if let Some(token) = self.hide_timer.take() {
            timer.cancel(token);
        }
    }
}
