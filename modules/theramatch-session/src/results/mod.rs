//! The results view: one primary profile, the rest of the shortlist, and the
//! primary profile's intro video.

pub mod player;
pub mod profile;
pub mod timer;
pub mod video;

use std::collections::HashSet;
use std::time::Duration;

use thiserror::Error;
use theramatch_common::config::{DEFAULT_HIDE_CONTROLS_MS, DEFAULT_PLAYER_ORIGIN};
use theramatch_common::{Config, RankingResult, TherapistProfile};
use tracing::{debug, info, warn};

use crate::store::{SessionStore, RESULTS_KEY};
use player::{PlayerDirective, PlayerEvent, VideoPlayer};
use profile::Badge;
use timer::{HideTimer, TimerToken};
use video::VideoPlayback;

#[derive(Debug, Error)]
pub enum BrowserError {
    /// Carries the underlying reason for logs; the display text is what the
    /// visitor sees next to the "Back to Search" link.
    #[error("No therapist match data found. Please go back and try again.")]
    NoResultData(String),
}

impl BrowserError {
    pub fn reason(&self) -> &str {
        match self {
            BrowserError::NoResultData(reason) => reason,
        }
    }
}

/// Side effects the host view must carry out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserEffect {
    ScrollToPrimary,
}

/// Everything that can happen to the results view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserEvent {
    SelectProfile(String),
    ToggleOtherCandidates,
    TogglePlayback,
    PointerEnter,
    PointerLeave,
    PlayerLoaded,
    PlayerMessage { origin: String, data: String },
    HideControlsElapsed(TimerToken),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserOptions {
    pub hide_controls_after: Duration,
    pub player_origin: String,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            hide_controls_after: Duration::from_millis(DEFAULT_HIDE_CONTROLS_MS),
            player_origin: DEFAULT_PLAYER_ORIGIN.to_string(),
        }
    }
}

impl From<&Config> for BrowserOptions {
    fn from(config: &Config) -> Self {
        Self {
            hide_controls_after: config.hide_controls_after,
            player_origin: config.player_origin.clone(),
        }
    }
}

/// A shortlist entry other than the primary profile.
#[derive(Debug, Clone, PartialEq)]
pub struct OtherCandidate<'a> {
    pub index: usize,
    pub profile: &'a TherapistProfile,
    pub viewed: bool,
    pub rank_label: String,
}

pub struct ResultsBrowser<P: VideoPlayer, T: HideTimer> {
    result: RankingResult,
    primary_index: usize,
    viewed: HashSet<String>,
    show_other_candidates: bool,
    video: VideoPlayback,
    player: P,
    timer: T,
    options: BrowserOptions,
}

impl<P: VideoPlayer, T: HideTimer> ResultsBrowser<P, T> {
    /// Open the view on whatever the last successful ranking stored.
    pub async fn load<S>(
        store: &S,
        player: P,
        timer: T,
        options: BrowserOptions,
    ) -> Result<Self, BrowserError>
    where
        S: SessionStore + ?Sized,
    {
        let raw = match store.get(RESULTS_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Err(BrowserError::NoResultData("nothing stored".into())),
            Err(e) => {
                warn!(error = %e, "Failed to read stored results");
                return Err(BrowserError::NoResultData(format!("store read failed: {e}")));
            }
        };

        let result: RankingResult = serde_json::from_str(&raw).map_err(|e| {
            warn!(error = %e, "Stored results are unreadable");
            BrowserError::NoResultData(format!("stored results did not parse: {e}"))
        })?;

        Self::from_result(result, player, timer, options)
    }

    pub fn from_result(
        result: RankingResult,
        player: P,
        timer: T,
        options: BrowserOptions,
    ) -> Result<Self, BrowserError> {
        let first = result
            .profiles
            .first()
            .ok_or_else(|| BrowserError::NoResultData("no profiles".into()))?;

        let viewed = HashSet::from([first.uuid.clone()]);
        info!(profiles = result.profiles.len(), "Results loaded");

        Ok(Self {
            result,
            primary_index: 0,
            viewed,
            show_other_candidates: false,
            video: VideoPlayback::default(),
            player,
            timer,
            options,
        })
    }

    // --- Selection ---

    /// Make `uuid` the primary profile. Unknown ids are ignored.
    pub fn select_profile(&mut self, uuid: &str) -> Option<BrowserEffect> {
        let Some(index) = self.result.profiles.iter().position(|p| p.uuid == uuid) else {
            debug!(uuid, "Selected profile not in results");
            return None;
        };

        self.primary_index = index;
        self.viewed.insert(uuid.to_string());
        self.video.reset(&mut self.timer);
        debug!(uuid, index, "Primary profile changed");
        Some(BrowserEffect::ScrollToPrimary)
    }

    pub fn toggle_other_candidates(&mut self) {
        self.show_other_candidates = !self.show_other_candidates;
    }

    // --- Video ---

    pub fn toggle_playback(&mut self) {
        if !self.has_video() {
            return;
        }
        let directive = self
            .video
            .toggle(&mut self.timer, self.options.hide_controls_after);
        self.player.post(directive);
    }

    pub fn pointer_enter(&mut self) {
        if self.has_video() {
            self.video.pointer_enter(&mut self.timer);
        }
    }

    pub fn pointer_leave(&mut self) {
        if self.has_video() {
            self.video
                .pointer_leave(&mut self.timer, self.options.hide_controls_after);
        }
    }

    /// Ask the player to report its own play/pause changes.
    pub fn player_loaded(&mut self) {
        if !self.has_video() {
            return;
        }
        self.player.post(PlayerDirective::Subscribe(PlayerEvent::Play));
        self.player.post(PlayerDirective::Subscribe(PlayerEvent::Pause));
    }

    pub fn player_message(&mut self, origin: &str, data: &str) {
        if !self.has_video() {
            return;
        }
        if let Some(event) = PlayerEvent::parse(origin, data, &self.options.player_origin) {
            self.video
                .apply_external(event, &mut self.timer, self.options.hide_controls_after);
        }
    }

    pub fn hide_controls_elapsed(&mut self, token: TimerToken) {
        self.video.hide_elapsed(token);
    }

    pub fn handle(&mut self, event: BrowserEvent) -> Option<BrowserEffect> {
        match event {
            BrowserEvent::SelectProfile(uuid) => return self.select_profile(&uuid),
            BrowserEvent::ToggleOtherCandidates => self.toggle_other_candidates(),
            BrowserEvent::TogglePlayback => self.toggle_playback(),
            BrowserEvent::PointerEnter => self.pointer_enter(),
            BrowserEvent::PointerLeave => self.pointer_leave(),
            BrowserEvent::PlayerLoaded => self.player_loaded(),
            BrowserEvent::PlayerMessage { origin, data } => self.player_message(&origin, &data),
            BrowserEvent::HideControlsElapsed(token) => self.hide_controls_elapsed(token),
        }
        None
    }

    /// Cancel any pending hide timer. Also run on drop.
    pub fn teardown(&mut self) {
        self.video.reset(&mut self.timer);
    }

    // --- Accessors ---

    pub fn result(&self) -> &RankingResult {
        &self.result
    }

    pub fn primary_index(&self) -> usize {
        self.primary_index
    }

    pub fn primary(&self) -> &TherapistProfile {
        &self.result.profiles[self.primary_index]
    }

    pub fn badge(&self) -> Badge {
        profile::badge(self.primary())
    }

    pub fn heading(&self) -> String {
        profile::heading(self.primary())
    }

    pub fn viewed_uuids(&self) -> &HashSet<String> {
        &self.viewed
    }

    pub fn is_viewed(&self, uuid: &str) -> bool {
        self.viewed.contains(uuid)
    }

    pub fn other_candidates_visible(&self) -> bool {
        self.show_other_candidates
    }

    pub fn other_candidates(&self) -> Vec<OtherCandidate<'_>> {
        self.result
            .profiles
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != self.primary_index)
            .map(|(index, profile)| OtherCandidate {
                index,
                profile,
                viewed: self.viewed.contains(&profile.uuid),
                rank_label: profile::rank_label(profile),
            })
            .collect()
    }

    pub fn other_candidates_label(&self) -> String {
        if self.show_other_candidates {
            "Hide Other Matches".to_string()
        } else {
            format!(
                "View Other Qualified Matches ({})",
                self.result.profiles.len() - 1
            )
        }
    }

    pub fn has_video(&self) -> bool {
        self.primary().playable_video().is_some()
    }

    pub fn video(&self) -> &VideoPlayback {
        &self.video
    }

    pub fn embed_url(&self) -> Option<String> {
        self.primary()
            .playable_video()
            .map(|video| player::embed_url(&video.source))
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }
}

impl<P: VideoPlayer, T: HideTimer> Drop for ResultsBrowser<P, T> {
    fn drop(&mut self) {
        self.teardown();
    }
}
