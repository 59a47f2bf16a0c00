//! Decides when a ranking request goes out, and guards the control that sends it.

use theramatch_common::config::DEFAULT_CONFIRM_THRESHOLD;
use theramatch_common::{MatchSignal, Message, RankingRequest};
use tracing::{debug, info};

use crate::dispatch::DispatchOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    DispatchImmediately,
    RequireConfirmation,
}

/// Large candidate pools make ranking slow and the shortlist less useful,
/// so above the threshold the visitor is asked first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingGate {
    threshold: u64,
}

impl Default for RankingGate {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIRM_THRESHOLD)
    }
}

impl RankingGate {
    pub fn new(threshold: u64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    pub fn decide(&self, match_count: u64) -> GateDecision {
        if match_count > self.threshold {
            GateDecision::RequireConfirmation
        } else {
            GateDecision::DispatchImmediately
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlState {
    Idle,
    AwaitingConfirmation { match_count: u64 },
    Loading,
    Succeeded,
}

/// What the caller must do after a user action on the control.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlAction {
    /// Send this request. The control is now loading until `settle`.
    Dispatch(RankingRequest),
    /// Show the one-shot confirmation prompt.
    AskConfirmation { match_count: u64 },
    /// Nothing to do (e.g. a request is already in flight).
    Ignored,
}

/// The "Find Match" control.
///
/// Exists only while at least one filter is applied. While a request is in
/// flight further triggers are ignored, so one control never has two
/// concurrent ranking requests.
#[derive(Debug, Clone)]
pub struct FindMatchControl {
    gate: RankingGate,
    signal: MatchSignal,
    state: ControlState,
}

impl FindMatchControl {
    /// `None` when no filters are applied: there is nothing to rank against.
    pub fn new(signal: MatchSignal, gate: RankingGate) -> Option<Self> {
        if !signal.has_filters() {
            return None;
        }
        Some(Self {
            gate,
            signal,
            state: ControlState::Idle,
        })
    }

    /// Track the latest signal. Returns `false` when filters went empty and
    /// the control should be removed; until filters come back it stays inert
    /// and any pending confirmation is dropped.
    pub fn update_signal(&mut self, signal: MatchSignal) -> bool {
        self.signal = signal;
        let has_filters = self.signal.has_filters();
        if !has_filters {
            if let ControlState::AwaitingConfirmation { match_count } = self.state {
                debug!(match_count, "Filters cleared while awaiting confirmation");
                self.state = ControlState::Idle;
            }
        }
        has_filters
    }

    pub fn state(&self) -> ControlState {
        self.state
    }

    pub fn signal(&self) -> &MatchSignal {
        &self.signal
    }

    pub fn is_enabled(&self) -> bool {
        self.state != ControlState::Loading && self.signal.has_filters()
    }

    pub fn trigger(&mut self, transcript: &[Message]) -> ControlAction {
        if !self.signal.has_filters() {
            debug!("Find match trigger ignored without filters");
            return ControlAction::Ignored;
        }
        if self.state != ControlState::Idle {
            debug!(state = ?self.state, "Find match trigger ignored");
            return ControlAction::Ignored;
        }

        let match_count = self.signal.match_count.unwrap_or(0);
        match self.gate.decide(match_count) {
            GateDecision::DispatchImmediately => self.start(transcript),
            GateDecision::RequireConfirmation => {
                info!(match_count, threshold = self.gate.threshold(), "Asking before ranking");
                self.state = ControlState::AwaitingConfirmation { match_count };
                ControlAction::AskConfirmation { match_count }
            }
        }
    }

    /// The affirmative answer goes straight to dispatch.
    pub fn confirm(&mut self, transcript: &[Message]) -> ControlAction {
        if !self.signal.has_filters() {
            return ControlAction::Ignored;
        }
        match self.state {
            ControlState::AwaitingConfirmation { .. } => self.start(transcript),
            _ => ControlAction::Ignored,
        }
    }

    pub fn cancel(&mut self) {
        if let ControlState::AwaitingConfirmation { match_count } = self.state {
            debug!(match_count, "Ranking cancelled at confirmation");
            self.state = ControlState::Idle;
        }
    }

    /// Leave `Loading` once the dispatch has finished.
    pub fn settle(&mut self, outcome: &DispatchOutcome) {
        if self.state != ControlState::Loading {
            return;
        }
        self.state = match outcome {
            DispatchOutcome::ShowResults => ControlState::Succeeded,
            DispatchOutcome::Failed(_) => ControlState::Idle,
        };
    }

    fn start(&mut self, transcript: &[Message]) -> ControlAction {
        self.state = ControlState::Loading;
        ControlAction::Dispatch(RankingRequest::snapshot(transcript))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ranking_client::RankingError;

    fn transcript() -> Vec<Message> {
        vec![Message::user("anxiety"), Message::assistant("noted")]
    }

    #[test]
    fn threshold_boundary() {
        let gate = RankingGate::default();
        assert_eq!(gate.decide(0), GateDecision::DispatchImmediately);
        assert_eq!(gate.decide(500), GateDecision::DispatchImmediately);
        assert_eq!(gate.decide(501), GateDecision::RequireConfirmation);
    }

    #[test]
    fn no_control_without_filters() {
        assert!(FindMatchControl::new(MatchSignal::new(0, vec![]), RankingGate::default()).is_none());
        assert!(FindMatchControl::new(MatchSignal::new(900, vec![]), RankingGate::default()).is_none());
    }

    #[test]
    fn small_pool_dispatches_immediately() {
        let mut control =
            FindMatchControl::new(MatchSignal::new(120, vec![3]), RankingGate::default()).unwrap();
        match control.trigger(&transcript()) {
            ControlAction::Dispatch(request) => assert_eq!(request.messages.len(), 2),
            other => panic!("unexpected action: {other:?}"),
        }
        assert_eq!(control.state(), ControlState::Loading);
        assert!(!control.is_enabled());
    }

    #[test]
    fn loading_ignores_repeat_triggers() {
        let mut control =
            FindMatchControl::new(MatchSignal::new(120, vec![3]), RankingGate::default()).unwrap();
        control.trigger(&transcript());
        assert_eq!(control.trigger(&transcript()), ControlAction::Ignored);
        assert_eq!(control.confirm(&transcript()), ControlAction::Ignored);
        assert_eq!(control.state(), ControlState::Loading);
    }

    #[test]
    fn large_pool_asks_then_cancel_returns_to_idle() {
        let mut control =
            FindMatchControl::new(MatchSignal::new(620, vec![3, 19]), RankingGate::default()).unwrap();
        assert_eq!(
            control.trigger(&transcript()),
            ControlAction::AskConfirmation { match_count: 620 }
        );
        control.cancel();
        assert_eq!(control.state(), ControlState::Idle);
    }

    #[test]
    fn confirmation_goes_straight_to_dispatch() {
        let mut control =
            FindMatchControl::new(MatchSignal::new(620, vec![3, 19]), RankingGate::default()).unwrap();
        control.trigger(&transcript());
        assert!(matches!(control.confirm(&transcript()), ControlAction::Dispatch(_)));
        assert_eq!(control.state(), ControlState::Loading);
    }

    #[test]
    fn confirm_without_prompt_is_ignored() {
        let mut control =
            FindMatchControl::new(MatchSignal::new(620, vec![3]), RankingGate::default()).unwrap();
        assert_eq!(control.confirm(&transcript()), ControlAction::Ignored);
        assert_eq!(control.state(), ControlState::Idle);
    }

    #[test]
    fn failure_returns_to_idle_and_success_is_final() {
        let mut control =
            FindMatchControl::new(MatchSignal::new(10, vec![3]), RankingGate::default()).unwrap();
        control.trigger(&transcript());
        control.settle(&DispatchOutcome::Failed(RankingError::RequestFailed("down".into())));
        assert_eq!(control.state(), ControlState::Idle);

        control.trigger(&transcript());
        control.settle(&DispatchOutcome::ShowResults);
        assert_eq!(control.state(), ControlState::Succeeded);
        assert_eq!(control.trigger(&transcript()), ControlAction::Ignored);
    }

    #[test]
    fn missing_count_counts_as_zero() {
        let signal = MatchSignal {
            match_count: None,
            filters_applied: vec![6],
            ..Default::default()
        };
        let mut control = FindMatchControl::new(signal, RankingGate::default()).unwrap();
        assert!(matches!(control.trigger(&transcript()), ControlAction::Dispatch(_)));
    }

    #[test]
    fn update_signal_reports_when_filters_vanish() {
        let mut control =
            FindMatchControl::new(MatchSignal::new(10, vec![3]), RankingGate::default()).unwrap();
        assert!(control.update_signal(MatchSignal::new(700, vec![3, 2])));
        assert_eq!(
            control.trigger(&transcript()),
            ControlAction::AskConfirmation { match_count: 700 }
        );
        assert!(!control.update_signal(MatchSignal::new(3000, vec![])));
    }

    #[test]
    fn cleared_filters_disable_the_control() {
        let mut control =
            FindMatchControl::new(MatchSignal::new(10, vec![3]), RankingGate::default()).unwrap();
        assert!(!control.update_signal(MatchSignal::new(10, vec![])));
        assert!(!control.is_enabled());
        assert_eq!(control.trigger(&transcript()), ControlAction::Ignored);
        assert_eq!(control.state(), ControlState::Idle);

        assert!(control.update_signal(MatchSignal::new(10, vec![6])));
        assert!(matches!(control.trigger(&transcript()), ControlAction::Dispatch(_)));
    }

    #[test]
    fn cleared_filters_drop_pending_confirmation() {
        let mut control =
            FindMatchControl::new(MatchSignal::new(620, vec![3, 19]), RankingGate::default())
                .unwrap();
        control.trigger(&transcript());
        control.update_signal(MatchSignal::new(620, vec![]));

        assert_eq!(control.state(), ControlState::Idle);
        assert_eq!(control.confirm(&transcript()), ControlAction::Ignored);
    }
}
