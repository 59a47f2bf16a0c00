pub mod dispatch;
pub mod gate;
pub mod notify;
pub mod results;
pub mod store;

pub use dispatch::{DispatchOutcome, RankingDispatcher};
pub use gate::{ControlAction, ControlState, FindMatchControl, GateDecision, RankingGate};
pub use notify::{Notification, Notifier, RecordingNotifier, TracingNotifier};
pub use results::player::{PlayerDirective, PlayerEvent, RecordingPlayer, VideoPlayer};
pub use results::timer::{HideTimer, ManualHideTimer, TimerToken, TokioHideTimer};
pub use results::video::VideoPlayback;
pub use results::{
    BrowserEffect, BrowserError, BrowserEvent, BrowserOptions, OtherCandidate, ResultsBrowser,
};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore, StoreError, RESULTS_KEY};
