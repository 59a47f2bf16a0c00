use crate::categories::FilterCategoryTable;
use crate::types::MatchSignal;

/// Upstream search reports at most this many matches.
pub const MATCH_COUNT_CAP: u64 = 10_000;

const REFINE_HINT: &str = "Continue the conversation to refine your search.";

/// Text shown beside the chat input for the running match state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorView {
    pub badge: String,
    pub detail: String,
    pub hint: &'static str,
    pub pulsing: bool,
}

pub struct MatchIndicator;

impl MatchIndicator {
    /// Nothing is shown until the assistant has reported a count.
    pub fn render(signal: &MatchSignal, table: &FilterCategoryTable) -> Option<IndicatorView> {
        let count = signal.match_count?;

        let labels = table.labels(&signal.filters_applied);
        let detail = if labels.is_empty() {
            count_text(count)
        } else {
            labels.join(", ").to_lowercase()
        };

        Some(IndicatorView {
            badge: format!("{count} matches"),
            detail,
            hint: REFINE_HINT,
            pulsing: count > 0,
        })
    }
}

fn count_text(count: u64) -> String {
    if count == MATCH_COUNT_CAP {
        format!("{count}+ matches")
    } else {
        format!("{count} matches")
    }
}
