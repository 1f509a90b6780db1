use contracts::contests::Contest;
use serde::{Deserialize, Serialize};

/// The whole session is either out of contest mode or in exactly one
/// contest. Serializable so it can round-trip through the storage port.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionState {
    Idle,
    InContest(Contest),
}

impl SessionState {
    pub fn is_in_contest(&self) -> bool {
        matches!(self, SessionState::InContest(_))
    }

    pub fn contest(&self) -> Option<&Contest> {
        match self {
            SessionState::Idle => None,
            SessionState::InContest(contest) => Some(contest),
        }
    }
}
