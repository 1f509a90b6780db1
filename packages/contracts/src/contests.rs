use serde::{Deserialize, Serialize};

/// Typing test mode a contest pins for all participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Time,
    Words,
    Quote,
    Zen,
    Custom,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Time => "time",
            Mode::Words => "words",
            Mode::Quote => "quote",
            Mode::Zen => "zen",
            Mode::Custom => "custom",
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "time" => Ok(Mode::Time),
            "words" => Ok(Mode::Words),
            "quote" => Ok(Mode::Quote),
            "zen" => Ok(Mode::Zen),
            "custom" => Ok(Mode::Custom),
            other => Err(format!("unknown mode '{other}'")),
        }
    }
}

/// Fixed test options attached to a contest. Applied to the local test
/// configuration when joining; never persisted as the user's own preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContestOptions {
    pub mode: Mode,
    /// Duration in seconds for `time` mode, word count for `words` mode.
    #[schema(example = "60")]
    pub mode2: String,
    pub punctuation: bool,
    pub numbers: bool,
}

/// Public view of a contest. Result data is never embedded here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contest {
    pub id: i32,
    #[schema(example = "Weekly Sprint")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Epoch milliseconds. Absent means the contest has no opening bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    /// Epoch milliseconds. Absent means the contest has no closing bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    /// Explicit enabled flag, independent of the time window.
    pub is_active: bool,
    pub options: ContestOptions,
}

/// A single submitted attempt as it appears on the wire.
///
/// The `id` is synthesized per read for transport compatibility and is not
/// stable across reads; results are identified by
/// (contestId, userId, attemptNumber).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContestResult {
    pub id: String,
    pub contest_id: i32,
    pub wpm: f64,
    pub raw_wpm: f64,
    pub cpm: f64,
    pub acc: f64,
    pub consistency: f64,
    /// Server-assigned submission time, epoch milliseconds.
    pub timestamp: i64,
    pub test_duration: f64,
    /// 1-based, strictly sequential per user within a contest.
    pub attempt_number: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restart_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incomplete_test_seconds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub afk_duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bailed_out: Option<bool>,
}

/// Client-supplied portion of a result submission. The server assigns the
/// timestamp and attempt number and derives `cpm` when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResultPayload {
    pub wpm: f64,
    pub raw_wpm: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpm: Option<f64>,
    /// Percentage, at least 50 by contract.
    pub acc: f64,
    pub consistency: f64,
    pub test_duration: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restart_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incomplete_test_seconds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub afk_duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bailed_out: Option<bool>,
}

/// Core stats of a user's best attempt, nested in a leaderboard entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BestAttempt {
    pub wpm: f64,
    pub raw_wpm: f64,
    pub cpm: f64,
    pub acc: f64,
    pub consistency: f64,
    pub timestamp: i64,
    pub test_duration: f64,
    pub attempt_number: i32,
}

/// One leaderboard row: a user's best attempt plus display enrichment.
/// Derived on every read, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub wpm: f64,
    pub raw_wpm: f64,
    pub cpm: f64,
    pub acc: f64,
    pub consistency: f64,
    pub timestamp: i64,
    pub user_id: i32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discord_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discord_avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_premium: Option<bool>,
    /// 1-based position over the full ranked set, not the returned page.
    pub rank: u32,
    pub best_attempt: BestAttempt,
    pub total_attempts: u64,
}

/// Data payload of a successful result submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddResultData {
    /// Synthesized transport id; not stable across reads.
    pub inserted_id: String,
    pub attempt_number: i32,
    /// Omitted when rank computation failed; the submission still succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
}
