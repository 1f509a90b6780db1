use contracts::contests::{Contest, ResultPayload};
use tracing::{debug, warn};

use crate::api::ContestApi;
use crate::config::{TestConfig, apply_contest_options};
use crate::error::SessionError;
use crate::state::SessionState;
use crate::store::{CONTEST_DATA_KEY, CONTEST_MODE_KEY, SessionStore};

/// Query parameter marking a navigation as part of the join redirect.
/// Navigations carrying it do not exit the session.
pub const JOIN_MARKER: &str = "contest=true";

/// Where the join transition redirects, carrying the marker so the
/// navigation handler does not immediately exit the fresh session.
pub const JOIN_REDIRECT: &str = "/?contest=true";

/// What a successful join hands back to the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinOutcome {
    pub contest: Contest,
    /// Test configuration with the contest's options applied. Not written
    /// to the user's saved preferences.
    pub applied_config: TestConfig,
    pub redirect: &'static str,
}

/// The contest session state machine. State is reconstructed from the
/// store on startup and written back on every transition.
pub struct ContestSession<S, A> {
    state: SessionState,
    store: S,
    api: A,
}

impl<S: SessionStore, A: ContestApi> ContestSession<S, A> {
    /// Rebuild the session from persisted state. Runs before any
    /// navigation decision, so a mid-session page refresh stays in
    /// contest mode. Unreadable or inconsistent snapshots fall back to
    /// `Idle` and are cleared.
    pub fn restore(store: S, api: A) -> Self {
        let mut session = Self {
            state: SessionState::Idle,
            store,
            api,
        };

        let flag = match session.store.get(CONTEST_MODE_KEY) {
            Ok(Some(v)) => v == "true",
            Ok(None) => false,
            Err(e) => {
                warn!("Failed to read session flag: {e}");
                false
            }
        };
        if !flag {
            return session;
        }

        match session.store.get(CONTEST_DATA_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Contest>(&raw) {
                Ok(contest) => {
                    debug!(contest_id = contest.id, "Restored contest session");
                    session.state = SessionState::InContest(contest);
                }
                Err(e) => {
                    warn!("Discarding unreadable contest snapshot: {e}");
                    let _ = session.clear_persisted();
                }
            },
            // Flag set without a snapshot is a stale half-write
            Ok(None) => {
                let _ = session.clear_persisted();
            }
            Err(e) => {
                warn!("Failed to read contest snapshot: {e}");
            }
        }

        session
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Join the currently active contest: fetch it, persist the session,
    /// and hand back the applied test configuration plus the redirect
    /// target for the test view.
    pub async fn join(&mut self, current_config: &TestConfig) -> Result<JoinOutcome, SessionError> {
        let contest = self
            .api
            .get_active_contest()
            .await?
            .ok_or(SessionError::NoActiveContest)?;

        let applied_config = apply_contest_options(current_config, &contest.options);

        self.store.set(CONTEST_MODE_KEY, "true")?;
        self.store
            .set(CONTEST_DATA_KEY, &serde_json::to_string(&contest)?)?;
        self.state = SessionState::InContest(contest.clone());

        Ok(JoinOutcome {
            contest,
            applied_config,
            redirect: JOIN_REDIRECT,
        })
    }

    /// React to a navigation. Leaving for any view exits the session,
    /// except when the target itself carries the join marker; that case is
    /// the join redirect landing on the test view.
    pub fn handle_navigation(&mut self, target: &str) -> Result<(), SessionError> {
        if !self.state.is_in_contest() {
            return Ok(());
        }
        if has_join_marker(target) {
            return Ok(());
        }
        debug!(target, "Leaving contest mode on navigation");
        self.exit()
    }

    /// Submit a finished test's stats to the joined contest. Success
    /// reports the attempt number; neither outcome changes session state.
    pub async fn submit(&self, result: &ResultPayload) -> Result<i32, SessionError> {
        if !self.state.is_in_contest() {
            return Err(SessionError::NotInContest);
        }

        let data = self.api.submit_result(result).await?;
        Ok(data.attempt_number)
    }

    /// Leave contest mode and clear the persisted snapshot.
    pub fn exit(&mut self) -> Result<(), SessionError> {
        self.state = SessionState::Idle;
        self.clear_persisted()
    }

    fn clear_persisted(&mut self) -> Result<(), SessionError> {
        self.store.remove(CONTEST_MODE_KEY)?;
        self.store.remove(CONTEST_DATA_KEY)
    }
}

/// Whether a navigation target's query string carries the join marker.
fn has_join_marker(target: &str) -> bool {
    target
        .split_once('?')
        .map(|(_, query)| query.split('&').any(|pair| pair == JOIN_MARKER))
        .unwrap_or(false)
}
