//! Client-side contest session: a serializable state machine over an
//! injected persistence port and network port, so mid-contest state
//! survives a page reload and the transitions stay independently testable.

pub mod api;
pub mod config;
pub mod error;
pub mod session;
pub mod state;
pub mod store;

pub use api::ContestApi;
pub use config::{TestConfig, apply_contest_options};
pub use error::SessionError;
pub use session::{ContestSession, JoinOutcome};
pub use state::SessionState;
pub use store::{CONTEST_DATA_KEY, CONTEST_MODE_KEY, MemoryStore, SessionStore};
