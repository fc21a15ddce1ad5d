//! Load-state machine for the initial point fetch.
//!
//! The engine never performs network I/O itself; the host fetches the point
//! payload and hands the result to this machine. Each `begin` bumps a
//! generation counter and every resolution must present the generation it
//! was started with — a resolution arriving after a retry or after teardown
//! carries a stale generation and is ignored, so no state is ever written by
//! a late future.
//!
//! Fetch failure parks the machine in [`LoadState::Failed`] until the user
//! retries; there is no automatic retry loop.

#[cfg(test)]
#[path = "loader_test.rs"]
mod loader_test;

use serde::Deserialize;
use thiserror::Error;

use crate::field::RawFieldPoint;

/// Error while obtaining or decoding the point payload.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The payload was not valid JSON for the expected envelope.
    #[error("failed to parse field data: {0}")]
    Parse(#[from] serde_json::Error),
    /// The host's fetch failed before any payload arrived.
    #[error("field data request failed: {0}")]
    Fetch(String),
}

/// Wire envelope returned by the data provider.
#[derive(Debug, Deserialize)]
pub struct PointsResponse {
    #[serde(default)]
    pub points: Vec<RawFieldPoint>,
}

/// Outcome of handing a fetch result to the loader.
#[derive(Debug, PartialEq)]
pub enum Resolution {
    /// The payload parsed; these points belong in the store.
    Ready(Vec<RawFieldPoint>),
    /// The fetch or the parse failed; state moved to [`LoadState::Failed`].
    Failed,
    /// The generation was stale; nothing changed.
    Stale,
}

/// Where the initial fetch currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// No fetch started yet.
    Idle,
    /// A fetch is in flight.
    Loading,
    /// Points arrived and were handed to the store.
    Ready,
    /// The fetch or the parse failed; shown to the user with a retry action.
    Failed {
        /// User-displayable failure description.
        message: String,
    },
}

/// Generation-counted fetch tracker.
pub struct Loader {
    state: LoadState,
    generation: u64,
}

impl Loader {
    /// Create a loader that has not started fetching.
    #[must_use]
    pub fn new() -> Self {
        Self { state: LoadState::Idle, generation: 0 }
    }

    /// Current load state.
    #[must_use]
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Whether a fetch is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    /// Start (or retry) a fetch. Returns the generation token the host must
    /// present when resolving. Any outstanding older fetch becomes stale.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.state = LoadState::Loading;
        self.generation
    }

    /// Invalidate all outstanding fetches without starting a new one.
    ///
    /// Called on teardown so a resolution landing after unmount is ignored.
    pub fn invalidate(&mut self) {
        self.generation += 1;
    }

    /// Resolve a fetch with the raw JSON payload.
    ///
    /// When `generation` is current and the parse succeeds the state becomes
    /// `Ready` and the points are returned for the store. A parse failure
    /// moves to `Failed`. A stale generation leaves the state untouched.
    pub fn resolve_json(&mut self, generation: u64, payload: &str) -> Resolution {
        if !self.accepts(generation) {
            return Resolution::Stale;
        }
        match serde_json::from_str::<PointsResponse>(payload) {
            Ok(response) => {
                self.state = LoadState::Ready;
                Resolution::Ready(response.points)
            }
            Err(err) => {
                let err = LoadError::from(err);
                self.state = LoadState::Failed { message: err.to_string() };
                Resolution::Failed
            }
        }
    }

    /// Resolve a fetch that failed before producing a payload.
    ///
    /// Stale generations are ignored, as in [`Self::resolve_json`].
    pub fn fail(&mut self, generation: u64, error: &LoadError) -> Resolution {
        if !self.accepts(generation) {
            return Resolution::Stale;
        }
        self.state = LoadState::Failed { message: error.to_string() };
        Resolution::Failed
    }

    fn accepts(&self, generation: u64) -> bool {
        generation == self.generation && self.state == LoadState::Loading
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
