//! The search/fetch state machine behind both user interfaces.
//!
//! A [`SearchController`] owns three pieces of state: the current result
//! list, a loading flag, and a user-facing error string. Fetches run on
//! short-lived worker threads and report back over a channel; the thread
//! that owns the controller applies every state change inside [`poll`],
//! so callers never see a half-updated state.
//!
//! Lifecycle: creation issues an unconditional fetch of the full country
//! list, then the controller accepts triggers for the rest of the session —
//! direct ones via [`fetch_countries`], debounced ones via
//! [`on_query_change`]. There is no terminal state.
//!
//! Out-of-order protection: every fetch gets a monotonically increasing
//! sequence number and only the latest-issued fetch may touch state. A slow
//! response for a superseded query is discarded, so the last-triggered query
//! is authoritative regardless of network timing.
//!
//! [`poll`]: SearchController::poll
//! [`fetch_countries`]: SearchController::fetch_countries
//! [`on_query_change`]: SearchController::on_query_change

use crate::api::{CountrySource, FetchError, Query};
use crate::debounce::Debouncer;
use crate::models::Country;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

/// Quiet period between the last keystroke and the search request.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Message shown when a fetch succeeds with an empty result list. The 404
/// case carries its own, slightly different message (see
/// [`FetchError::NotFound`]).
const EMPTY_RESULT_MESSAGE: &str = "No countries found";

/// What the render layer reads: the result list, the loading flag, and the
/// error message (empty string = no error).
///
/// `error` is non-empty only while `countries` is empty; results and error
/// text never render together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControllerState {
    pub countries: Vec<Country>,
    pub loading: bool,
    pub error: String,
}

enum Event {
    /// The debouncer let a (trimmed) query through. `generation` identifies
    /// which call to [`SearchController::on_query_change`] it came from.
    DebouncedQuery { generation: u64, query: String },
    /// A fetch worker finished. `seq` identifies which fetch.
    FetchSettled {
        seq: u64,
        outcome: Result<Vec<Country>, FetchError>,
    },
}

/// Debounced search over a [`CountrySource`], with loading/error state.
///
/// The controller is single-threaded by design: construct it, feed it input,
/// and call [`poll`](Self::poll) from the owning thread (e.g. once per UI
/// frame). Worker threads only ever send messages.
pub struct SearchController {
    source: Arc<dyn CountrySource>,
    state: ControllerState,
    /// Sequence number of the most recently issued fetch.
    seq: u64,
    /// Generation of the most recent `on_query_change` call.
    input_generation: u64,
    /// True while a debounced query from the latest generation is still due.
    query_pending: bool,
    events: Receiver<Event>,
    events_tx: Sender<Event>,
    debouncer: Debouncer<(u64, String)>,
}

impl SearchController {
    /// Create a controller and immediately fetch the full country list,
    /// debouncing query changes by [`DEFAULT_DEBOUNCE`].
    pub fn new(source: Arc<dyn CountrySource>) -> Self {
        Self::with_debounce_delay(source, DEFAULT_DEBOUNCE)
    }

    /// Like [`new`](Self::new) with a custom quiet period (tests use short
    /// ones).
    pub fn with_debounce_delay(source: Arc<dyn CountrySource>, delay: Duration) -> Self {
        let (events_tx, events) = mpsc::channel();
        let ready_tx = events_tx.clone();
        let debouncer = Debouncer::new(delay, move |(generation, query)| {
            let _ = ready_tx.send(Event::DebouncedQuery { generation, query });
        });
        let mut controller = Self {
            source,
            state: ControllerState::default(),
            seq: 0,
            input_generation: 0,
            query_pending: false,
            events,
            events_tx,
            debouncer,
        };
        // The session opens on the full list.
        controller.fetch_countries(Query::All);
        controller
    }

    /// Start a fetch for `query` on a worker thread.
    ///
    /// Sets `loading`, clears the error, and stamps the fetch with the next
    /// sequence number; the outcome is applied by a later [`poll`](Self::poll)
    /// unless a newer fetch supersedes it first.
    pub fn fetch_countries(&mut self, query: Query) {
        self.seq += 1;
        let seq = self.seq;
        self.state.loading = true;
        self.state.error.clear();

        let source = Arc::clone(&self.source);
        let settled = self.events_tx.clone();
        thread::spawn(move || {
            let outcome = source.fetch(&query);
            let _ = settled.send(Event::FetchSettled { seq, outcome });
        });
    }

    /// Feed raw search-field text. The input is trimmed and debounced; once
    /// the quiet period elapses, an empty string fetches the full list and
    /// anything else becomes a name search.
    pub fn on_query_change(&mut self, raw: &str) {
        self.input_generation += 1;
        self.query_pending = true;
        self.debouncer
            .call((self.input_generation, raw.trim().to_string()));
    }

    /// Apply everything that happened since the last call: debounced queries
    /// turn into fetches, settled fetches update state. Never blocks.
    pub fn poll(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                Event::DebouncedQuery { generation, query } => {
                    if generation == self.input_generation {
                        self.query_pending = false;
                    }
                    self.fetch_countries(Query::from_input(&query));
                }
                Event::FetchSettled { seq, outcome } => {
                    // Superseded fetch: the newer request owns the state.
                    if seq == self.seq {
                        self.apply(outcome);
                    }
                }
            }
        }
    }

    fn apply(&mut self, outcome: Result<Vec<Country>, FetchError>) {
        match outcome {
            Ok(countries) if countries.is_empty() => {
                self.state.countries = countries;
                self.state.error = EMPTY_RESULT_MESSAGE.to_string();
            }
            Ok(countries) => {
                self.state.countries = countries;
                self.state.error.clear();
            }
            Err(err) => {
                // Keep "results" and "error" mutually exclusive render states.
                self.state.countries.clear();
                self.state.error = err.to_string();
            }
        }
        self.state.loading = false;
    }

    /// Current state; replaced wholesale as fetches settle.
    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// False while a fetch is in flight or a debounced query is still due.
    /// Surfaces keep polling (and repainting) until this returns true.
    pub fn is_idle(&self) -> bool {
        !self.state.loading && !self.query_pending
    }

    /// The configured quiet period.
    pub fn debounce_delay(&self) -> Duration {
        self.debouncer.delay()
    }
}
