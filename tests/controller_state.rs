//! Headless tests for the search/fetch state machine: loading and error
//! lifecycles, debounced input, and out-of-order response handling, all
//! driven through a scripted [`CountrySource`] instead of live HTTP.

use countries_rs::api::{CountrySource, FetchError, Query, StatusCode};
use countries_rs::models::{Country, CountryName, Flags};
use countries_rs::{Client, SearchController};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// Short quiet period so debounce tests stay fast.
const SHORT_DEBOUNCE: Duration = Duration::from_millis(150);

fn country(name: &str, population: u64) -> Country {
    Country {
        name: CountryName {
            common: name.to_string(),
        },
        flags: Flags {
            png: format!("https://flagcdn.com/w320/{}.png", name.to_lowercase()),
            alt: None,
        },
        population,
    }
}

/// One scripted response per query.
#[derive(Clone)]
enum Scripted {
    Ok(Vec<Country>),
    /// Success delivered only after a delay (for racing fetches).
    SlowOk(Vec<Country>, Duration),
    NotFound,
    ServerError,
    Status(u16),
}

/// Scripted stand-in for the HTTP client, with a call log.
struct FakeSource {
    script: Mutex<HashMap<Query, Scripted>>,
    calls: Mutex<Vec<Query>>,
}

impl FakeSource {
    fn new() -> Self {
        Self {
            script: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn on(&self, query: Query, outcome: Scripted) {
        self.script.lock().unwrap().insert(query, outcome);
    }

    fn calls(&self) -> Vec<Query> {
        self.calls.lock().unwrap().clone()
    }
}

impl CountrySource for FakeSource {
    fn fetch(&self, query: &Query) -> Result<Vec<Country>, FetchError> {
        self.calls.lock().unwrap().push(query.clone());
        let scripted = self
            .script
            .lock()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or(Scripted::Ok(Vec::new()));
        match scripted {
            Scripted::Ok(countries) => Ok(countries),
            Scripted::SlowOk(countries, delay) => {
                thread::sleep(delay);
                Ok(countries)
            }
            Scripted::NotFound => Err(FetchError::NotFound),
            Scripted::ServerError => Err(FetchError::ServerError),
            Scripted::Status(code) => Err(FetchError::Status(
                StatusCode::from_u16(code).expect("valid status code"),
            )),
        }
    }
}

/// Poll until the controller goes idle (all debounced queries fired, all
/// fetches settled) or the deadline passes.
fn settle(controller: &mut SearchController) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !controller.is_idle() {
        assert!(
            Instant::now() < deadline,
            "controller did not settle in time"
        );
        controller.poll();
        thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn initial_fetch_loads_all_countries() {
    let fake = Arc::new(FakeSource::new());
    fake.on(
        Query::All,
        Scripted::Ok(vec![country("Germany", 83_240_525), country("France", 67_391_582)]),
    );

    let mut controller = SearchController::new(Arc::clone(&fake) as Arc<dyn CountrySource>);
    // Creation transitions straight into loading.
    assert!(controller.state().loading);
    assert!(controller.state().error.is_empty());

    settle(&mut controller);
    let state = controller.state();
    assert!(!state.loading);
    assert!(state.error.is_empty());
    assert_eq!(state.countries.len(), 2);
    assert_eq!(state.countries[0].name.common, "Germany");
    assert_eq!(fake.calls(), vec![Query::All]);
}

#[test]
fn empty_result_sets_message() {
    let fake = Arc::new(FakeSource::new());
    fake.on(Query::All, Scripted::Ok(Vec::new()));

    let mut controller = SearchController::new(Arc::clone(&fake) as Arc<dyn CountrySource>);
    settle(&mut controller);

    let state = controller.state();
    assert!(state.countries.is_empty());
    assert_eq!(state.error, "No countries found");
    assert!(!state.loading);
}

#[test]
fn not_found_clears_results_and_sets_message() {
    let fake = Arc::new(FakeSource::new());
    fake.on(Query::All, Scripted::Ok(vec![country("Germany", 83_240_525)]));
    fake.on(Query::Named("atlantis".into()), Scripted::NotFound);

    let mut controller = SearchController::new(Arc::clone(&fake) as Arc<dyn CountrySource>);
    settle(&mut controller);
    assert_eq!(controller.state().countries.len(), 1);

    controller.fetch_countries(Query::Named("atlantis".into()));
    settle(&mut controller);

    let state = controller.state();
    assert!(state.countries.is_empty());
    assert_eq!(state.error, "No countries found.");
}

#[test]
fn server_error_maps_to_try_again_message() {
    let fake = Arc::new(FakeSource::new());
    fake.on(Query::All, Scripted::ServerError);

    let mut controller = SearchController::new(Arc::clone(&fake) as Arc<dyn CountrySource>);
    settle(&mut controller);

    assert_eq!(
        controller.state().error,
        "Something went wrong, please try again later."
    );
    assert!(controller.state().countries.is_empty());
}

#[test]
fn unclassified_status_uses_default_branch() {
    let fake = Arc::new(FakeSource::new());
    fake.on(Query::All, Scripted::Status(502));

    let mut controller = SearchController::new(Arc::clone(&fake) as Arc<dyn CountrySource>);
    settle(&mut controller);

    assert_eq!(
        controller.state().error,
        "Request failed with HTTP 502 Bad Gateway."
    );
}

#[test]
fn transport_failure_reports_generic_message() {
    // A real client pointed at a closed local port: the connection is
    // refused, which exercises the transport-error path end to end.
    let mut client = Client::default();
    client.base_url = "http://127.0.0.1:9".into();

    let mut controller = SearchController::new(Arc::new(client));
    settle(&mut controller);

    let state = controller.state();
    assert_eq!(state.error, "An error occurred while fetching countries.");
    assert!(state.countries.is_empty());
    assert!(!state.loading);
}

#[test]
fn loading_spans_fetch_to_settlement() {
    let fake = Arc::new(FakeSource::new());
    fake.on(
        Query::All,
        Scripted::SlowOk(vec![country("Germany", 83_240_525)], Duration::from_millis(150)),
    );

    let mut controller = SearchController::new(Arc::clone(&fake) as Arc<dyn CountrySource>);
    assert!(controller.state().loading);
    controller.poll();
    // Still in flight: polling must not clear the flag early.
    assert!(controller.state().loading);

    settle(&mut controller);
    assert!(!controller.state().loading);
    assert_eq!(controller.state().countries.len(), 1);
}

#[test]
fn rapid_typing_debounces_to_one_search() {
    let fake = Arc::new(FakeSource::new());
    fake.on(Query::All, Scripted::Ok(vec![country("Germany", 83_240_525)]));
    fake.on(
        Query::Named("france".into()),
        Scripted::Ok(vec![country("France", 67_391_582)]),
    );

    let mut controller = SearchController::with_debounce_delay(
        Arc::clone(&fake) as Arc<dyn CountrySource>,
        SHORT_DEBOUNCE,
    );
    settle(&mut controller);

    // Two keystrokes inside the quiet period; the second also carries
    // whitespace that must be trimmed away.
    controller.on_query_change("fra");
    thread::sleep(Duration::from_millis(30));
    controller.poll();
    controller.on_query_change("  france  ");
    settle(&mut controller);

    // Exactly one search fired, for the final trimmed query.
    assert_eq!(
        fake.calls(),
        vec![Query::All, Query::Named("france".into())]
    );
    assert_eq!(controller.state().countries[0].name.common, "France");
}

#[test]
fn whitespace_query_fetches_the_full_list() {
    let fake = Arc::new(FakeSource::new());
    fake.on(Query::All, Scripted::Ok(vec![country("Germany", 83_240_525)]));

    let mut controller = SearchController::with_debounce_delay(
        Arc::clone(&fake) as Arc<dyn CountrySource>,
        SHORT_DEBOUNCE,
    );
    settle(&mut controller);

    controller.on_query_change("   ");
    settle(&mut controller);

    assert_eq!(fake.calls(), vec![Query::All, Query::All]);
    assert!(controller.state().error.is_empty());
}

#[test]
fn stale_response_is_discarded() {
    let fake = Arc::new(FakeSource::new());
    fake.on(Query::All, Scripted::Ok(vec![country("Germany", 83_240_525)]));
    fake.on(
        Query::Named("slow".into()),
        Scripted::SlowOk(vec![country("Slowland", 1)], Duration::from_millis(250)),
    );
    fake.on(
        Query::Named("fast".into()),
        Scripted::Ok(vec![country("Fastland", 2)]),
    );

    let mut controller = SearchController::new(Arc::clone(&fake) as Arc<dyn CountrySource>);
    settle(&mut controller);

    // Trigger a slow fetch, then supersede it before it resolves.
    controller.fetch_countries(Query::Named("slow".into()));
    controller.fetch_countries(Query::Named("fast".into()));
    settle(&mut controller);
    assert_eq!(controller.state().countries[0].name.common, "Fastland");

    // Let the superseded response land, then confirm it was ignored.
    thread::sleep(Duration::from_millis(400));
    controller.poll();
    let state = controller.state();
    assert_eq!(state.countries[0].name.common, "Fastland");
    assert!(state.error.is_empty());
    assert!(!state.loading);
}

#[test]
fn search_after_failure_recovers() {
    let fake = Arc::new(FakeSource::new());
    fake.on(Query::All, Scripted::ServerError);
    fake.on(
        Query::Named("france".into()),
        Scripted::Ok(vec![country("France", 67_391_582)]),
    );

    let mut controller = SearchController::with_debounce_delay(
        Arc::clone(&fake) as Arc<dyn CountrySource>,
        SHORT_DEBOUNCE,
    );
    settle(&mut controller);
    assert!(!controller.state().error.is_empty());

    controller.on_query_change("france");
    settle(&mut controller);

    let state = controller.state();
    assert!(state.error.is_empty());
    assert_eq!(state.countries.len(), 1);
}
