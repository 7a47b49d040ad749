use countries_rs::api::StatusCode;
use countries_rs::{Client, FetchError, Query};

#[test]
fn all_countries_url() {
    let client = Client::default();
    assert_eq!(
        client.url_for(&Query::All),
        "https://restcountries.com/v3.1/all?fields=name,flags,population"
    );
}

#[test]
fn named_url_is_percent_encoded() {
    let client = Client::default();
    assert_eq!(
        client.url_for(&Query::Named("united states".into())),
        "https://restcountries.com/v3.1/name/united%20states?fields=name,flags,population"
    );
    assert_eq!(
        client.url_for(&Query::Named("côte d'ivoire".into())),
        "https://restcountries.com/v3.1/name/c%C3%B4te%20d%27ivoire?fields=name,flags,population"
    );
}

#[test]
fn named_url_keeps_hyphens() {
    let client = Client::default();
    assert_eq!(
        client.url_for(&Query::Named("guinea-bissau".into())),
        "https://restcountries.com/v3.1/name/guinea-bissau?fields=name,flags,population"
    );
}

#[test]
fn base_url_is_overridable() {
    let mut client = Client::default();
    client.base_url = "http://localhost:8080".into();
    assert!(
        client
            .url_for(&Query::All)
            .starts_with("http://localhost:8080/v3.1/all")
    );
}

#[test]
fn query_from_input_maps_empty_to_all() {
    assert_eq!(Query::from_input(""), Query::All);
    assert_eq!(Query::from_input("fra"), Query::Named("fra".into()));
}

#[test]
fn error_messages_match_their_causes() {
    assert_eq!(FetchError::NotFound.to_string(), "No countries found.");
    assert_eq!(
        FetchError::ServerError.to_string(),
        "Something went wrong, please try again later."
    );
    assert_eq!(
        FetchError::Status(StatusCode::BAD_GATEWAY).to_string(),
        "Request failed with HTTP 502 Bad Gateway."
    );
}
