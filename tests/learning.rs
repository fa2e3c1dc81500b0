//! Learning tests for the mockito/reqwest interplay the metadata
//! resolver relies on: query strings are part of the mocked path.

use std::collections::HashMap;

use mockito::{mock, Matcher};
use reqwest::blocking::Client;

#[test]
fn mockito_matches_query_strings_in_the_path() {
    let _webserver = mock("GET", "/search?q=abc&type=dataset&per_page=1")
        .with_body("GOTCHA")
        .create();

    let client = Client::new();
    let response = client
        .get(format!("{}/search", mockito::server_url()))
        .query(&[("q", "abc"), ("type", "dataset"), ("per_page", "1")])
        .send()
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(response.text().unwrap(), "GOTCHA");
}

#[test]
fn mockito_reports_unmatched_queries_as_not_implemented() {
    let _webserver = mock("GET", "/search?q=abc")
        .with_body("GOTCHA")
        .create();

    let client = Client::new();
    let response = client
        .get(format!("{}/search", mockito::server_url()))
        .query(&[("q", "other")])
        .send()
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::NOT_IMPLEMENTED);
}

#[test]
fn mockito_expects_json_bodies_from_a_map() {
    let _webserver = mock("POST", Matcher::Any)
        .match_body(Matcher::JsonString(r#"{"foo" : "bar"}"#.into()))
        .with_body("GOTCHA")
        .create();

    let mut map = HashMap::new();
    map.insert("foo", "bar");

    let client = Client::new();
    let response = client
        .post(&mockito::server_url())
        .json(&map)
        .send()
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(response.text().unwrap(), "GOTCHA");
}
