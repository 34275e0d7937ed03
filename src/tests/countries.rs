use std::env;

use rand::{rngs::StdRng, SeedableRng};
use reqwest::Client;
use serial_test::serial;
use wiremock::matchers::{body_string_contains, header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::config::AppConfig;
use crate::services::countries_client::CountriesClient;
use crate::services::quiz::{QuestionType, QuizError, QuizGame, NUM_ANSWERS};
use crate::utils::error::ApiError;

fn countries_fixture() -> serde_json::Value {
    serde_json::json!({
      "data": {
        "countries": [
          { "code": "AD", "name": "Andorra", "capital": "Andorra la Vella", "emoji": "🇦🇩",
            "languages": [ { "code": "ca", "name": "Catalan" } ] },
          { "code": "AQ", "name": "Antarctica", "capital": null, "emoji": "🇦🇶", "languages": [] },
          { "code": "ES", "name": "Spain", "capital": "Madrid", "emoji": "🇪🇸",
            "languages": [ { "code": "es", "name": "Spanish" }, { "code": "eu", "name": "Basque" } ] },
          { "code": "FR", "name": "France", "capital": "Paris", "emoji": "🇫🇷",
            "languages": [ { "code": "fr", "name": "French" } ] },
          { "code": "PT", "name": "Portugal", "capital": "Lisbon", "emoji": "🇵🇹",
            "languages": [ { "code": "pt", "name": "Portuguese" } ] },
          { "code": "IT", "name": "Italy", "capital": "Rome", "emoji": "🇮🇹",
            "languages": [ { "code": "it", "name": "Italian" } ] }
        ]
      }
    })
}

async fn mock_countries(body: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("content-type", "application/json"))
        .and(body_string_contains("countries"))
        .respond_with(body)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn fetches_countries_with_graphql_query() {
    let mock = mock_countries(ResponseTemplate::new(200).set_body_json(countries_fixture())).await;
    let client = CountriesClient::new(Client::new(), mock.uri());

    let countries = client.get_countries_info().await.unwrap();
    assert_eq!(countries.len(), 6);
    assert_eq!(countries[0].capital.as_deref(), Some("Andorra la Vella"));
    assert_eq!(countries[1].capital, None);
    assert_eq!(countries[2].languages.len(), 2);

    let requests = mock.received_requests().await.unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let query = sent["query"].as_str().unwrap();
    for field in ["code", "name", "capital", "emoji", "languages"] {
        assert!(query.contains(field), "query misses {field}");
    }
}

#[tokio::test]
async fn graphql_errors_are_external_failures() {
    let body = serde_json::json!({ "errors": [ { "message": "Cannot query field" } ] });
    let mock = mock_countries(ResponseTemplate::new(200).set_body_json(body)).await;
    let client = CountriesClient::new(Client::new(), mock.uri());

    let err = client.get_countries_info().await.unwrap_err();
    assert!(matches!(err, ApiError::External(ref m) if m.contains("Cannot query field")));
}

#[tokio::test]
async fn http_errors_are_external_failures() {
    let mock = mock_countries(ResponseTemplate::new(502)).await;
    let client = CountriesClient::new(Client::new(), mock.uri());
    assert!(matches!(client.get_countries_info().await, Err(ApiError::External(_))));
}

#[tokio::test]
async fn quiz_loads_and_asks_a_flag_question() {
    let mock = mock_countries(ResponseTemplate::new(200).set_body_json(countries_fixture())).await;
    let client = CountriesClient::new(Client::new(), mock.uri());
    let mut rng = StdRng::seed_from_u64(42);

    let game = QuizGame::load(&client, &mut rng).await.unwrap();
    let view = game.view().unwrap();
    assert_eq!(view.kind, QuestionType::Flag);
    assert_eq!(view.answers.len(), NUM_ANSWERS);
    assert!(view.prompt.starts_with("What is the flag of <span class=\"country\">"));
    // Antarctica has no capital, so it is never the subject of a round.
    assert_ne!(game.session().chosen_country, Some(1));
}

#[tokio::test]
async fn quiz_load_surfaces_fetch_failures() {
    let mock = mock_countries(ResponseTemplate::new(500)).await;
    let client = CountriesClient::new(Client::new(), mock.uri());
    let mut rng = StdRng::seed_from_u64(1);

    let res = QuizGame::load(&client, &mut rng).await;
    assert!(matches!(res, Err(QuizError::External(ApiError::External(_)))));
}

#[tokio::test]
#[serial] // touches process env
async fn configured_client_uses_shared_state_http() {
    let mock = mock_countries(ResponseTemplate::new(200).set_body_json(countries_fixture())).await;
    let tmpdir = tempfile::TempDir::new().expect("tmpdir");
    env::set_var("COUNTRIES_API_URL", mock.uri());
    env::set_var("SITE_ROOT", tmpdir.path().to_string_lossy().to_string());

    let cfg = AppConfig::from_env().expect("config");
    let state = cfg.build_state().await.expect("state");
    let client = cfg.countries_client(state.http.clone());
    let countries = client.get_countries_info().await;

    env::remove_var("COUNTRIES_API_URL");
    env::remove_var("SITE_ROOT");

    assert_eq!(countries.unwrap().len(), 6);
}
