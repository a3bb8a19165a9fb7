//! OpenWeather provider and fetch pipeline against a mock HTTP server.

use weather_core::{
    Event, FetchError, FetchState, OpenWeatherProvider, WeatherApp, WeatherProvider,
    fetch_weather,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn current_body() -> serde_json::Value {
    serde_json::json!({
        "coord": { "lon": -0.1257, "lat": 51.5085 },
        "weather": [{ "id": 500, "main": "Rain", "description": "light rain", "icon": "10d" }],
        "main": {
            "temp": 11.4,
            "feels_like": 10.6,
            "temp_min": 10.2,
            "temp_max": 12.3,
            "pressure": 1009,
            "humidity": 82
        },
        "visibility": 9000,
        "wind": { "speed": 5.14, "deg": 240 },
        "dt": 1705492800,
        "sys": { "country": "GB", "sunrise": 1705478000, "sunset": 1705508000 },
        "name": "London",
        "cod": 200
    })
}

fn forecast_body(samples: usize) -> serde_json::Value {
    let list: Vec<serde_json::Value> = (0..samples)
        .map(|i| {
            serde_json::json!({
                "dt": 1705492800 + (i as i64) * 10800,
                "main": {
                    "temp": 5.0 + i as f64,
                    "feels_like": 3.0,
                    "temp_min": 4.0 + i as f64,
                    "temp_max": 6.0 + i as f64,
                    "pressure": 1010,
                    "humidity": 80
                },
                "weather": [{ "id": 801, "main": "Clouds", "description": "few clouds" }],
                "wind": { "speed": 3.2 }
            })
        })
        .collect();

    serde_json::json!({
        "cod": "200",
        "cnt": samples,
        "list": list,
        "city": { "name": "London", "country": "GB" }
    })
}

async fn mount(server: &MockServer, endpoint: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .respond_with(response)
        .mount(server)
        .await;
}

fn provider(server: &MockServer) -> OpenWeatherProvider {
    OpenWeatherProvider::with_base_url("test-key".to_string(), server.uri())
}

// ============================================================================
// Provider
// ============================================================================

#[tokio::test]
async fn current_sends_place_units_and_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "London"))
        .and(query_param("units", "metric"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .expect(1)
        .mount(&server)
        .await;

    let snapshot = provider(&server).current("London").await.unwrap();

    assert_eq!(snapshot.place_name, "London");
    assert_eq!(snapshot.country.as_deref(), Some("GB"));
    assert_eq!(snapshot.condition_code, Some(500));
    assert_eq!(snapshot.condition, "light rain");
    assert_eq!(snapshot.humidity_pct, 82);
    assert_eq!(snapshot.visibility_m, Some(9000));
    assert!((snapshot.temperature_c - 11.4).abs() < 1e-9);
    assert!(snapshot.wind_speed_mps.is_some_and(|w| (w - 5.14).abs() < 1e-9));
}

#[tokio::test]
async fn current_404_is_not_found() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/weather",
        ResponseTemplate::new(404)
            .set_body_json(serde_json::json!({ "cod": "404", "message": "city not found" })),
    )
    .await;

    let err = provider(&server).current("Atlantis").await.unwrap_err();
    assert_eq!(err, FetchError::NotFound);
}

#[tokio::test]
async fn current_401_is_unauthorized() {
    let server = MockServer::start().await;
    mount(&server, "/weather", ResponseTemplate::new(401)).await;

    let err = provider(&server).current("London").await.unwrap_err();
    assert_eq!(err, FetchError::Unauthorized);
}

#[tokio::test]
async fn current_server_error_is_generic() {
    let server = MockServer::start().await;
    mount(&server, "/weather", ResponseTemplate::new(503).set_body_string("down")).await;

    let err = provider(&server).current("London").await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to fetch weather data");
}

#[tokio::test]
async fn current_malformed_json_is_generic() {
    let server = MockServer::start().await;
    mount(&server, "/weather", ResponseTemplate::new(200).set_body_string("{not json")).await;

    let err = provider(&server).current("London").await.unwrap_err();
    assert_eq!(err, FetchError::weather_failed());
}

#[tokio::test]
async fn unreachable_host_is_generic() {
    // Nothing listens on the discard port.
    let provider = OpenWeatherProvider::with_base_url("k".into(), "http://127.0.0.1:9".into());

    let err = provider.current("London").await.unwrap_err();
    assert_eq!(err, FetchError::weather_failed());
}

#[tokio::test]
async fn forecast_returns_raw_samples_in_order() {
    let server = MockServer::start().await;
    mount(&server, "/forecast", ResponseTemplate::new(200).set_body_json(forecast_body(40))).await;

    let samples = provider(&server).forecast("London").await.unwrap();

    assert_eq!(samples.len(), 40);
    assert!(samples.windows(2).all(|w| w[0].dt < w[1].dt));
}

// ============================================================================
// Pipeline
// ============================================================================

#[tokio::test]
async fn pipeline_picks_every_eighth_sample() {
    let server = MockServer::start().await;
    mount(&server, "/weather", ResponseTemplate::new(200).set_body_json(current_body())).await;
    mount(&server, "/forecast", ResponseTemplate::new(200).set_body_json(forecast_body(40))).await;

    let report = fetch_weather(&provider(&server), "London").await.unwrap();

    let dts: Vec<i64> = report.forecast.iter().map(|e| e.dt).collect();
    let expected: Vec<i64> = [0, 8, 16, 24, 32]
        .iter()
        .map(|i| 1705492800 + i * 10800)
        .collect();
    assert_eq!(dts, expected);
    assert_eq!(report.snapshot.place_name, "London");
}

#[tokio::test]
async fn pipeline_does_not_request_forecast_after_404() {
    let server = MockServer::start().await;
    mount(&server, "/weather", ResponseTemplate::new(404)).await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(40)))
        .expect(0)
        .mount(&server)
        .await;

    let err = fetch_weather(&provider(&server), "Atlantis").await.unwrap_err();
    assert_eq!(err.to_string(), "City not found. Please check the spelling.");
}

#[tokio::test]
async fn pipeline_forecast_failure_is_atomic() {
    let server = MockServer::start().await;
    mount(&server, "/weather", ResponseTemplate::new(200).set_body_json(current_body())).await;
    mount(&server, "/forecast", ResponseTemplate::new(404)).await;

    let err = fetch_weather(&provider(&server), "London").await.unwrap_err();
    assert_eq!(err, FetchError::forecast_failed());
}

// ============================================================================
// App
// ============================================================================

#[tokio::test]
async fn app_reaches_loaded_then_failed_then_recovers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Atlantis"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    mount(&server, "/weather", ResponseTemplate::new(200).set_body_json(current_body())).await;
    mount(&server, "/forecast", ResponseTemplate::new(200).set_body_json(forecast_body(12))).await;

    let mut app = WeatherApp::new(provider(&server), "London");

    let state = app.start().await;
    assert_eq!(state.forecast().map(<[_]>::len), Some(2));

    app.dispatch(Event::InputChanged("Atlantis".into())).await;
    let state = app.dispatch(Event::SearchSubmitted).await;
    assert_eq!(
        state.fetch,
        FetchState::Failed("City not found. Please check the spelling.".into())
    );
    assert!(state.snapshot().is_none());

    let state = app.dispatch(Event::Retry).await;
    assert_eq!(state.place, "London");
    assert!(state.snapshot().is_some());
}
